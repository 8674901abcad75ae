//! Fixed-timestep driver
//!
//! Frame times from the host are accumulated and consumed in `STEP_MS`
//! slices, at most `MAX_SUBSTEPS` per frame.

use super::game::Game;
use super::physics::PhysicsWorld;
use super::random::RandomSource;
use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, STEP_MS};

/// Accumulator for turning variable frame times into fixed steps
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedStepper {
    accumulator: f32,
}

impl FixedStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leftover time not yet simulated, in milliseconds
    pub fn pending_ms(&self) -> f32 {
        self.accumulator
    }

    /// Drop any leftover time (e.g. after the host was suspended)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Advance `game` by a frame of `frame_ms`; returns the number of steps run
    pub fn advance<W: PhysicsWorld, R: RandomSource>(
        &mut self,
        game: &mut Game<W, R>,
        frame_ms: f32,
    ) -> u32 {
        if !game.phase().is_playing() {
            // Paused phases don't bank time for later
            self.accumulator = 0.0;
            return 0;
        }

        self.accumulator += frame_ms.clamp(0.0, MAX_FRAME_MS);

        let mut substeps = 0;
        while self.accumulator >= STEP_MS && substeps < MAX_SUBSTEPS {
            game.tick(STEP_MS);
            self.accumulator -= STEP_MS;
            substeps += 1;
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= STEP_MS {
            log::debug!("Dropping {:.1}ms of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        substeps
    }
}
