//! Disco Dodge entry point
//!
//! The native build runs a headless autopilot session and prints the final
//! snapshot as JSON. Usage: `disco-dodge [tuning.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use disco_dodge::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH, STEP_MS};
    use disco_dodge::sim::{FixedStepper, Game, GamePhase, HeadlessWorld, Key, PhysicsWorld};
    use disco_dodge::{Snapshot, Tuning};
    use rand_pcg::Pcg32;

    /// Frames the autopilot plays before giving up (five minutes at 60 Hz)
    const FRAME_BUDGET: u32 = 60 * 60 * 5;
    /// Frames between steering presses
    const STEER_EVERY: u32 = 20;
    /// Stop steering once this close to the target on an axis
    const DEAD_ZONE: f32 = 10.0;

    /// Arrow key that pushes the player toward `to`, along the longer axis
    fn steer(from: glam::Vec2, to: glam::Vec2) -> Option<Key> {
        let delta = to - from;
        if delta.x.abs() < DEAD_ZONE && delta.y.abs() < DEAD_ZONE {
            return None;
        }
        Some(if delta.x.abs() >= delta.y.abs() {
            if delta.x > 0.0 { Key::Right } else { Key::Left }
        } else if delta.y > 0.0 {
            Key::Down
        } else {
            Key::Up
        })
    }

    pub fn run(tuning: Tuning, seed: u64) -> Snapshot {
        let mut game: Game<HeadlessWorld, Pcg32> =
            Game::seeded(HeadlessWorld::new(), seed, tuning, DEFAULT_WIDTH, DEFAULT_HEIGHT);
        let mut stepper = FixedStepper::new();
        game.handle_key(Key::Space);

        for frame in 0..FRAME_BUDGET {
            match game.phase() {
                GamePhase::GameOver => break,
                GamePhase::LevelComplete => {
                    log::info!("Autopilot cleared level {}", game.level() - 1);
                    stepper.reset();
                    game.handle_key(Key::Space);
                }
                GamePhase::Playing if frame % STEER_EVERY == 0 => {
                    let player = game.world().position(game.player());
                    let target = game.target().and_then(|id| game.world().position(id));
                    if let (Some(player), Some(target)) = (player, target) {
                        if let Some(key) = steer(player, target) {
                            game.handle_key(key);
                        }
                    }
                }
                _ => {}
            }

            stepper.advance(&mut game, STEP_MS);
            for event in game.drain_events() {
                log::debug!("{event:?}");
            }
        }

        log::info!(
            "Autopilot finished at level {} ({:?})",
            game.level(),
            game.phase()
        );
        game.snapshot()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use disco_dodge::Tuning;
    use std::path::Path;

    env_logger::init();
    log::info!("Disco Dodge (native, headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => Tuning::load(Path::new(&path)),
        None => Tuning::default(),
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::warn!("Invalid seed: {e}; using 0");
            0
        }
        None => 0,
    };

    let snapshot = autopilot::run(tuning, seed);
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Failed to serialize snapshot: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser host yet; the library is driven by the embedding page
}
