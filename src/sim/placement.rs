//! Safe spawn positions
//!
//! Rejection sampling inside the margin-reduced arena. Each entity to avoid
//! gets its own minimum distance from a small policy table; if a full round
//! of sampling fails, the requested distance is relaxed geometrically and the
//! search repeats. The search always returns a point, even when nothing
//! satisfies the constraints.

use glam::Vec2;

use super::arena::random_point_in;
use super::entity::EntityKind;
use super::random::RandomSource;
use crate::tuning::Tuning;

/// An already-placed entity the new position must keep clear of
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub kind: EntityKind,
    pub pos: Vec2,
}

impl Obstacle {
    pub fn new(kind: EntityKind, pos: Vec2) -> Self {
        Self { kind, pos }
    }
}

/// Parameters of the placement search
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRules {
    /// Keep-out band along every arena edge
    pub margin: f32,
    /// Samples per round before relaxing
    pub max_attempts: u32,
    pub relax_factor: f32,
    /// Rounds stop relaxing once the distance is at or below this
    pub relax_floor: f32,
    /// Requested distance that marks a hazard placement
    pub player_hazard_distance: f32,
    pub hazard_hazard_distance: f32,
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self::from(&Tuning::default())
    }
}

impl From<&Tuning> for PlacementRules {
    fn from(tuning: &Tuning) -> Self {
        Self {
            margin: tuning.placement_margin,
            max_attempts: tuning.placement_max_attempts,
            relax_factor: tuning.placement_relax_factor,
            relax_floor: tuning.placement_relax_floor,
            player_hazard_distance: tuning.min_player_hazard_distance,
            hazard_hazard_distance: tuning.min_hazard_hazard_distance,
        }
    }
}

impl PlacementRules {
    /// Minimum distance to keep from `obstacle` for this search round
    ///
    /// `min_distance` is the round's (possibly relaxed) requested distance and
    /// `avoiding_player` says whether the player is part of the avoidance set.
    pub fn effective_distance(
        &self,
        obstacle: &Obstacle,
        min_distance: f32,
        avoiding_player: bool,
    ) -> f32 {
        match obstacle.kind {
            EntityKind::Player if min_distance == self.player_hazard_distance => {
                self.player_hazard_distance
            }
            EntityKind::Hazard if avoiding_player => self.hazard_hazard_distance,
            _ => min_distance,
        }
    }

    fn is_safe(
        &self,
        candidate: Vec2,
        min_distance: f32,
        avoid: &[Option<Obstacle>],
        avoiding_player: bool,
    ) -> bool {
        avoid.iter().flatten().all(|obstacle| {
            let required = self.effective_distance(obstacle, min_distance, avoiding_player);
            candidate.distance(obstacle.pos) >= required
        })
    }
}

/// Find a position in `[margin, width - margin] x [margin, height - margin]`
/// that keeps clear of every obstacle in `avoid` (`None` entries are skipped)
pub fn find_safe_position<R: RandomSource + ?Sized>(
    rng: &mut R,
    width: f32,
    height: f32,
    min_distance: f32,
    avoid: &[Option<Obstacle>],
    rules: &PlacementRules,
) -> Vec2 {
    let attempts_per_round = rules.max_attempts.max(1);
    let can_relax = rules.relax_factor > 0.0 && rules.relax_factor < 1.0;
    let avoiding_player = avoid
        .iter()
        .flatten()
        .any(|o| o.kind == EntityKind::Player);
    let mut required = min_distance;
    let mut total_attempts = 0u32;

    loop {
        let mut candidate = Vec2::ZERO;
        for _ in 0..attempts_per_round {
            total_attempts += 1;
            candidate = random_point_in(rng, width, height, rules.margin);
            if rules.is_safe(candidate, required, avoid, avoiding_player) {
                log::debug!(
                    "Found safe position after {} attempts (distance {:.1})",
                    total_attempts,
                    required
                );
                return candidate;
            }
        }

        if can_relax && required > rules.relax_floor {
            log::debug!(
                "No safe position after {} attempts at distance {:.1}, relaxing",
                attempts_per_round,
                required
            );
            required *= rules.relax_factor;
        } else {
            log::warn!(
                "Giving up on a safe position after {} attempts, using ({:.0}, {:.0})",
                total_attempts,
                candidate.x,
                candidate.y
            );
            return candidate;
        }
    }
}
