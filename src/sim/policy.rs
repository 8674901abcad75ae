//! Collision response and hazard escalation
//!
//! Reacts to "collision started" reports from the physics world:
//! - player + target: level complete
//! - player + hazard: game over
//! - hazard + target: recolor, bounce straight away from the target
//! - hazard + hazard: recolor both, occasional random nudge
//! - hazard + wall: recolor
//!
//! Arrow keys additionally speed up or reverse every hazard at once.

use glam::Vec2;

use super::color::{HIT_COLOR, TARGET_COLOR, random_disco_color};
use super::entity::EntityKind;
use super::game::Game;
use super::physics::{BodyId, CollisionStarted, PhysicsWorld};
use super::random::RandomSource;
use super::state::GameEvent;

/// Particles for a target pickup
const TARGET_BURST: u32 = 20;
/// Particles for a player hit
const HIT_BURST: u32 = 30;
/// Particles for any hazard contact
const CONTACT_BURST: u32 = 5;

/// Gameplay meaning of a contact between two labelled bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    PlayerTarget,
    PlayerHazard,
    HazardTarget { hazard: BodyId, target: BodyId },
    HazardHazard { a: BodyId, b: BodyId },
    HazardWall { hazard: BodyId },
}

/// Classify an unordered body pair; `None` for pairs with no gameplay effect
pub fn classify(a: (BodyId, EntityKind), b: (BodyId, EntityKind)) -> Option<Contact> {
    use EntityKind::*;

    match (a.1, b.1) {
        (Player, Target) | (Target, Player) => Some(Contact::PlayerTarget),
        (Player, Hazard) | (Hazard, Player) => Some(Contact::PlayerHazard),
        (Hazard, Target) => Some(Contact::HazardTarget {
            hazard: a.0,
            target: b.0,
        }),
        (Target, Hazard) => Some(Contact::HazardTarget {
            hazard: b.0,
            target: a.0,
        }),
        (Hazard, Hazard) => Some(Contact::HazardHazard { a: a.0, b: b.0 }),
        (Hazard, Wall) => Some(Contact::HazardWall { hazard: a.0 }),
        (Wall, Hazard) => Some(Contact::HazardWall { hazard: b.0 }),
        (Player, Wall) | (Wall, Player) => None,
        (Player, Player) | (Target, Target) | (Wall, Wall) => None,
        (Target, Wall) | (Wall, Target) => None,
    }
}

/// Velocity pointing from `target` through `hazard`, keeping `velocity`'s speed
///
/// `None` when the two positions coincide.
pub fn bounce_away(hazard: Vec2, target: Vec2, velocity: Vec2) -> Option<Vec2> {
    let away = hazard - target;
    if away.length_squared() == 0.0 {
        return None;
    }
    Some(away.normalize() * velocity.length())
}

/// `velocity` rescaled to `speed`; `None` when it has no direction
pub fn rescale(velocity: Vec2, speed: f32) -> Option<Vec2> {
    if velocity.length_squared() == 0.0 {
        return None;
    }
    Some(velocity.normalize() * speed)
}

impl<W: PhysicsWorld, R: RandomSource> Game<W, R> {
    /// Apply the gameplay rules for one started contact
    pub fn handle_collision(&mut self, started: &CollisionStarted) {
        if !self.session.phase.is_playing() {
            return;
        }
        let (Some(kind_a), Some(kind_b)) = (self.world.kind(started.a), self.world.kind(started.b))
        else {
            return;
        };
        let Some(contact) = classify((started.a, kind_a), (started.b, kind_b)) else {
            return;
        };

        match contact {
            Contact::PlayerTarget => {
                self.complete_level();
                if let Some(pos) = self.target.and_then(|id| self.world.position(id)) {
                    self.emit(GameEvent::Burst {
                        pos,
                        color: TARGET_COLOR,
                        count: TARGET_BURST,
                    });
                }
            }
            Contact::PlayerHazard => {
                self.game_over();
                if let Some(pos) = self.world.position(self.player) {
                    self.emit(GameEvent::Burst {
                        pos,
                        color: HIT_COLOR,
                        count: HIT_BURST,
                    });
                }
            }
            Contact::HazardTarget { hazard, target } => {
                self.hazard_hits_target(hazard, target, started.contact);
            }
            Contact::HazardHazard { a, b } => {
                self.hazards_collide(a, b, started.contact);
            }
            Contact::HazardWall { hazard } => {
                let point = started.contact.or_else(|| self.world.position(hazard));
                self.contact_burst(point);
                self.recolor_hazard(hazard);
            }
        }
    }

    fn hazard_hits_target(&mut self, hazard: BodyId, target: BodyId, contact: Option<Vec2>) {
        let (Some(hazard_pos), Some(target_pos)) =
            (self.world.position(hazard), self.world.position(target))
        else {
            return;
        };

        self.contact_burst(contact.or(Some((hazard_pos + target_pos) * 0.5)));
        self.recolor_hazard(hazard);

        let velocity = self.world.velocity(hazard).unwrap_or(Vec2::ZERO);
        if let Some(bounced) = bounce_away(hazard_pos, target_pos, velocity) {
            self.world.set_velocity(hazard, bounced);
        }
    }

    fn hazards_collide(&mut self, a: BodyId, b: BodyId, contact: Option<Vec2>) {
        let midpoint = match (self.world.position(a), self.world.position(b)) {
            (Some(pa), Some(pb)) => Some((pa + pb) * 0.5),
            _ => None,
        };
        self.contact_burst(contact.or(midpoint));
        self.recolor_hazard(a);
        self.recolor_hazard(b);

        if self.rng.chance(self.tuning.hazard_impulse_chance) {
            let force = self.rng.direction() * self.tuning.hazard_impulse_force;
            let nudged = if self.rng.chance(0.5) { a } else { b };
            self.world.apply_force(nudged, force);
            log::debug!("Nudged hazard {:?} by {:?}", nudged, force);
        }
    }

    fn contact_burst(&mut self, point: Option<Vec2>) {
        if let Some(pos) = point {
            let color = random_disco_color(&mut self.rng);
            self.emit(GameEvent::Burst {
                pos,
                color,
                count: CONTACT_BURST,
            });
        }
    }

    /// Give a hazard a fresh random palette color
    pub fn recolor_hazard(&mut self, id: BodyId) {
        let color = random_disco_color(&mut self.rng);
        if let Some(hazard) = self.hazards.iter_mut().find(|h| h.id == id) {
            hazard.color = color;
            self.emit(GameEvent::HazardRecolored {
                id,
                color,
                outline: color.outline(),
            });
        }
    }

    // === Escalation ===

    /// Multiply the shared hazard speed (capped) and push every hazard to it
    pub fn increase_hazard_speed(&mut self) {
        let speed = self.session.escalate(
            self.tuning.hazard_speed_multiplier,
            self.tuning.max_hazard_speed,
        );
        for hazard in &self.hazards {
            let velocity = self.world.velocity(hazard.id).unwrap_or(Vec2::ZERO);
            // A stopped hazard has no direction to keep; leave it be
            if let Some(scaled) = rescale(velocity, speed) {
                self.world.set_velocity(hazard.id, scaled);
            }
        }
        self.emit(GameEvent::HazardsSpedUp { speed });
        log::debug!("Hazard speed now {speed:.2}");
    }

    /// Flip every hazard's velocity
    pub fn reverse_hazard_directions(&mut self) {
        for hazard in &self.hazards {
            if let Some(velocity) = self.world.velocity(hazard.id) {
                self.world.set_velocity(hazard.id, -velocity);
            }
        }
        self.emit(GameEvent::HazardsReversed);
    }

    // === Recovery ===

    /// Put back any hazard that tunneled out of the arena, at its current speed
    pub fn check_hazard_boundaries(&mut self) {
        let escape_margin = self.tuning.escape_margin;
        let respawn_margin = self.tuning.respawn_margin;

        for i in 0..self.hazards.len() {
            let id = self.hazards[i].id;
            let Some(pos) = self.world.position(id) else {
                continue;
            };
            if !self.arena.escaped(pos, escape_margin) {
                continue;
            }

            let speed = self.world.velocity(id).unwrap_or(Vec2::ZERO).length();
            let new_pos = self.arena.random_point(&mut self.rng, respawn_margin);
            let velocity = self.rng.direction() * speed;
            self.world.set_position(id, new_pos);
            self.world.set_velocity(id, velocity);
            log::warn!("Hazard {id:?} escaped at {pos:?}, moved to {new_pos:?}");
            self.emit(GameEvent::HazardEscaped { id });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::STEP_MS;
    use crate::sim::state::GamePhase;
    use crate::sim::HeadlessWorld;
    use crate::tuning::Tuning;
    use proptest::prelude::*;
    use rand_pcg::Pcg32;

    type TestGame = Game<HeadlessWorld, Pcg32>;

    fn playing_game(seed: u64) -> TestGame {
        let mut game = Game::seeded(HeadlessWorld::new(), seed, Tuning::default(), 1000.0, 800.0);
        game.start();
        game.drain_events();
        game
    }

    fn started(a: BodyId, b: BodyId) -> CollisionStarted {
        CollisionStarted {
            a,
            b,
            contact: None,
        }
    }

    fn hazard_velocities(game: &TestGame) -> Vec<Vec2> {
        game.hazards()
            .iter()
            .map(|h| game.world.velocity(h.id).unwrap())
            .collect()
    }

    #[test]
    fn test_classify_is_order_independent() {
        let (p, t, h, h2, w) = (BodyId(1), BodyId(2), BodyId(3), BodyId(4), BodyId(5));
        use EntityKind::*;

        let cases = [
            ((p, Player), (t, Target), Some(Contact::PlayerTarget)),
            ((p, Player), (h, Hazard), Some(Contact::PlayerHazard)),
            (
                (h, Hazard),
                (t, Target),
                Some(Contact::HazardTarget { hazard: h, target: t }),
            ),
            ((h, Hazard), (w, Wall), Some(Contact::HazardWall { hazard: h })),
            ((p, Player), (w, Wall), None),
        ];
        for (a, b, expected) in cases {
            assert_eq!(classify(a, b), expected);
            assert_eq!(classify(b, a), expected);
        }
        assert_eq!(
            classify((h, Hazard), (h2, Hazard)),
            Some(Contact::HazardHazard { a: h, b: h2 })
        );
    }

    #[test]
    fn test_bounce_away_keeps_speed() {
        let v = bounce_away(Vec2::new(10.0, 0.0), Vec2::ZERO, Vec2::new(-3.0, 4.0)).unwrap();
        assert!((v - Vec2::new(5.0, 0.0)).length() < 1e-5);
        assert!(bounce_away(Vec2::ONE, Vec2::ONE, Vec2::X).is_none());
    }

    #[test]
    fn test_rescale_guards_zero() {
        assert!(rescale(Vec2::ZERO, 10.0).is_none());
        let v = rescale(Vec2::new(3.0, 4.0), 10.0).unwrap();
        assert!((v - Vec2::new(6.0, 8.0)).length() < 1e-5);
    }

    #[test]
    fn test_player_target_completes_level_and_freezes() {
        let mut game = playing_game(1);
        let (player, target) = (game.player(), game.target().unwrap());
        game.world.set_velocity(player, Vec2::new(1.0, 1.0));

        game.handle_collision(&started(player, target));
        assert_eq!(game.level(), 2);
        assert_eq!(game.phase(), GamePhase::LevelComplete);

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::TargetReached { completed: 1 }));
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::Burst { color, count: 20, .. } if *color == TARGET_COLOR
        )));

        let player_pos = game.world.position(player).unwrap();
        let hazard_pos: Vec<_> = game
            .hazards()
            .iter()
            .map(|h| game.world.position(h.id).unwrap())
            .collect();
        for _ in 0..30 {
            game.tick(STEP_MS);
        }
        assert_eq!(game.world.position(player).unwrap(), player_pos);
        for (hazard, before) in game.hazards().iter().zip(hazard_pos) {
            assert_eq!(game.world.position(hazard.id).unwrap(), before);
        }
    }

    #[test]
    fn test_double_hazard_hit_is_single_game_over() {
        let mut game = playing_game(2);
        // Give level 1 a second hazard
        game.create_hazards(2);
        game.drain_events();
        let player = game.player();
        let (h1, h2) = (game.hazards()[0].id, game.hazards()[1].id);

        game.handle_collision(&started(player, h1));
        game.handle_collision(&started(h2, player));

        assert_eq!(game.phase(), GamePhase::GameOver);
        let game_overs = game
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_two_hazards_on_player_in_one_step() {
        let mut game = playing_game(15);
        game.create_hazards(2);
        game.drain_events();
        let player = game.world.position(game.player()).unwrap();
        let ids: Vec<BodyId> = game.hazards().iter().map(|h| h.id).collect();
        for (hazard, offset) in ids.into_iter().zip([Vec2::new(25.0, 0.0), Vec2::new(-25.0, 0.0)]) {
            game.world.set_position(hazard, player + offset);
            game.world.set_velocity(hazard, Vec2::ZERO);
        }

        game.tick(STEP_MS);

        assert_eq!(game.phase(), GamePhase::GameOver);
        let events = game.drain_events();
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        let hit_bursts = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Burst { count: 30, .. }))
            .count();
        assert_eq!(game_overs, 1);
        assert_eq!(hit_bursts, 1);
    }

    #[test]
    fn test_wall_hit_only_recolors() {
        let mut game = playing_game(3);
        let hazard = game.hazards()[0].id;
        let wall = game.arena().walls()[0];
        game.world.set_position(hazard, Vec2::new(100.0, 100.0));
        game.world.set_velocity(hazard, Vec2::new(3.0, 4.0));

        game.handle_collision(&started(hazard, wall));

        assert_eq!(game.world.position(hazard).unwrap(), Vec2::new(100.0, 100.0));
        assert_eq!(game.world.velocity(hazard).unwrap(), Vec2::new(3.0, 4.0));
        let events = game.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::HazardRecolored { id, .. } if *id == hazard)));
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::Burst { pos, count: 5, .. } if *pos == Vec2::new(100.0, 100.0)
        )));
    }

    #[test]
    fn test_hazard_bounces_away_from_target() {
        let mut game = playing_game(4);
        let hazard = game.hazards()[0].id;
        let target = game.target().unwrap();
        let target_pos = game.world.position(target).unwrap();
        game.world.set_position(hazard, target_pos + Vec2::new(0.0, 40.0));
        game.world.set_velocity(hazard, Vec2::new(3.0, -4.0));

        game.handle_collision(&started(target, hazard));

        let v = game.world.velocity(hazard).unwrap();
        assert!((v - Vec2::new(0.0, 5.0)).length() < 1e-4);
    }

    #[test]
    fn test_hazard_on_target_center_keeps_velocity() {
        let mut game = playing_game(5);
        let hazard = game.hazards()[0].id;
        let target = game.target().unwrap();
        let target_pos = game.world.position(target).unwrap();
        game.world.set_position(hazard, target_pos);
        game.world.set_velocity(hazard, Vec2::new(3.0, -4.0));

        game.handle_collision(&started(hazard, target));
        assert_eq!(game.world.velocity(hazard).unwrap(), Vec2::new(3.0, -4.0));
    }

    /// Two stopped, isolated hazards; returns how many of them moved after one step
    fn nudged_after_hazard_contact(seed: u64, impulse_chance: f32) -> (usize, Vec<BodyId>) {
        let mut game = playing_game(seed);
        game.tuning.hazard_impulse_chance = impulse_chance;
        game.create_hazards(2);
        game.drain_events();
        let (a, b) = (game.hazards()[0].id, game.hazards()[1].id);
        game.world.set_position(a, Vec2::new(250.0, 250.0));
        game.world.set_position(b, Vec2::new(750.0, 600.0));
        game.world.set_velocity(a, Vec2::ZERO);
        game.world.set_velocity(b, Vec2::ZERO);

        game.handle_collision(&started(a, b));
        let recolored = game
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::HazardRecolored { id, .. } => Some(id),
                _ => None,
            })
            .collect();

        game.world.step(STEP_MS);
        let moved = [a, b]
            .iter()
            .filter(|id| game.world.velocity(**id).unwrap() != Vec2::ZERO)
            .count();
        (moved, recolored)
    }

    #[test]
    fn test_hazard_pair_recolors_both() {
        let (_, recolored) = nudged_after_hazard_contact(14, 0.0);
        assert_eq!(recolored.len(), 2);
        assert_ne!(recolored[0], recolored[1]);
    }

    #[test]
    fn test_hazard_pair_nudge_follows_chance() {
        for seed in 0..5 {
            assert_eq!(nudged_after_hazard_contact(seed, 0.0).0, 0);
            assert_eq!(nudged_after_hazard_contact(seed, 1.0).0, 1);
        }
    }

    #[test]
    fn test_speed_up_rescales_every_hazard() {
        let mut game = playing_game(6);
        game.create_hazards(3);
        game.increase_hazard_speed();
        assert!((game.hazard_speed() - 7.2).abs() < 1e-4);
        for v in hazard_velocities(&game) {
            assert!((v.length() - 7.2).abs() < 1e-3);
        }
        assert!(game
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::HazardsSpedUp { .. })));
    }

    #[test]
    fn test_speed_up_preserves_direction() {
        let mut game = playing_game(7);
        let hazard = game.hazards()[0].id;
        game.world.set_velocity(hazard, Vec2::new(3.0, 4.0));
        game.increase_hazard_speed();
        let v = game.world.velocity(hazard).unwrap();
        assert!((v.normalize() - Vec2::new(0.6, 0.8)).length() < 1e-5);
    }

    #[test]
    fn test_speed_up_at_cap_stays_at_cap() {
        let mut game = playing_game(8);
        for _ in 0..10 {
            game.increase_hazard_speed();
        }
        assert_eq!(game.hazard_speed(), 40.0);
        game.increase_hazard_speed();
        assert_eq!(game.hazard_speed(), 40.0);
    }

    #[test]
    fn test_speed_up_skips_stopped_hazard() {
        let mut game = playing_game(9);
        let hazard = game.hazards()[0].id;
        game.world.set_velocity(hazard, Vec2::ZERO);
        game.increase_hazard_speed();
        assert_eq!(game.world.velocity(hazard).unwrap(), Vec2::ZERO);
    }

    #[test]
    fn test_arrow_keys_drive_escalation() {
        use crate::sim::input::Key;

        let mut game = playing_game(10);
        let before = hazard_velocities(&game);
        game.handle_key(Key::Left);
        let after: Vec<_> = hazard_velocities(&game);
        assert_eq!(after, before.iter().map(|v| -*v).collect::<Vec<_>>());

        game.handle_key(Key::Down);
        assert!(game.hazard_speed() > 4.0);
    }

    #[test]
    fn test_collisions_ignored_when_not_playing() {
        let mut game = playing_game(11);
        let (player, target) = (game.player(), game.target().unwrap());
        game.game_over();
        game.handle_collision(&started(player, target));
        assert_eq!(game.level(), 1);
        assert_eq!(game.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_escaped_hazard_is_recovered_at_same_speed() {
        let mut game = playing_game(12);
        let hazard = game.hazards()[0].id;
        game.world.set_position(hazard, Vec2::new(-150.0, 400.0));
        game.world.set_velocity(hazard, Vec2::new(-6.0, 8.0));

        game.check_hazard_boundaries();

        let pos = game.world.position(hazard).unwrap();
        assert!(pos.x >= 50.0 && pos.x <= 950.0);
        assert!(pos.y >= 50.0 && pos.y <= 750.0);
        let speed = game.world.velocity(hazard).unwrap().length();
        assert!((speed - 10.0).abs() < 1e-4);
        assert!(game
            .drain_events()
            .contains(&GameEvent::HazardEscaped { id: hazard }));
    }

    #[test]
    fn test_hazard_just_outside_is_left_alone() {
        let mut game = playing_game(13);
        let hazard = game.hazards()[0].id;
        game.world.set_position(hazard, Vec2::new(-90.0, 400.0));
        game.check_hazard_boundaries();
        assert_eq!(game.world.position(hazard).unwrap(), Vec2::new(-90.0, 400.0));
    }

    proptest! {
        #[test]
        fn prop_reverse_twice_is_identity(seed in any::<u64>(), count in 1u32..6) {
            let mut game = playing_game(seed);
            game.create_hazards(count);
            let before = hazard_velocities(&game);
            game.reverse_hazard_directions();
            game.reverse_hazard_directions();
            prop_assert_eq!(hazard_velocities(&game), before);
        }

        #[test]
        fn prop_speed_never_exceeds_cap(seed in any::<u64>(), presses in 0usize..20) {
            let mut game = playing_game(seed);
            let mut last = game.hazard_speed();
            for _ in 0..presses {
                game.increase_hazard_speed();
                prop_assert!(game.hazard_speed() >= last);
                prop_assert!(game.hazard_speed() <= 40.0);
                last = game.hazard_speed();
            }
        }
    }
}
