//! Game session: entity lifecycle and level flow
//!
//! `Game` owns the physics world, the arena, the RNG and the session state.
//! Collision reactions and hazard escalation live in [`super::policy`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::arena::Arena;
use super::color::{Color, PLAYER_COLOR, TARGET_COLOR, random_disco_color};
use super::entity::EntityKind;
use super::input::{Command, Escalation, Key, command_for};
use super::physics::{BodyDesc, BodyId, PhysicsWorld};
use super::placement::{Obstacle, PlacementRules, find_safe_position};
use super::random::RandomSource;
use super::state::{EntityView, GameEvent, GamePhase, Hazard, Session, Snapshot};
use crate::tuning::Tuning;

/// One play session
pub struct Game<W: PhysicsWorld, R: RandomSource> {
    pub(crate) world: W,
    pub(crate) rng: R,
    pub(crate) tuning: Tuning,
    pub(crate) rules: PlacementRules,
    pub(crate) arena: Arena,
    pub(crate) player: BodyId,
    pub(crate) target: Option<BodyId>,
    pub(crate) hazards: Vec<Hazard>,
    pub(crate) session: Session,
    events: Vec<GameEvent>,
}

impl<W: PhysicsWorld> Game<W, Pcg32> {
    /// Session driven by a seeded `Pcg32`
    pub fn seeded(world: W, seed: u64, tuning: Tuning, width: f32, height: f32) -> Self {
        Self::new(world, Pcg32::seed_from_u64(seed), tuning, width, height)
    }
}

impl<W: PhysicsWorld, R: RandomSource> Game<W, R> {
    /// Build the arena and the player; nothing moves until [`Game::start`]
    pub fn new(mut world: W, rng: R, tuning: Tuning, width: f32, height: f32) -> Self {
        let tuning = tuning.normalized();
        let arena = Arena::build(&mut world, width, height, tuning.wall_thickness);
        let player = world.add_body(
            BodyDesc::circle(EntityKind::Player, arena.center(), tuning.player_radius)
                .with_restitution(0.8)
                .with_friction(0.05, 0.01)
                .with_density(0.001),
        );

        Self {
            world,
            rng,
            rules: PlacementRules::from(&tuning),
            session: Session::new(tuning.initial_hazard_speed),
            tuning,
            arena,
            player,
            target: None,
            hazards: Vec::new(),
            events: Vec::new(),
        }
    }

    // === Accessors ===

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn level(&self) -> u32 {
        self.session.level
    }

    pub fn hazard_speed(&self) -> f32 {
        self.session.hazard_speed
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn player(&self) -> BodyId {
        self.player
    }

    pub fn target(&self) -> Option<BodyId> {
        self.target
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    /// Take every event recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    // === Phase transitions ===

    /// Leave the start screen and spawn level 1
    pub fn start(&mut self) {
        if self.session.phase != GamePhase::NotStarted {
            return;
        }
        self.session.level = 1;
        self.reset_player();
        self.create_target();
        self.create_hazards(self.session.level);
        self.session.phase = GamePhase::Playing;
        self.emit(GameEvent::Started);
        log::info!("Game started");
    }

    /// Target reached: advance the level counter and freeze
    pub fn complete_level(&mut self) {
        if self.session.phase != GamePhase::Playing {
            return;
        }
        self.session.level += 1;
        self.session.phase = GamePhase::LevelComplete;
        self.emit(GameEvent::TargetReached {
            completed: self.session.level - 1,
        });
        log::info!("Level {} complete", self.session.level - 1);
    }

    /// Player hit: freeze; repeated hits are no-ops
    pub fn game_over(&mut self) {
        if self.session.phase != GamePhase::Playing {
            return;
        }
        self.session.phase = GamePhase::GameOver;
        self.emit(GameEvent::GameOver {
            level: self.session.level,
        });
        log::info!("Game over at level {}", self.session.level);
    }

    /// Continue from a completed level into the next one
    pub fn resume(&mut self) {
        if self.session.phase != GamePhase::LevelComplete {
            return;
        }
        self.prepare_next_level();
        self.session.phase = GamePhase::Playing;
        log::info!("Resumed at level {}", self.session.level);
    }

    /// Fresh target, centered player, and the hazard set for the current level
    ///
    /// The target is placed while the player still sits where the last level
    /// ended, so it never lands on top of the target just collected.
    pub fn prepare_next_level(&mut self) {
        self.create_target();
        self.reset_player();
        self.create_hazards(self.session.level);
    }

    /// Back to level 1 after a game over
    pub fn restart(&mut self) {
        if self.session.phase != GamePhase::GameOver {
            return;
        }
        self.session.level = 1;
        self.reset_player();
        self.create_target();
        self.create_hazards(self.session.level);
        self.session.phase = GamePhase::Playing;
        log::info!("Game restarted");
    }

    // === Entity lifecycle ===

    fn reset_player(&mut self) {
        self.world.set_position(self.player, self.arena.center());
        self.world.set_velocity(self.player, Vec2::ZERO);
    }

    fn player_obstacle(&self) -> Option<Obstacle> {
        self.world
            .position(self.player)
            .map(|pos| Obstacle::new(EntityKind::Player, pos))
    }

    /// Replace the target with a new one placed away from the player
    pub fn create_target(&mut self) {
        if let Some(old) = self.target.take() {
            self.world.remove_body(old);
        }

        let avoid = [self.player_obstacle()];
        let pos = find_safe_position(
            &mut self.rng,
            self.arena.width,
            self.arena.height,
            self.tuning.min_player_target_distance,
            &avoid,
            &self.rules,
        );
        let id = self.world.add_body(
            BodyDesc::circle(EntityKind::Target, pos, self.tuning.target_radius)
                .with_static(true)
                .with_sensor(true)
                .with_restitution(1.0),
        );
        self.target = Some(id);
        self.emit(GameEvent::TargetSpawned { pos });
    }

    /// Remove every hazard, reset the speed, and spawn `count` new ones
    pub fn create_hazards(&mut self, count: u32) {
        for hazard in self.hazards.drain(..) {
            self.world.remove_body(hazard.id);
        }
        self.session
            .reset_hazard_speed(self.tuning.initial_hazard_speed);

        for _ in 0..count {
            self.create_single_hazard();
        }

        log::info!(
            "Created {} hazards for level {}",
            self.hazards.len(),
            self.session.level
        );
        self.emit(GameEvent::LevelStarted {
            level: self.session.level,
            hazards: self.hazards.len(),
        });
    }

    fn create_single_hazard(&mut self) {
        let mut avoid = Vec::with_capacity(self.hazards.len() + 2);
        avoid.push(self.player_obstacle());
        avoid.push(
            self.target
                .and_then(|id| self.world.position(id))
                .map(|pos| Obstacle::new(EntityKind::Target, pos)),
        );
        avoid.extend(self.hazards.iter().map(|h| {
            self.world
                .position(h.id)
                .map(|pos| Obstacle::new(EntityKind::Hazard, pos))
        }));

        let pos = find_safe_position(
            &mut self.rng,
            self.arena.width,
            self.arena.height,
            self.tuning.min_player_hazard_distance,
            &avoid,
            &self.rules,
        );
        let color = random_disco_color(&mut self.rng);
        let id = self.world.add_body(
            BodyDesc::circle(EntityKind::Hazard, pos, self.tuning.hazard_radius)
                .with_restitution(1.0)
                .with_friction(0.0, 0.0)
                .with_density(0.001),
        );
        let velocity = self.rng.direction() * self.session.hazard_speed;
        self.world.set_velocity(id, velocity);
        self.hazards.push(Hazard { id, color });

        if let Some(player) = self.world.position(self.player) {
            log::debug!(
                "Hazard created at distance {:.0} from player (min {:.0})",
                pos.distance(player),
                self.tuning.min_player_hazard_distance
            );
        }
        self.emit(GameEvent::HazardSpawned { id, pos, color });
    }

    /// Regenerate the walls for a new playfield size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.arena.resize(&mut self.world, width, height);
        self.emit(GameEvent::ArenaResized { width, height });
        log::info!("Arena resized to {width}x{height}");
    }

    // === Simulation ===

    /// One physics step of `dt_ms`; does nothing outside `Playing`
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.session.phase.is_playing() {
            return;
        }
        let contacts = self.world.step(dt_ms);
        for contact in &contacts {
            self.handle_collision(contact);
        }
        if self.session.phase.is_playing() {
            self.check_hazard_boundaries();
        }
    }

    /// Apply a key press according to the current phase
    pub fn handle_key(&mut self, key: Key) {
        match command_for(key, self.session.phase, self.tuning.player_force) {
            Command::Start => self.start(),
            Command::Restart => self.restart(),
            Command::Resume => self.resume(),
            Command::Push { force, escalation } => {
                self.world.apply_force(self.player, force);
                match escalation {
                    Escalation::Reverse => self.reverse_hazard_directions(),
                    Escalation::SpeedUp => self.increase_hazard_speed(),
                }
            }
            Command::Ignore => {}
        }
    }

    // === Presentation ===

    fn view(&self, id: BodyId, radius: f32, color: Color) -> Option<EntityView> {
        Some(EntityView {
            id,
            kind: self.world.kind(id)?,
            pos: self.world.position(id)?,
            vel: self.world.velocity(id)?,
            radius,
            color,
            outline: color.outline(),
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.session.phase,
            level: self.session.level,
            hazard_speed: self.session.hazard_speed,
            arena_width: self.arena.width,
            arena_height: self.arena.height,
            player: self.view(self.player, self.tuning.player_radius, PLAYER_COLOR),
            target: self
                .target
                .and_then(|id| self.view(id, self.tuning.target_radius, TARGET_COLOR)),
            hazards: self
                .hazards
                .iter()
                .filter_map(|h| self.view(h.id, self.tuning.hazard_radius, h.color))
                .collect(),
        }
    }
}
