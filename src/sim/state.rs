//! Session state, observer events and presentation snapshots

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::entity::EntityKind;
use super::physics::BodyId;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, nothing simulated yet
    #[default]
    NotStarted,
    /// Active gameplay, the only phase that steps physics
    Playing,
    /// Target reached; paused until the player resumes into the next level
    LevelComplete,
    /// Player touched a hazard
    GameOver,
}

impl GamePhase {
    pub fn is_playing(self) -> bool {
        self == GamePhase::Playing
    }

    /// Physics stepping is frozen
    pub fn is_paused(self) -> bool {
        matches!(self, GamePhase::LevelComplete | GamePhase::GameOver)
    }

    pub fn is_started(self) -> bool {
        self != GamePhase::NotStarted
    }
}

/// Level number, hazard speed and phase for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Current level (1-based)
    pub level: u32,
    /// Speed every hazard is driven at; reset at hazard creation, only grows within a level
    pub hazard_speed: f32,
    pub phase: GamePhase,
}

impl Session {
    pub fn new(initial_hazard_speed: f32) -> Self {
        Self {
            level: 1,
            hazard_speed: initial_hazard_speed,
            phase: GamePhase::NotStarted,
        }
    }

    pub fn reset_hazard_speed(&mut self, initial: f32) {
        self.hazard_speed = initial;
    }

    /// Multiply the hazard speed, capped at `max`, and return the new speed
    pub fn escalate(&mut self, multiplier: f32, max: f32) -> f32 {
        self.hazard_speed = (self.hazard_speed * multiplier).min(max);
        self.hazard_speed
    }
}

/// A live hazard and its current color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: BodyId,
    pub color: Color,
}

/// Things that happened inside the simulation, for the presentation layer
/// (particles, glows, sounds, overlay screens)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    LevelStarted { level: u32, hazards: usize },
    TargetSpawned { pos: Vec2 },
    HazardSpawned { id: BodyId, pos: Vec2, color: Color },
    HazardRecolored { id: BodyId, color: Color, outline: Color },
    /// Particle burst
    Burst { pos: Vec2, color: Color, count: u32 },
    TargetReached { completed: u32 },
    GameOver { level: u32 },
    HazardsSpedUp { speed: f32 },
    HazardsReversed,
    /// Hazard left the arena and was put back
    HazardEscaped { id: BodyId },
    ArenaResized { width: f32, height: f32 },
}

/// Render-facing view of one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: BodyId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    pub outline: Color,
}

/// Everything the presentation layer needs to draw a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub level: u32,
    pub hazard_speed: f32,
    pub arena_width: f32,
    pub arena_height: f32,
    pub player: Option<EntityView>,
    pub target: Option<EntityView>,
    pub hazards: Vec<EntityView>,
}
