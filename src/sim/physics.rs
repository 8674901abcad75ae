//! Interface to the rigid-body physics collaborator
//!
//! The game never integrates motion itself. It creates bodies, nudges
//! velocities/positions, and reacts to "collision started" reports coming
//! out of [`PhysicsWorld::step`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{CollisionFilter, EntityKind};

/// Handle to a body owned by a [`PhysicsWorld`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Body geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    /// Axis-aligned rectangle
    Rect { half_extents: Vec2 },
}

/// Everything needed to create a body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDesc {
    pub kind: EntityKind,
    pub shape: Shape,
    pub position: Vec2,
    pub is_static: bool,
    /// Reports contacts without any physical response
    pub is_sensor: bool,
    pub restitution: f32,
    pub friction: f32,
    /// Per-step velocity damping
    pub friction_air: f32,
    pub density: f32,
    pub filter: CollisionFilter,
}

impl BodyDesc {
    /// Dynamic circle with the default filter for `kind`
    pub fn circle(kind: EntityKind, position: Vec2, radius: f32) -> Self {
        Self {
            kind,
            shape: Shape::Circle { radius },
            position,
            is_static: false,
            is_sensor: false,
            restitution: 0.0,
            friction: 0.1,
            friction_air: 0.01,
            density: 0.001,
            filter: kind.filter(),
        }
    }

    /// Static axis-aligned rectangle with the default filter for `kind`
    pub fn rect(kind: EntityKind, center: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            shape: Shape::Rect {
                half_extents: size * 0.5,
            },
            position: center,
            is_static: true,
            is_sensor: false,
            restitution: 0.0,
            friction: 0.1,
            friction_air: 0.0,
            density: 0.001,
            filter: kind.filter(),
        }
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_friction(mut self, friction: f32, friction_air: f32) -> Self {
        self.friction = friction;
        self.friction_air = friction_air;
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }
}

/// A pair of bodies that began touching during a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionStarted {
    pub a: BodyId,
    pub b: BodyId,
    /// First support point of the contact, when the engine provides one
    pub contact: Option<Vec2>,
}

/// The physics engine as seen by the game
///
/// Lookups on removed bodies return `None`; mutations on them are ignored.
pub trait PhysicsWorld {
    fn add_body(&mut self, desc: BodyDesc) -> BodyId;
    fn remove_body(&mut self, id: BodyId);
    fn kind(&self, id: BodyId) -> Option<EntityKind>;
    fn position(&self, id: BodyId) -> Option<Vec2>;
    fn set_position(&mut self, id: BodyId, position: Vec2);
    fn velocity(&self, id: BodyId) -> Option<Vec2>;
    fn set_velocity(&mut self, id: BodyId, velocity: Vec2);
    /// Force applied at the body's center for the next step
    fn apply_force(&mut self, id: BodyId, force: Vec2);
    /// Advance by `dt_ms` milliseconds and report newly started contacts
    fn step(&mut self, dt_ms: f32) -> Vec<CollisionStarted>;
}
