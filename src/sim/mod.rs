//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Physics behind the [`PhysicsWorld`] trait
//! - No rendering or platform dependencies

pub mod arena;
pub mod color;
pub mod entity;
pub mod game;
pub mod headless;
pub mod input;
pub mod physics;
pub mod placement;
pub mod policy;
pub mod random;
pub mod runner;
pub mod state;

pub use arena::{Arena, WallSpec, wall_layout};
pub use color::{Color, DISCO_PALETTE, HIT_COLOR, PLAYER_COLOR, TARGET_COLOR, random_disco_color};
pub use entity::{CollisionFilter, EntityKind};
pub use game::Game;
pub use headless::HeadlessWorld;
pub use input::{Command, Escalation, Key, command_for};
pub use physics::{BodyDesc, BodyId, CollisionStarted, PhysicsWorld, Shape};
pub use placement::{Obstacle, PlacementRules, find_safe_position};
pub use policy::{Contact, classify};
pub use random::RandomSource;
pub use runner::FixedStepper;
pub use state::{EntityView, GameEvent, GamePhase, Hazard, Session, Snapshot};
