//! Disco Dodge - A physics arcade dodging game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (placement, collision policy, level flow)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use sim::{Game, GameEvent, GamePhase, HeadlessWorld, Key, Snapshot};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz)
    pub const STEP_MS: f32 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the stepper will accept
    pub const MAX_FRAME_MS: f32 = 250.0;

    /// Default playfield size
    pub const DEFAULT_WIDTH: f32 = 1000.0;
    pub const DEFAULT_HEIGHT: f32 = 800.0;
}
