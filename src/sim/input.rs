//! Keyboard to game command mapping
//!
//! Only the mapping lives here; wiring to an actual event source is the
//! host's job.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::GamePhase;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Space,
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    /// Legacy DOM `keyCode` values
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            32 => Some(Key::Space),
            37 => Some(Key::Left),
            38 => Some(Key::Up),
            39 => Some(Key::Right),
            40 => Some(Key::Down),
            _ => None,
        }
    }

    /// DOM `KeyboardEvent.key` / `code` names
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            " " | "Space" | "Spacebar" => Some(Key::Space),
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowRight" | "Right" => Some(Key::Right),
            "ArrowUp" | "Up" => Some(Key::Up),
            "ArrowDown" | "Down" => Some(Key::Down),
            _ => None,
        }
    }

    /// Unit push direction in screen coordinates (y grows downward)
    pub fn direction(self) -> Option<Vec2> {
        match self {
            Key::Left => Some(Vec2::NEG_X),
            Key::Right => Some(Vec2::X),
            Key::Up => Some(Vec2::NEG_Y),
            Key::Down => Some(Vec2::Y),
            Key::Space => None,
        }
    }
}

/// Global hazard side effect of a movement key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Escalation {
    /// Horizontal keys flip every hazard's direction
    Reverse,
    /// Vertical keys speed every hazard up
    SpeedUp,
}

/// What a key press means in the current phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Restart,
    Resume,
    Push { force: Vec2, escalation: Escalation },
    Ignore,
}

/// Map a key press to a command given the current phase and push strength
pub fn command_for(key: Key, phase: GamePhase, player_force: f32) -> Command {
    match (key, phase) {
        (Key::Space, GamePhase::NotStarted) => Command::Start,
        (Key::Space, GamePhase::GameOver) => Command::Restart,
        (Key::Space, GamePhase::LevelComplete) => Command::Resume,
        (Key::Space, GamePhase::Playing) => Command::Ignore,
        (Key::Left | Key::Right, GamePhase::Playing) => Command::Push {
            force: key.direction().unwrap_or(Vec2::ZERO) * player_force,
            escalation: Escalation::Reverse,
        },
        (Key::Up | Key::Down, GamePhase::Playing) => Command::Push {
            force: key.direction().unwrap_or(Vec2::ZERO) * player_force,
            escalation: Escalation::SpeedUp,
        },
        (_, _) => Command::Ignore,
    }
}
