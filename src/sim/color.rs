//! Entity colors
//!
//! Hazards cycle through a fixed "disco" palette; player and target colors
//! are reserved and never handed to a hazard.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::random::RandomSource;

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn b(self) -> u8 {
        self.0 as u8
    }

    /// Darken every channel by `amount` (saturating)
    pub fn darker(self, amount: u8) -> Self {
        Self::rgb(
            self.r().saturating_sub(amount),
            self.g().saturating_sub(amount),
            self.b().saturating_sub(amount),
        )
    }

    /// Stroke color drawn around a body filled with this color
    pub fn outline(self) -> Self {
        self.darker(OUTLINE_DARKEN)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0x00ff_ffff)
    }
}

pub const PLAYER_COLOR: Color = Color(0x4da6ff);
pub const TARGET_COLOR: Color = Color(0x66ff66);
/// Burst color when the player is hit
pub const HIT_COLOR: Color = Color(0xff4d4d);
/// Per-channel darkening from fill to outline
pub const OUTLINE_DARKEN: u8 = 50;

pub const DISCO_PALETTE: [Color; 16] = [
    Color(0xff00ff), // magenta
    Color(0x00ffff), // cyan
    Color(0xffff00), // yellow
    Color(0xff00cc), // hot pink
    Color(0x00ff00), // lime
    Color(0xff6600), // orange
    Color(0x9900ff), // purple
    Color(0x00ccff), // sky blue
    Color(0xff3399), // rose
    Color(0xccff00), // chartreuse
    Color(0xff99cc), // pink
    Color(0x33ccff), // light blue
    Color(0xffcc00), // gold
    Color(0xcc00ff), // violet
    Color(0x00ff99), // spring green
    Color(0xff3300), // red-orange
];

/// Pick a palette color that is neither the player's nor the target's
pub fn random_disco_color<R: RandomSource + ?Sized>(rng: &mut R) -> Color {
    loop {
        let color = DISCO_PALETTE[rng.pick_index(DISCO_PALETTE.len())];
        if color != PLAYER_COLOR && color != TARGET_COLOR {
            return color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_darker_saturates() {
        let c = Color(0xff3010).darker(50);
        assert_eq!(c, Color::rgb(0xcd, 0x00, 0x00));
    }

    #[test]
    fn test_outline_of_palette() {
        assert_eq!(PLAYER_COLOR.outline(), Color(0x1b74cd));
        assert_eq!(Color(0xff00ff).outline(), Color(0xcd00cd));
    }

    #[test]
    fn test_hex_display() {
        assert_eq!(PLAYER_COLOR.to_string(), "#4da6ff");
        assert_eq!(Color(0x0000ff).to_string(), "#0000ff");
    }

    #[test]
    fn test_random_color_never_reserved() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..500 {
            let c = random_disco_color(&mut rng);
            assert!(DISCO_PALETTE.contains(&c));
            assert_ne!(c, PLAYER_COLOR);
            assert_ne!(c, TARGET_COLOR);
        }
    }
}
