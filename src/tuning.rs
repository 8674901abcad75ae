//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON file can retune the game
//! without a rebuild. Missing fields fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Bodies ===
    pub player_radius: f32,
    pub target_radius: f32,
    pub hazard_radius: f32,
    pub wall_thickness: f32,

    // === Player ===
    /// Force applied per arrow-key press
    pub player_force: f32,

    // === Hazard speed ===
    /// Speed every hazard starts a level with
    pub initial_hazard_speed: f32,
    /// Applied on every up/down press
    pub hazard_speed_multiplier: f32,
    pub max_hazard_speed: f32,

    // === Placement ===
    pub min_player_target_distance: f32,
    pub min_player_hazard_distance: f32,
    pub min_hazard_hazard_distance: f32,
    /// Keep-out band along the arena edges for spawned entities
    pub placement_margin: f32,
    pub placement_max_attempts: u32,
    /// Distance multiplier applied after a failed round of sampling
    pub placement_relax_factor: f32,
    /// No further relaxation once the distance is at or below this
    pub placement_relax_floor: f32,

    // === Recovery ===
    /// How far outside the arena a hazard may drift before it is recovered
    pub escape_margin: f32,
    /// Keep-out band for recovered hazards
    pub respawn_margin: f32,

    // === Hazard-hazard nudge ===
    pub hazard_impulse_chance: f32,
    pub hazard_impulse_force: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_radius: 20.0,
            target_radius: 30.0,
            hazard_radius: 15.0,
            wall_thickness: 50.0,

            player_force: 0.01,

            initial_hazard_speed: 4.0,
            hazard_speed_multiplier: 1.8,
            max_hazard_speed: 40.0,

            min_player_target_distance: 250.0,
            min_player_hazard_distance: 600.0,
            min_hazard_hazard_distance: 100.0,
            placement_margin: 100.0,
            placement_max_attempts: 200,
            placement_relax_factor: 0.8,
            placement_relax_floor: 100.0,

            escape_margin: 100.0,
            respawn_margin: 50.0,

            hazard_impulse_chance: 0.2,
            hazard_impulse_force: 0.0005,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (partial documents are fine)
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::normalized)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning in {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Repair values that would break the escalation and placement invariants
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.hazard_speed_multiplier >= 1.0) {
            log::warn!(
                "hazard_speed_multiplier {} < 1, using {}",
                self.hazard_speed_multiplier,
                defaults.hazard_speed_multiplier
            );
            self.hazard_speed_multiplier = defaults.hazard_speed_multiplier;
        }
        if !(self.initial_hazard_speed >= 0.0) {
            log::warn!("initial_hazard_speed {} < 0, using 0", self.initial_hazard_speed);
            self.initial_hazard_speed = 0.0;
        }
        if !(self.max_hazard_speed >= self.initial_hazard_speed) {
            log::warn!(
                "max_hazard_speed {} below initial speed, raising to {}",
                self.max_hazard_speed,
                self.initial_hazard_speed
            );
            self.max_hazard_speed = self.initial_hazard_speed;
        }
        if !(self.placement_relax_factor > 0.0 && self.placement_relax_factor < 1.0) {
            log::warn!(
                "placement_relax_factor {} outside (0, 1), using {}",
                self.placement_relax_factor,
                defaults.placement_relax_factor
            );
            self.placement_relax_factor = defaults.placement_relax_factor;
        }
        if self.placement_max_attempts == 0 {
            log::warn!("placement_max_attempts is 0, using 1");
            self.placement_max_attempts = 1;
        }
        if !(0.0..=1.0).contains(&self.hazard_impulse_chance) {
            log::warn!(
                "hazard_impulse_chance {} outside [0, 1], using {}",
                self.hazard_impulse_chance,
                defaults.hazard_impulse_chance
            );
            self.hazard_impulse_chance = defaults.hazard_impulse_chance;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_hazard_speed": 25.0 }"#).unwrap();
        assert_eq!(tuning.max_hazard_speed, 25.0);
        assert_eq!(tuning.initial_hazard_speed, 4.0);
        assert_eq!(tuning.placement_max_attempts, 200);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_normalized_repairs_shrinking_multiplier() {
        let tuning = Tuning::from_json(r#"{ "hazard_speed_multiplier": 0.5 }"#).unwrap();
        assert_eq!(tuning.hazard_speed_multiplier, 1.8);
    }

    #[test]
    fn test_normalized_repairs_cap_and_relaxation() {
        let tuning = Tuning {
            initial_hazard_speed: 50.0,
            max_hazard_speed: 40.0,
            placement_relax_factor: 1.0,
            placement_max_attempts: 0,
            ..Tuning::default()
        }
        .normalized();
        assert_eq!(tuning.max_hazard_speed, 50.0);
        assert_eq!(tuning.placement_relax_factor, 0.8);
        assert_eq!(tuning.placement_max_attempts, 1);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let tuning = Tuning::load(Path::new("/definitely/not/here/tuning.json"));
        assert_eq!(tuning, Tuning::default());
    }
}
