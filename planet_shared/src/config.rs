//! Configuration system.
//!
//! Loads world tuning from JSON strings (file IO left to app). Every field
//! has a default, so a partial document only overrides what it names.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::math::Vec3;

/// Root tuning table for the planet, the player and the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Gameplay gravity constant (not the physical one).
    pub gravity_constant: f32,
    pub planet_mass: f32,
    pub planet_radius: f32,
    /// Initial orbit-camera eye position.
    pub camera_start_pos: Vec3,
    /// Magnitude of the continuous movement force.
    pub player_move_force: f32,
    /// Magnitude of the one-shot jump impulse.
    pub player_jump_force: f32,
    pub player_mass: f32,
    /// Player sphere radius.
    pub player_size: f32,
    pub player_linear_damping: f32,
    pub player_angular_damping: f32,
    /// Fixed physics sub-step, seconds.
    pub time_step: f32,
    /// Cap on fixed sub-steps per frame.
    pub max_sub_steps: u32,
    pub friction: f32,
    pub restitution: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity_constant: 6.674e-2,
            planet_mass: 50_000.0,
            planet_radius: 5.0,
            camera_start_pos: Vec3::new(0.0, 15.0, 25.0),
            player_move_force: 35.0,
            player_jump_force: 25.0,
            player_mass: 1.0,
            player_size: 0.4,
            player_linear_damping: 0.5,
            player_angular_damping: 0.5,
            time_step: 1.0 / 60.0,
            max_sub_steps: 10,
            friction: 0.4,
            restitution: 0.0,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must be > 0 (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be within [0, 1] (got {value})")]
    OutOfUnitRange { field: &'static str, value: f32 },

    #[error("max_sub_steps must be at least 1")]
    NoSubSteps,
}

impl WorldConfig {
    /// Parses config from JSON and validates it.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks the invariants the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("gravity_constant", self.gravity_constant),
            ("planet_mass", self.planet_mass),
            ("planet_radius", self.planet_radius),
            ("player_mass", self.player_mass),
            ("player_size", self.player_size),
            ("time_step", self.time_step),
        ];
        for (field, value) in positive {
            // `!(v > 0)` also rejects NaN.
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let unit = [
            ("player_linear_damping", self.player_linear_damping),
            ("player_angular_damping", self.player_angular_damping),
            ("friction", self.friction),
            ("restitution", self.restitution),
        ];
        for (field, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfUnitRange { field, value });
            }
        }

        if self.max_sub_steps == 0 {
            return Err(ConfigError::NoSubSteps);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        WorldConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let cfg = WorldConfig::from_json_str(r#"{ "planet_radius": 8.0, "max_sub_steps": 4 }"#)
            .unwrap();
        assert_eq!(cfg.planet_radius, 8.0);
        assert_eq!(cfg.max_sub_steps, 4);
        assert_eq!(cfg.planet_mass, 50_000.0);
        assert_eq!(cfg.camera_start_pos, Vec3::new(0.0, 15.0, 25.0));
    }

    #[test]
    fn rejects_non_positive_radius() {
        let err = WorldConfig::from_json_str(r#"{ "planet_radius": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotPositive {
                field: "planet_radius",
                ..
            }
        ));
    }

    #[test]
    fn rejects_zero_sub_steps() {
        let err = WorldConfig::from_json_str(r#"{ "max_sub_steps": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoSubSteps));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = WorldConfig::from_json_str("{ planet_radius: }").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
