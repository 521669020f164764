//! Central gravity toward the planet.
//!
//! The physics world runs with zero global gravity; every dynamic body gets
//! an inverse-square pull toward the planet center instead, re-applied as a
//! continuous force once per frame.

use crate::config::WorldConfig;
use crate::math::Vec3;
use crate::physics::DynamicBodyState;

/// The planet the avatar walks on. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetState {
    pub center: Vec3,
    pub radius: f32,
    pub mass: f32,
}

impl PlanetState {
    /// A planet centered at the world origin.
    pub fn new(radius: f32, mass: f32) -> Self {
        Self {
            center: Vec3::ZERO,
            radius,
            mass,
        }
    }

    pub fn from_config(cfg: &WorldConfig) -> Self {
        Self::new(cfg.planet_radius, cfg.planet_mass)
    }
}

/// Inverse-square attraction with a tunable constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityField {
    pub constant: f32,
}

impl GravityField {
    pub fn new(constant: f32) -> Self {
        Self { constant }
    }

    pub fn from_config(cfg: &WorldConfig) -> Self {
        Self::new(cfg.gravity_constant)
    }

    /// Force pulling `body` toward `planet`.
    ///
    /// Returns zero when the body's center is inside the planet radius: past
    /// that point the pull is clamped rather than allowed to blow up.
    pub fn compute_force(&self, body: &DynamicBodyState, planet: &PlanetState) -> Vec3 {
        let d = planet.center - body.position;
        let dist_sq = d.length_squared();
        if dist_sq < planet.radius * planet.radius {
            return Vec3::ZERO;
        }

        let magnitude = self.constant * body.mass * planet.mass / dist_sq;
        d.normalize() * magnitude
    }
}
