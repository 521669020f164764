//! Orbit camera.
//!
//! Circles a fixed target (the planet center) at a given distance. Mouse
//! drag changes yaw and pitch, the wheel changes distance.

use std::f32::consts::FRAC_PI_2;

use planet_shared::math::{normalize_or, Vec3};

/// Keeps the eye off the poles so the view never lines up with +Y.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    /// Rotation about +Y, radians. Zero puts the eye on +Z.
    pub yaw: f32,
    /// Elevation above the XZ plane, radians.
    pub pitch: f32,
    pub distance: f32,
    pub sensitivity: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitCamera {
    /// Camera at `eye`, looking at the origin.
    pub fn from_eye(eye: Vec3) -> Self {
        let distance = eye.length();
        let (yaw, pitch) = if distance > 0.0 {
            (eye.x.atan2(eye.z), (eye.y / distance).asin())
        } else {
            (0.0, 0.0)
        };
        Self {
            target: Vec3::ZERO,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            distance,
            sensitivity: 0.005,
            min_distance: 1.0,
            max_distance: 200.0,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(cp * sy, sp, cp * cy) * self.distance
    }

    /// Camera world-forward direction.
    pub fn forward(&self) -> Vec3 {
        normalize_or(self.target - self.eye(), Vec3::NEG_Z)
    }

    /// Applies a pointer drag in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * self.sensitivity;
        self.pitch = (self.pitch + dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta).clamp(self.min_distance, self.max_distance);
    }
}
