//! Rendering abstraction.
//!
//! This crate does not depend on a graphics backend. Visual objects only
//! need to accept a position and an orientation; the renderer is told what
//! to draw once per frame.

use crate::math::{Quat, Vec3};

/// Something in the scene graph whose pose follows a physics body.
pub trait VisualTransform {
    fn set_position(&mut self, position: Vec3);
    fn set_orientation(&mut self, orientation: Quat);
}

/// Plain in-memory pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl VisualTransform for Transform {
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
    }
}

/// A minimal rendering API.
pub trait RenderBackend: Send + Sync {
    fn begin_frame(&mut self);
    fn draw(&mut self, transform: &Transform);
    fn end_frame(&mut self);
}

/// A no-op renderer useful for headless tests.
#[derive(Default)]
pub struct NullRenderer;

impl RenderBackend for NullRenderer {
    fn begin_frame(&mut self) {}
    fn draw(&mut self, _transform: &Transform) {}
    fn end_frame(&mut self) {}
}

/// Renderer that records what it was asked to draw.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: u64,
    /// Transforms drawn during the last completed frame.
    pub last_frame: Vec<Transform>,
    pending: Vec<Transform>,
}

impl RenderBackend for RecordingRenderer {
    fn begin_frame(&mut self) {
        self.pending.clear();
    }

    fn draw(&mut self, transform: &Transform) {
        self.pending.push(*transform);
    }

    fn end_frame(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames += 1;
    }
}
