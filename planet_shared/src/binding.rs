//! Physics to visual synchronization.
//!
//! Each scene object pairs a physics body with a visual. After the physics
//! step, [`PhysicsVisualBinding::update`] copies the body's pose onto the
//! visual; nothing flows the other way.

use crate::physics::{BodyHandle, PhysicsBackend, PhysicsError};
use crate::render::VisualTransform;

/// One body/visual pair.
#[derive(Debug, Clone)]
pub struct PhysicsVisualBinding<T: VisualTransform> {
    handle: BodyHandle,
    visual: T,
    exempt_from_gravity: bool,
}

impl<T: VisualTransform> PhysicsVisualBinding<T> {
    pub fn new(handle: BodyHandle, visual: T) -> Self {
        Self {
            handle,
            visual,
            exempt_from_gravity: false,
        }
    }

    /// Marks the binding as not attracted by the planet (the planet itself).
    pub fn exempt_from_gravity(mut self) -> Self {
        self.exempt_from_gravity = true;
        self
    }

    pub fn handle(&self) -> BodyHandle {
        self.handle
    }

    pub fn is_exempt_from_gravity(&self) -> bool {
        self.exempt_from_gravity
    }

    pub fn visual(&self) -> &T {
        &self.visual
    }

    /// Copies the engine's current position and orientation onto the visual.
    pub fn update(&mut self, physics: &dyn PhysicsBackend) -> Result<(), PhysicsError> {
        let state = physics.body_state(self.handle)?;
        self.visual.set_position(state.position);
        self.visual.set_orientation(state.orientation);
        Ok(())
    }
}
