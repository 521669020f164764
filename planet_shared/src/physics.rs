//! Physics abstraction.
//!
//! The rigid-body engine is a collaborator behind [`PhysicsBackend`]. The
//! core reads body state from it and writes only through forces and
//! impulses; it never moves a body directly.

use thiserror::Error;

use crate::event::EventBus;
use crate::math::{Quat, Vec3};

/// Opaque handle to a body owned by the physics engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct BodyHandle(pub u32);

/// Collision shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    /// Oriented box given by its half extents in body space.
    Box { half_extents: Vec3 },
}

impl Shape {
    /// Radius of the smallest sphere around the shape.
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Shape::Sphere { radius } => radius,
            Shape::Box { half_extents } => half_extents.length(),
        }
    }
}

/// Body creation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    /// Zero makes the body static.
    pub mass: f32,
    pub shape: Shape,
    pub position: Vec3,
    pub orientation: Quat,
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Report contacts without resolving them.
    pub sensor: bool,
    /// Optional tag for gameplay lookups.
    pub label: Option<String>,
}

impl BodyDesc {
    pub fn new(mass: f32, shape: Shape) -> Self {
        Self {
            mass,
            shape,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            linear_damping: 0.01,
            angular_damping: 0.01,
            sensor: false,
            label: None,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn oriented(mut self, orientation: Quat) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn damping(mut self, linear: f32, angular: f32) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }

    pub fn sensor(mut self) -> Self {
        self.sensor = true;
        self
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Snapshot of a body as seen by the core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicBodyState {
    pub handle: BodyHandle,
    pub position: Vec3,
    pub orientation: Quat,
    pub velocity: Vec3,
    pub mass: f32,
}

impl Default for DynamicBodyState {
    fn default() -> Self {
        Self {
            handle: BodyHandle::default(),
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            mass: 0.0,
        }
    }
}

/// What one `step` call did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepReport {
    /// Fixed sub-steps actually simulated.
    pub sub_steps: u32,
    /// Elapsed time discarded because the sub-step cap was hit.
    pub dropped_time: f32,
}

/// Physics errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhysicsError {
    #[error("unknown body {0:?}")]
    UnknownBody(BodyHandle),
}

/// Physics engine trait.
pub trait PhysicsBackend: Send + Sync {
    /// Creates a body and returns its handle.
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle;

    /// Current state of a body.
    fn body_state(&self, handle: BodyHandle) -> Result<DynamicBodyState, PhysicsError>;

    /// Label the body was created with, if any.
    fn label(&self, handle: BodyHandle) -> Option<&str>;

    /// Adds a continuous force acting at the world point `at_point`.
    ///
    /// The force stays in effect for every sub-step of the next `step` call
    /// and is cleared when that call returns.
    fn apply_force(
        &mut self,
        handle: BodyHandle,
        force: Vec3,
        at_point: Vec3,
    ) -> Result<(), PhysicsError>;

    /// Instantaneous change of momentum at the center of mass.
    fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec3) -> Result<(), PhysicsError>;

    /// Advances the world by `real_dt` seconds of wall time using fixed
    /// `fixed_dt` sub-steps, at most `max_sub_steps` of them.
    ///
    /// Contacts found along the way are pushed to `events` as
    /// [`CollisionEvent`](crate::event::CollisionEvent)s.
    fn step(
        &mut self,
        fixed_dt: f32,
        real_dt: f32,
        max_sub_steps: u32,
        events: &mut EventBus,
    ) -> StepReport;
}

/// No-op physics.
#[derive(Default)]
pub struct NullPhysics {
    bodies: Vec<DynamicBodyState>,
}

impl PhysicsBackend for NullPhysics {
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len() as u32);
        self.bodies.push(DynamicBodyState {
            handle,
            position: desc.position,
            orientation: desc.orientation,
            velocity: Vec3::ZERO,
            mass: desc.mass,
        });
        handle
    }

    fn body_state(&self, handle: BodyHandle) -> Result<DynamicBodyState, PhysicsError> {
        self.bodies
            .get(handle.0 as usize)
            .copied()
            .ok_or(PhysicsError::UnknownBody(handle))
    }

    fn label(&self, _handle: BodyHandle) -> Option<&str> {
        None
    }

    fn apply_force(
        &mut self,
        handle: BodyHandle,
        _force: Vec3,
        _at_point: Vec3,
    ) -> Result<(), PhysicsError> {
        self.body_state(handle).map(|_| ())
    }

    fn apply_impulse(&mut self, handle: BodyHandle, _impulse: Vec3) -> Result<(), PhysicsError> {
        self.body_state(handle).map(|_| ())
    }

    fn step(
        &mut self,
        _fixed_dt: f32,
        _real_dt: f32,
        _max_sub_steps: u32,
        _events: &mut EventBus,
    ) -> StepReport {
        StepReport::default()
    }
}
