//! Surface-relative locomotion.
//!
//! Turns held actions into a movement force along the tangent plane and,
//! when the jump gate allows it, a one-shot impulse along local up. The
//! force has to be re-applied every frame to persist; the impulse is applied
//! exactly once.

use tracing::debug;

use crate::config::WorldConfig;
use crate::grounded::GroundedStateMachine;
use crate::input::{Actions, InputFrame};
use crate::math::Vec3;
use crate::physics::DynamicBodyState;
use crate::surface::SurfaceBasis;

/// Result of one controller evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionOutput {
    /// Continuous movement force for this frame.
    pub force: Vec3,
    /// Jump impulse, present at most once per grounded period.
    pub impulse: Option<Vec3>,
    pub basis: SurfaceBasis,
}

/// Per-avatar controller. Owns the jump gate.
#[derive(Debug, Clone)]
pub struct LocomotionController {
    pub move_force: f32,
    pub jump_force: f32,
    grounded: GroundedStateMachine,
}

impl LocomotionController {
    pub fn new(move_force: f32, jump_force: f32) -> Self {
        Self {
            move_force,
            jump_force,
            grounded: GroundedStateMachine::new(),
        }
    }

    pub fn from_config(cfg: &WorldConfig) -> Self {
        Self::new(cfg.player_move_force, cfg.player_jump_force)
    }

    pub fn grounded(&self) -> &GroundedStateMachine {
        &self.grounded
    }

    /// Forwards a contact notification for the controlled body.
    pub fn on_contact(&mut self) {
        self.grounded.on_contact();
    }

    /// Evaluates one frame of input for `body`.
    pub fn tick(&mut self, body: &DynamicBodyState, input: &InputFrame) -> LocomotionOutput {
        let basis = SurfaceBasis::compute(body.position, input.camera_forward);
        let actions = input.actions;

        let force = if actions.any_movement() {
            self.movement_force(&basis, actions)
        } else {
            Vec3::ZERO
        };

        let impulse = if actions.contains(Actions::JUMP) && self.grounded.try_consume_jump() {
            debug!(handle = ?body.handle, "jump");
            Some(basis.up * self.jump_force)
        } else {
            None
        };

        LocomotionOutput {
            force,
            impulse,
            basis,
        }
    }

    fn movement_force(&self, basis: &SurfaceBasis, actions: Actions) -> Vec3 {
        let mut move_dir = Vec3::ZERO;
        if actions.contains(Actions::MOVE_FORWARD) {
            move_dir += basis.forward;
        }
        if actions.contains(Actions::MOVE_BACK) {
            move_dir -= basis.forward;
        }
        if actions.contains(Actions::MOVE_LEFT) {
            move_dir -= basis.right;
        }
        if actions.contains(Actions::MOVE_RIGHT) {
            move_dir += basis.right;
        }

        // Opposing keys cancel out to an exact zero.
        if move_dir.length_squared() > 0.0 {
            move_dir.normalize() * self.move_force
        } else {
            Vec3::ZERO
        }
    }
}
