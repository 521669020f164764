//! Per-frame action input.
//!
//! Raw device capture and debouncing happen elsewhere; the core only sees
//! which logical actions are held this frame and where the camera looks.

use crate::math::Vec3;

bitflags::bitflags! {
    /// Logical actions held during a frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Actions: u8 {
        const MOVE_FORWARD = 1 << 0;
        const MOVE_BACK    = 1 << 1;
        const MOVE_LEFT    = 1 << 2;
        const MOVE_RIGHT   = 1 << 3;
        const JUMP         = 1 << 4;
    }
}

impl Actions {
    /// Looks up an action by its logical name (`moveForward`, `jump`, ...).
    pub fn from_action_name(name: &str) -> Option<Self> {
        match name {
            "moveForward" => Some(Self::MOVE_FORWARD),
            "moveBack" => Some(Self::MOVE_BACK),
            "moveLeft" => Some(Self::MOVE_LEFT),
            "moveRight" => Some(Self::MOVE_RIGHT),
            "jump" => Some(Self::JUMP),
            _ => None,
        }
    }

    /// Any of the four movement actions is held.
    pub fn any_movement(self) -> bool {
        self.intersects(Self::MOVE_FORWARD | Self::MOVE_BACK | Self::MOVE_LEFT | Self::MOVE_RIGHT)
    }
}

/// What the input collaborator hands over once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputFrame {
    pub actions: Actions,
    /// Camera world-forward direction.
    pub camera_forward: Vec3,
}

impl Default for InputFrame {
    fn default() -> Self {
        Self {
            actions: Actions::empty(),
            camera_forward: Vec3::NEG_Z,
        }
    }
}

/// Source of sampled input.
pub trait InputSource {
    /// Samples the held actions and camera direction for the coming frame.
    fn sample(&mut self) -> InputFrame;
}
