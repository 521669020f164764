//! `planet_shared`
//!
//! Gravity and locomotion core for walking on a small spherical planet.
//!
//! Design goals:
//! - Deterministic and engine-agnostic: physics, rendering and input are
//!   collaborators behind traits.
//! - Clear separation of concerns (gravity, surface frame, jump gate,
//!   locomotion, pose sync).
//! - No `unsafe`.

pub mod binding;
pub mod config;
pub mod event;
pub mod gravity;
pub mod grounded;
pub mod input;
pub mod locomotion;
pub mod math;
pub mod physics;
pub mod render;
pub mod sphere_world;
pub mod surface;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::binding::*;
    pub use crate::config::*;
    pub use crate::event::*;
    pub use crate::gravity::*;
    pub use crate::grounded::*;
    pub use crate::input::*;
    pub use crate::locomotion::*;
    pub use crate::math::*;
    pub use crate::physics::*;
    pub use crate::render::*;
    pub use crate::surface::*;
}
