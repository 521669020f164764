//! `planet_client`
//!
//! Client-side systems:
//! - Scene assembly (planet, player, other players, hoop trigger)
//! - Orbit camera and input sources (keyboard, scripted)
//! - The per-frame loop that ties input, locomotion, gravity, physics and
//!   rendering together

pub mod camera;
pub mod frame_loop;
pub mod input;
pub mod scene;

pub use frame_loop::{FrameLoop, FrameReport};
pub use scene::Scene;
