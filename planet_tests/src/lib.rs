//! `planet_tests`
//!
//! Helpers shared by the integration tests: a ready-made frame loop on the
//! reference engine, a physics wrapper that records every call made through
//! the backend seam, and a few run/settle shortcuts.

use anyhow::{bail, Context};
use planet_client::camera::OrbitCamera;
use planet_client::input::ScriptedInput;
use planet_client::{FrameLoop, FrameReport};
use planet_shared::config::WorldConfig;
use planet_shared::event::EventBus;
use planet_shared::math::Vec3;
use planet_shared::physics::{
    BodyDesc, BodyHandle, DynamicBodyState, PhysicsBackend, PhysicsError, StepReport,
};
use planet_shared::render::RecordingRenderer;
use planet_shared::sphere_world::SphereWorld;
use tracing::debug;

pub const DT: f32 = 1.0 / 60.0;

pub type TestLoop<P = SphereWorld> = FrameLoop<P, ScriptedInput, RecordingRenderer>;

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Camera forward from the default start position, looking at the planet.
pub fn start_camera_forward() -> Vec3 {
    OrbitCamera::from_eye(WorldConfig::default().camera_start_pos).forward()
}

pub fn loop_with(cfg: WorldConfig, script: ScriptedInput) -> TestLoop {
    let physics = SphereWorld::from_config(&cfg);
    FrameLoop::new(cfg, physics, script, RecordingRenderer::default())
}

pub fn default_loop(script: ScriptedInput) -> TestLoop {
    loop_with(WorldConfig::default(), script)
}

/// Advances `frames` frames of `DT` each.
pub fn run<P: PhysicsBackend>(fl: &mut TestLoop<P>, frames: u32) -> anyhow::Result<Vec<FrameReport>> {
    (0..frames)
        .map(|_| fl.advance(DT).context("advance"))
        .collect()
}

/// Advances until the player has touched down, failing after `max_frames`.
pub fn settle<P: PhysicsBackend>(fl: &mut TestLoop<P>, max_frames: u32) -> anyhow::Result<u32> {
    for frame in 0..max_frames {
        let report = fl.advance(DT)?;
        if report.player_contacts > 0 {
            debug!(frame, "player touched down");
            return Ok(frame);
        }
    }
    bail!("player still airborne after {max_frames} frames")
}

pub fn player_state<P: PhysicsBackend>(fl: &TestLoop<P>) -> anyhow::Result<DynamicBodyState> {
    fl.physics()
        .body_state(fl.scene().player)
        .context("player state")
}

/// One call made through the physics seam.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsCall {
    Force { handle: BodyHandle, force: Vec3 },
    Impulse { handle: BodyHandle, impulse: Vec3 },
    Step { real_dt: f32, report: StepReport },
}

/// Forwards to an inner backend and logs forces, impulses and steps.
#[derive(Default)]
pub struct RecordingPhysics<P> {
    pub inner: P,
    pub calls: Vec<PhysicsCall>,
}

impl<P: PhysicsBackend> RecordingPhysics<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            calls: Vec::new(),
        }
    }

    /// Forces recorded for `handle`, in call order.
    pub fn forces_on(&self, handle: BodyHandle) -> Vec<Vec3> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PhysicsCall::Force { handle: h, force } if *h == handle => Some(*force),
                _ => None,
            })
            .collect()
    }
}

impl<P: PhysicsBackend> PhysicsBackend for RecordingPhysics<P> {
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
        self.inner.add_body(desc)
    }

    fn body_state(&self, handle: BodyHandle) -> Result<DynamicBodyState, PhysicsError> {
        self.inner.body_state(handle)
    }

    fn label(&self, handle: BodyHandle) -> Option<&str> {
        self.inner.label(handle)
    }

    fn apply_force(
        &mut self,
        handle: BodyHandle,
        force: Vec3,
        at_point: Vec3,
    ) -> Result<(), PhysicsError> {
        self.inner.apply_force(handle, force, at_point)?;
        self.calls.push(PhysicsCall::Force { handle, force });
        Ok(())
    }

    fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec3) -> Result<(), PhysicsError> {
        self.inner.apply_impulse(handle, impulse)?;
        self.calls.push(PhysicsCall::Impulse { handle, impulse });
        Ok(())
    }

    fn step(
        &mut self,
        fixed_dt: f32,
        real_dt: f32,
        max_sub_steps: u32,
        events: &mut EventBus,
    ) -> StepReport {
        let report = self.inner.step(fixed_dt, real_dt, max_sub_steps, events);
        self.calls.push(PhysicsCall::Step { real_dt, report });
        report
    }
}

/// Frame loop over a recording wrapper around the reference engine.
pub fn recording_loop(script: ScriptedInput) -> TestLoop<RecordingPhysics<SphereWorld>> {
    let cfg = WorldConfig::default();
    let physics = RecordingPhysics::new(SphereWorld::from_config(&cfg));
    FrameLoop::new(cfg, physics, script, RecordingRenderer::default())
}
