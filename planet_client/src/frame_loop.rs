//! Per-frame orchestration.
//!
//! One frame, in order: sample input, run the locomotion controller against
//! the player's current state, apply its force (and impulse, if any), apply
//! planetary gravity to every body that is not exempt, step physics,
//! deliver contacts, copy poses onto visuals, render.
//!
//! Contacts are drained right after the step, so a landing always reaches
//! the jump gate before the next controller evaluation.

use planet_shared::binding::PhysicsVisualBinding;
use planet_shared::config::WorldConfig;
use planet_shared::event::{CollisionEvent, EventBus};
use planet_shared::gravity::GravityField;
use planet_shared::grounded::GroundedState;
use planet_shared::input::InputSource;
use planet_shared::locomotion::LocomotionController;
use planet_shared::math::Vec3;
use planet_shared::physics::{PhysicsBackend, PhysicsError, StepReport};
use planet_shared::render::{RenderBackend, Transform};
use tracing::{debug, info, warn};

use crate::scene::Scene;

/// What happened during one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameReport {
    pub frame: u64,
    /// False for the very first timestamped frame, which has no elapsed time.
    pub simulated: bool,
    pub step: StepReport,
    pub move_force: Vec3,
    pub jumped: bool,
    /// Contact notifications received for the player this frame.
    pub player_contacts: usize,
    /// Labels of bodies seen inside the hoop this frame.
    pub hoop_hits: Vec<String>,
    pub grounded: GroundedState,
}

/// Owns the scene and its collaborators and drives them frame by frame.
pub struct FrameLoop<P, I, R> {
    cfg: WorldConfig,
    gravity: GravityField,
    controller: LocomotionController,
    scene: Scene,
    physics: P,
    input: I,
    renderer: R,
    events: EventBus,
    frame: u64,
    last_time: Option<f64>,
}

impl<P, I, R> FrameLoop<P, I, R>
where
    P: PhysicsBackend,
    I: InputSource,
    R: RenderBackend,
{
    /// Assembles the scene into `physics` and wires up the loop.
    pub fn new(cfg: WorldConfig, mut physics: P, input: I, renderer: R) -> Self {
        let scene = Scene::assemble(&cfg, &mut physics);
        Self {
            gravity: GravityField::from_config(&cfg),
            controller: LocomotionController::from_config(&cfg),
            scene,
            physics,
            input,
            renderer,
            events: EventBus::new(),
            frame: 0,
            last_time: None,
            cfg,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn controller(&self) -> &LocomotionController {
        &self.controller
    }

    /// Frames run so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Visual pose of the player.
    pub fn player_visual(&self) -> Option<&Transform> {
        self.scene
            .binding(self.scene.player)
            .map(PhysicsVisualBinding::visual)
    }

    /// Runs a frame stamped with wall-clock time `now` (seconds).
    ///
    /// The first call only syncs visuals and renders; elapsed time is
    /// measured from it.
    pub fn tick(&mut self, now: f64) -> Result<FrameReport, PhysicsError> {
        let real_dt = self.last_time.map(|last| (now - last).max(0.0) as f32);
        self.last_time = Some(now);
        self.run_frame(real_dt)
    }

    /// Runs a frame with an explicit elapsed time.
    pub fn advance(&mut self, real_dt: f32) -> Result<FrameReport, PhysicsError> {
        self.run_frame(Some(real_dt))
    }

    fn run_frame(&mut self, real_dt: Option<f32>) -> Result<FrameReport, PhysicsError> {
        let mut report = FrameReport {
            frame: self.frame,
            ..Default::default()
        };

        if let Some(dt) = real_dt {
            self.simulate(dt, &mut report)?;
        }

        for binding in &mut self.scene.bindings {
            binding.update(&self.physics)?;
        }

        self.renderer.begin_frame();
        for binding in &self.scene.bindings {
            self.renderer.draw(binding.visual());
        }
        self.renderer.end_frame();

        report.grounded = self.controller.grounded().state();
        self.frame += 1;
        Ok(report)
    }

    fn simulate(&mut self, real_dt: f32, report: &mut FrameReport) -> Result<(), PhysicsError> {
        report.simulated = true;

        let input = self.input.sample();
        let player = self.physics.body_state(self.scene.player)?;
        let out = self.controller.tick(&player, &input);

        if out.force != Vec3::ZERO {
            self.physics
                .apply_force(player.handle, out.force, player.position)?;
        }
        if let Some(impulse) = out.impulse {
            self.physics.apply_impulse(player.handle, impulse)?;
        }
        report.move_force = out.force;
        report.jumped = out.impulse.is_some();

        for binding in &self.scene.bindings {
            if binding.is_exempt_from_gravity() {
                continue;
            }
            let body = self.physics.body_state(binding.handle())?;
            let pull = self.gravity.compute_force(&body, &self.scene.planet);
            self.physics.apply_force(body.handle, pull, body.position)?;
        }

        report.step = self.physics.step(
            self.cfg.time_step,
            real_dt,
            self.cfg.max_sub_steps,
            &mut self.events,
        );
        if report.step.dropped_time > 0.0 {
            warn!(
                frame = self.frame,
                dropped = report.step.dropped_time,
                "simulation fell behind, time dropped"
            );
        }

        for contact in self.events.drain::<CollisionEvent>() {
            if contact.body == self.scene.player {
                self.controller.on_contact();
                report.player_contacts += 1;
            } else if contact.body == self.scene.hoop {
                if let Some(label) = self.physics.label(contact.other) {
                    info!(with = label, "hoop collision");
                    report.hoop_hits.push(label.to_string());
                }
            }
        }

        debug!(
            frame = self.frame,
            sub_steps = report.step.sub_steps,
            contacts = report.player_contacts,
            jumped = report.jumped,
            "frame simulated"
        );
        Ok(())
    }
}
