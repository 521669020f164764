//! Standalone headless client.
//!
//! Usage:
//!   cargo run -p planet_client -- [--config world.json] [--frames 600]
//!
//! Assembles the planet scene on the reference physics engine, drives the
//! player with a short scripted walk-and-jump, paces frames at the fixed
//! physics rate and logs where the player ends up.

use std::env;
use std::time::{Duration, Instant};

use anyhow::Context;
use planet_client::camera::OrbitCamera;
use planet_client::input::ScriptedInput;
use planet_client::FrameLoop;
use planet_shared::config::WorldConfig;
use planet_shared::input::Actions;
use planet_shared::math::Vec3;
use planet_shared::physics::PhysicsBackend;
use planet_shared::render::NullRenderer;
use planet_shared::sphere_world::SphereWorld;
use tracing::info;

struct Args {
    config_path: Option<String>,
    frames: u64,
}

fn parse_args() -> Args {
    let mut parsed = Args {
        config_path: None,
        frames: 600,
    };
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                parsed.config_path = Some(args[i + 1].clone());
                i += 2;
            }
            "--frames" if i + 1 < args.len() => {
                if let Ok(n) = args[i + 1].parse() {
                    parsed.frames = n;
                }
                i += 2;
            }
            _ => i += 1,
        }
    }
    parsed
}

fn load_config(path: Option<&str>) -> anyhow::Result<WorldConfig> {
    let Some(path) = path else {
        return Ok(WorldConfig::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("read config {path}"))?;
    WorldConfig::from_json_str(&text).with_context(|| format!("parse config {path}"))
}

/// Settle, walk forward, hop, strafe, then idle.
fn demo_script(camera_forward: Vec3) -> ScriptedInput {
    ScriptedInput::new(camera_forward)
        .idle(90)
        .hold(Actions::MOVE_FORWARD, 120)
        .hold(Actions::MOVE_FORWARD | Actions::JUMP, 1)
        .hold(Actions::MOVE_FORWARD, 60)
        .hold(Actions::MOVE_RIGHT, 90)
        .idle(60)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = parse_args();
    let cfg = load_config(args.config_path.as_deref())?;
    info!(
        frames = args.frames,
        radius = cfg.planet_radius,
        time_step = cfg.time_step,
        "Starting client"
    );

    let camera = OrbitCamera::from_eye(cfg.camera_start_pos);
    let frame_interval = Duration::from_secs_f32(cfg.time_step);
    let physics = SphereWorld::from_config(&cfg);
    let mut frame_loop = FrameLoop::new(cfg, physics, demo_script(camera.forward()), NullRenderer);

    let start = Instant::now();
    let mut next = tokio::time::Instant::now();
    let mut jumps = 0u32;
    for _ in 0..args.frames {
        let report = frame_loop
            .tick(start.elapsed().as_secs_f64())
            .context("frame")?;
        if report.jumped {
            jumps += 1;
        }
        if report.frame % 60 == 0 {
            let player = frame_loop
                .physics()
                .body_state(frame_loop.scene().player)
                .context("player state")?;
            info!(
                frame = report.frame,
                position = ?player.position,
                altitude = player.position.length(),
                grounded = ?report.grounded,
                "Player"
            );
        }

        next += frame_interval;
        tokio::time::sleep_until(next).await;
    }

    info!(frames = frame_loop.frame(), jumps, "Client finished");
    Ok(())
}
