//! Frame ordering and collaborator wiring, observed through the physics seam.

use planet_client::input::ScriptedInput;
use planet_shared::config::WorldConfig;
use planet_shared::input::Actions;
use planet_shared::math::Vec3;
use planet_shared::physics::{BodyDesc, PhysicsBackend, Shape};
use planet_tests::{
    default_loop, init_tracing, loop_with, player_state, recording_loop, run, start_camera_forward,
    PhysicsCall,
};

#[test]
fn one_frame_pushes_forces_then_steps_once() -> anyhow::Result<()> {
    init_tracing();
    let script = ScriptedInput::new(start_camera_forward())
        .idle(240)
        .hold(Actions::MOVE_FORWARD | Actions::JUMP, 1);
    let mut fl = recording_loop(script);
    run(&mut fl, 240)?;
    fl.physics_mut().calls.clear();

    let report = fl.advance(planet_tests::DT)?;
    assert!(report.jumped);

    let physics = fl.physics();
    let scene = fl.scene();
    let calls = &physics.calls;

    let steps = calls
        .iter()
        .filter(|c| matches!(c, PhysicsCall::Step { .. }))
        .count();
    assert_eq!(steps, 1);
    assert!(matches!(calls.last(), Some(PhysicsCall::Step { .. })));

    let impulse_at = calls
        .iter()
        .position(|c| matches!(c, PhysicsCall::Impulse { handle, .. } if *handle == scene.player));
    assert!(impulse_at.is_some_and(|i| i + 1 < calls.len()));

    // Movement force, then gravity.
    let on_player = physics.forces_on(scene.player);
    assert_eq!(on_player.len(), 2);
    assert!((on_player[0].length() - 35.0).abs() < 1e-3);
    assert!(on_player[1].dot(player_state(&fl)?.position) < 0.0);
    Ok(())
}

#[test]
fn planet_is_never_pulled_by_its_own_gravity() -> anyhow::Result<()> {
    let mut fl = recording_loop(ScriptedInput::new(start_camera_forward()));
    run(&mut fl, 10)?;

    let physics = fl.physics();
    let scene = fl.scene();
    assert!(physics.forces_on(scene.planet_body).is_empty());
    for &other in &scene.others {
        assert_eq!(physics.forces_on(other).len(), 10);
    }
    // The hoop is static: it is visited, but has no mass to pull on.
    let hoop = physics.forces_on(scene.hoop);
    assert_eq!(hoop.len(), 10);
    assert!(hoop.iter().all(|f| *f == Vec3::ZERO));
    assert_eq!(physics.body_state(scene.planet_body)?.position, Vec3::ZERO);
    Ok(())
}

#[test]
fn other_players_fall_onto_the_planet() -> anyhow::Result<()> {
    let mut fl = default_loop(ScriptedInput::new(start_camera_forward()));
    run(&mut fl, 240)?;
    for &other in &fl.scene().others {
        let altitude = fl.physics().body_state(other)?.position.length();
        assert!((altitude - 5.25).abs() < 0.05, "other player at altitude {altitude}");
    }
    Ok(())
}

#[test]
fn hoop_reports_only_labelled_visitors() -> anyhow::Result<()> {
    init_tracing();
    let mut fl = default_loop(ScriptedInput::new(start_camera_forward()));
    let hoop = fl.physics().body_state(fl.scene().hoop)?.position;

    let visitor = fl.physics_mut().add_body(
        BodyDesc::new(1.0, Shape::Sphere { radius: 0.3 })
            .at(hoop)
            .labelled("visitor"),
    );
    fl.physics_mut().add_body(
        BodyDesc::new(1.0, Shape::Sphere { radius: 0.3 }).at(hoop + Vec3::new(0.7, 0.0, 0.0)),
    );

    let report = fl.advance(planet_tests::DT)?;
    assert!(!report.hoop_hits.is_empty());
    assert!(report.hoop_hits.iter().all(|label| label == "visitor"));

    // The hoop is a sensor: the visitor is not pushed out.
    assert_eq!(fl.physics().body_state(visitor)?.position, hoop);
    Ok(())
}

#[test]
fn config_overrides_reach_the_scene() -> anyhow::Result<()> {
    let cfg = WorldConfig::from_json_str(r#"{ "planet_radius": 8.0, "player_jump_force": 40.0 }"#)?;
    let fl = loop_with(cfg, ScriptedInput::new(start_camera_forward()));

    assert_eq!(player_state(&fl)?.position, Vec3::new(0.0, 11.0, 0.0));
    assert_eq!(fl.scene().planet.radius, 8.0);
    assert_eq!(fl.controller().jump_force, 40.0);
    let hoop = fl.physics().body_state(fl.scene().hoop)?.position;
    assert_eq!(hoop, Vec3::new(0.0, 0.0, -11.0));
    Ok(())
}
