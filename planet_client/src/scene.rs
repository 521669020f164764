//! Scene assembly.
//!
//! Spawns the planet, the local player, a couple of other players and the
//! hoop trigger, and pairs every body with a visual transform.

use planet_shared::binding::PhysicsVisualBinding;
use planet_shared::config::WorldConfig;
use planet_shared::gravity::PlanetState;
use planet_shared::math::{look_at_rotation, Vec3};
use planet_shared::physics::{BodyDesc, BodyHandle, PhysicsBackend, Shape};
use planet_shared::render::Transform;
use tracing::info;

pub const PLAYER_LABEL: &str = "my_player";
pub const HOOP_LABEL: &str = "hoop";

const OTHER_PLAYER_RADIUS: f32 = 0.25;
const OTHER_PLAYERS: [(&str, Vec3); 2] = [
    ("player2", Vec3::new(4.0, 8.0, 2.0)),
    ("player4alex", Vec3::new(-3.0, 9.0, -1.0)),
];
const HOOP_HALF_EXTENTS: Vec3 = Vec3::new(0.9, 1.8, 0.6);

/// Every spawned body and its visual.
#[derive(Debug, Clone)]
pub struct Scene {
    pub planet: PlanetState,
    pub planet_body: BodyHandle,
    pub player: BodyHandle,
    pub others: Vec<BodyHandle>,
    pub hoop: BodyHandle,
    pub bindings: Vec<PhysicsVisualBinding<Transform>>,
}

impl Scene {
    pub fn assemble(cfg: &WorldConfig, physics: &mut dyn PhysicsBackend) -> Self {
        let planet = PlanetState::from_config(cfg);
        let planet_binding = spawn_bound(
            physics,
            BodyDesc::new(
                0.0,
                Shape::Sphere {
                    radius: planet.radius,
                },
            ),
        )
        .exempt_from_gravity();

        let player_binding = spawn_bound(
            physics,
            BodyDesc::new(
                cfg.player_mass,
                Shape::Sphere {
                    radius: cfg.player_size,
                },
            )
            .at(Vec3::new(0.0, planet.radius + 3.0, 0.0))
            .damping(cfg.player_linear_damping, cfg.player_angular_damping)
            .labelled(PLAYER_LABEL),
        );

        let mut scene = Self {
            planet,
            planet_body: planet_binding.handle(),
            player: player_binding.handle(),
            others: Vec::new(),
            hoop: BodyHandle::default(),
            bindings: vec![planet_binding, player_binding],
        };

        for (label, position) in OTHER_PLAYERS {
            scene.spawn_other_player(physics, label, position);
        }

        let hoop_position = Vec3::new(0.0, 0.0, -planet.radius - 3.0);
        let hoop_binding = spawn_bound(
            physics,
            BodyDesc::new(
                0.0,
                Shape::Box {
                    half_extents: HOOP_HALF_EXTENTS,
                },
            )
            .at(hoop_position)
            .oriented(look_at_rotation(
                hoop_position,
                Vec3::new(0.0, 180.0, 0.0),
                Vec3::Y,
            ))
            .sensor()
            .labelled(HOOP_LABEL),
        );
        scene.hoop = hoop_binding.handle();
        scene.bindings.push(hoop_binding);

        info!(
            bodies = scene.bindings.len(),
            radius = planet.radius,
            "scene assembled"
        );
        scene
    }

    /// Adds a small labelled ball that is pulled by the planet but not
    /// controlled.
    pub fn spawn_other_player(
        &mut self,
        physics: &mut dyn PhysicsBackend,
        label: &str,
        position: Vec3,
    ) -> BodyHandle {
        let binding = spawn_bound(
            physics,
            BodyDesc::new(
                1.0,
                Shape::Sphere {
                    radius: OTHER_PLAYER_RADIUS,
                },
            )
            .at(position)
            .damping(0.1, 0.5)
            .labelled(label),
        );
        let handle = binding.handle();
        self.others.push(handle);
        self.bindings.push(binding);
        handle
    }

    pub fn binding(&self, handle: BodyHandle) -> Option<&PhysicsVisualBinding<Transform>> {
        self.bindings.iter().find(|b| b.handle() == handle)
    }
}

/// Adds `desc` to the engine, with its visual already at the spawn pose.
fn spawn_bound(
    physics: &mut dyn PhysicsBackend,
    desc: BodyDesc,
) -> PhysicsVisualBinding<Transform> {
    let visual = Transform {
        position: desc.position,
        orientation: desc.orientation,
    };
    PhysicsVisualBinding::new(physics.add_body(desc), visual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planet_shared::math::Quat;
    use planet_shared::sphere_world::SphereWorld;

    #[test]
    fn assembles_all_objects_with_one_binding_each() {
        let cfg = WorldConfig::default();
        let mut world = SphereWorld::from_config(&cfg);
        let scene = Scene::assemble(&cfg, &mut world);

        assert_eq!(scene.bindings.len(), 5);
        assert_eq!(world.body_count(), 5);
        assert_eq!(scene.others.len(), 2);

        let exempt: Vec<_> = scene
            .bindings
            .iter()
            .filter(|b| b.is_exempt_from_gravity())
            .map(|b| b.handle())
            .collect();
        assert_eq!(exempt, vec![scene.planet_body]);
    }

    #[test]
    fn bodies_start_where_expected() {
        let cfg = WorldConfig::default();
        let mut world = SphereWorld::from_config(&cfg);
        let scene = Scene::assemble(&cfg, &mut world);

        let player = world.body_state(scene.player).unwrap();
        assert_eq!(player.position, Vec3::new(0.0, 8.0, 0.0));
        assert_eq!(player.mass, 1.0);
        assert_eq!(world.label(scene.player), Some(PLAYER_LABEL));

        let hoop = world.body_state(scene.hoop).unwrap();
        assert_eq!(hoop.position, Vec3::new(0.0, 0.0, -8.0));
        assert_eq!(hoop.mass, 0.0);

        let labels: Vec<_> = scene.others.iter().map(|&h| world.label(h)).collect();
        assert_eq!(labels, vec![Some("player2"), Some("player4alex")]);
    }

    #[test]
    fn hoop_local_z_points_away_from_look_target() {
        let cfg = WorldConfig::default();
        let mut world = SphereWorld::from_config(&cfg);
        let scene = Scene::assemble(&cfg, &mut world);
        let hoop = world.body_state(scene.hoop).unwrap();

        let expected = (hoop.position - Vec3::new(0.0, 180.0, 0.0)).normalize();
        assert!((hoop.orientation * Vec3::Z).abs_diff_eq(expected, 1e-4));
        assert!((hoop.orientation * Vec3::X).abs_diff_eq(Vec3::NEG_X, 1e-4));
    }

    #[test]
    fn visuals_start_at_spawn_pose() {
        let cfg = WorldConfig::default();
        let mut world = SphereWorld::from_config(&cfg);
        let mut scene = Scene::assemble(&cfg, &mut world);
        let late = scene.spawn_other_player(&mut world, "late", Vec3::new(1.0, 7.0, 0.0));

        for binding in &scene.bindings {
            let body = world.body_state(binding.handle()).unwrap();
            assert_eq!(binding.visual().position, body.position);
            assert_eq!(binding.visual().orientation, body.orientation);
        }

        let player = scene.binding(scene.player).unwrap().visual();
        assert_eq!(player.position, Vec3::new(0.0, 8.0, 0.0));
        let hoop = scene.binding(scene.hoop).unwrap().visual();
        assert_ne!(hoop.orientation, Quat::IDENTITY);
        assert_eq!(
            scene.binding(late).unwrap().visual().position,
            Vec3::new(1.0, 7.0, 0.0)
        );
    }
}
