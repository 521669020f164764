//! Reference rigid-body engine.
//!
//! A small impulse-based world that is good enough to drive the planet core
//! headless: spheres and oriented boxes, static bodies (mass 0), sensors,
//! linear/angular damping, friction and restitution. No global gravity, no
//! sleeping, no box-box contacts.
//!
//! Each sub-step integrates first (semi-implicit Euler) and then finds and
//! resolves contacts, so a body that was just launched off the ground does
//! not report the contact it is leaving.

use tracing::debug;

use crate::config::WorldConfig;
use crate::event::{CollisionEvent, EventBus};
use crate::math::{normalize_or, Quat, Vec3};
use crate::physics::{
    BodyDesc, BodyHandle, DynamicBodyState, PhysicsBackend, PhysicsError, Shape, StepReport,
};

struct Body {
    shape: Shape,
    mass: f32,
    inv_mass: f32,
    inv_inertia: f32,
    position: Vec3,
    orientation: Quat,
    velocity: Vec3,
    angular_velocity: Vec3,
    linear_damping: f32,
    angular_damping: f32,
    sensor: bool,
    label: Option<String>,
    force: Vec3,
    torque: Vec3,
}

impl Body {
    fn from_desc(desc: BodyDesc) -> Self {
        let dynamic = desc.mass > 0.0;
        let radius = desc.shape.bounding_radius();
        // Solid-sphere inertia about the bounding radius.
        let inertia = 0.4 * desc.mass * radius * radius;
        Self {
            shape: desc.shape,
            mass: desc.mass.max(0.0),
            inv_mass: if dynamic { 1.0 / desc.mass } else { 0.0 },
            inv_inertia: if dynamic && inertia > 0.0 { 1.0 / inertia } else { 0.0 },
            position: desc.position,
            orientation: desc.orientation,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            linear_damping: desc.linear_damping,
            angular_damping: desc.angular_damping,
            sensor: desc.sensor,
            label: desc.label,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
        }
    }

    fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }
}

/// Penetration between bodies `a` and `b`.
#[derive(Debug, Clone, Copy)]
struct Contact {
    /// Unit normal pointing from `a` toward `b`.
    normal: Vec3,
    depth: f32,
    /// World-space contact point.
    point: Vec3,
}

/// The reference world.
pub struct SphereWorld {
    bodies: Vec<Body>,
    accumulator: f32,
    friction: f32,
    restitution: f32,
}

impl Default for SphereWorld {
    fn default() -> Self {
        Self::new(0.4, 0.0)
    }
}

impl SphereWorld {
    pub fn new(friction: f32, restitution: f32) -> Self {
        Self {
            bodies: Vec::new(),
            accumulator: 0.0,
            friction: friction.max(0.0),
            restitution: restitution.max(0.0),
        }
    }

    pub fn from_config(cfg: &WorldConfig) -> Self {
        Self::new(cfg.friction, cfg.restitution)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Angular velocity of a body, rad/s.
    pub fn angular_velocity(&self, handle: BodyHandle) -> Result<Vec3, PhysicsError> {
        Ok(self.body(handle)?.angular_velocity)
    }

    fn body(&self, handle: BodyHandle) -> Result<&Body, PhysicsError> {
        self.bodies
            .get(handle.0 as usize)
            .ok_or(PhysicsError::UnknownBody(handle))
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body, PhysicsError> {
        self.bodies
            .get_mut(handle.0 as usize)
            .ok_or(PhysicsError::UnknownBody(handle))
    }

    fn internal_step(&mut self, dt: f32, events: &mut EventBus) {
        for body in self.bodies.iter_mut().filter(|b| !b.is_static()) {
            body.velocity += body.force * body.inv_mass * dt;
            body.angular_velocity += body.torque * body.inv_inertia * dt;
            body.velocity *= (1.0 - body.linear_damping).powf(dt);
            body.angular_velocity *= (1.0 - body.angular_damping).powf(dt);

            body.position += body.velocity * dt;
            body.orientation =
                (Quat::from_scaled_axis(body.angular_velocity * dt) * body.orientation).normalize();
        }

        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (a, b) = (&self.bodies[i], &self.bodies[j]);
                if a.is_static() && b.is_static() {
                    continue;
                }
                let Some(contact) = find_contact(a, b) else {
                    continue;
                };

                let (ha, hb) = (BodyHandle(i as u32), BodyHandle(j as u32));
                events.push(CollisionEvent { body: ha, other: hb });
                events.push(CollisionEvent { body: hb, other: ha });

                if !(a.sensor || b.sensor) {
                    self.resolve(i, j, contact);
                }
            }
        }
    }

    fn resolve(&mut self, i: usize, j: usize, c: Contact) {
        let (head, tail) = self.bodies.split_at_mut(j);
        let a = &mut head[i];
        let b = &mut tail[0];

        let inv_mass_sum = a.inv_mass + b.inv_mass;
        if inv_mass_sum == 0.0 {
            return;
        }

        let correction = c.normal * (c.depth / inv_mass_sum);
        a.position -= correction * a.inv_mass;
        b.position += correction * b.inv_mass;

        let ra = c.point - a.position;
        let rb = c.point - b.position;

        let vn = (point_velocity(b, rb) - point_velocity(a, ra)).dot(c.normal);
        if vn >= 0.0 {
            // Already separating.
            return;
        }
        let k = inv_mass_along(a, ra, c.normal) + inv_mass_along(b, rb, c.normal);
        let jn = -(1.0 + self.restitution) * vn / k;
        push_at(a, ra, -c.normal * jn);
        push_at(b, rb, c.normal * jn);

        let rv = point_velocity(b, rb) - point_velocity(a, ra);
        let tangential = rv - c.normal * rv.dot(c.normal);
        if tangential.length_squared() <= 1e-12 {
            return;
        }
        let t = tangential.normalize();
        let max_friction = self.friction * jn;
        let k = inv_mass_along(a, ra, t) + inv_mass_along(b, rb, t);
        let jt = (-rv.dot(t) / k).clamp(-max_friction, max_friction);
        push_at(a, ra, -t * jt);
        push_at(b, rb, t * jt);
    }
}

/// Velocity of the material point at offset `r` from the center.
fn point_velocity(body: &Body, r: Vec3) -> Vec3 {
    body.velocity + body.angular_velocity.cross(r)
}

fn inv_mass_along(body: &Body, r: Vec3, dir: Vec3) -> f32 {
    body.inv_mass + body.inv_inertia * r.cross(dir).length_squared()
}

fn push_at(body: &mut Body, r: Vec3, impulse: Vec3) {
    body.velocity += impulse * body.inv_mass;
    body.angular_velocity += r.cross(impulse) * body.inv_inertia;
}

fn find_contact(a: &Body, b: &Body) -> Option<Contact> {
    match (a.shape, b.shape) {
        (Shape::Sphere { radius: ra }, Shape::Sphere { radius: rb }) => {
            let d = b.position - a.position;
            let dist = d.length();
            if dist > ra + rb {
                return None;
            }
            let normal = normalize_or(d, Vec3::Y);
            Some(Contact {
                normal,
                depth: ra + rb - dist,
                point: a.position + normal * ra,
            })
        }
        (Shape::Sphere { radius }, Shape::Box { half_extents }) => {
            sphere_box(a.position, radius, b.position, b.orientation, half_extents)
        }
        (Shape::Box { half_extents }, Shape::Sphere { radius }) => {
            sphere_box(b.position, radius, a.position, a.orientation, half_extents).map(|c| {
                Contact {
                    normal: -c.normal,
                    ..c
                }
            })
        }
        (Shape::Box { .. }, Shape::Box { .. }) => None,
    }
}

/// Sphere against an oriented box; the normal points from sphere to box.
fn sphere_box(
    center: Vec3,
    radius: f32,
    box_pos: Vec3,
    box_rot: Quat,
    half_extents: Vec3,
) -> Option<Contact> {
    let local = box_rot.inverse() * (center - box_pos);
    let closest = local.clamp(-half_extents, half_extents);
    let diff = local - closest;
    let dist_sq = diff.length_squared();
    if dist_sq > radius * radius {
        return None;
    }

    let (normal_local, depth) = if dist_sq > 1e-12 {
        let dist = dist_sq.sqrt();
        (-diff / dist, radius - dist)
    } else {
        // Center inside the box: leave through the nearest face.
        let gap = half_extents - local.abs();
        let axis = if gap.x <= gap.y && gap.x <= gap.z {
            Vec3::X
        } else if gap.y <= gap.z {
            Vec3::Y
        } else {
            Vec3::Z
        };
        let side = if local.dot(axis) >= 0.0 { 1.0 } else { -1.0 };
        (-axis * side, radius + gap.dot(axis))
    };

    let normal = box_rot * normal_local;
    Some(Contact {
        normal,
        depth,
        point: box_pos + box_rot * closest,
    })
}

impl PhysicsBackend for SphereWorld {
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len() as u32);
        debug!(?handle, mass = desc.mass, shape = ?desc.shape, label = ?desc.label, "body added");
        self.bodies.push(Body::from_desc(desc));
        handle
    }

    fn body_state(&self, handle: BodyHandle) -> Result<DynamicBodyState, PhysicsError> {
        let body = self.body(handle)?;
        Ok(DynamicBodyState {
            handle,
            position: body.position,
            orientation: body.orientation,
            velocity: body.velocity,
            mass: body.mass,
        })
    }

    fn label(&self, handle: BodyHandle) -> Option<&str> {
        self.body(handle).ok().and_then(|b| b.label.as_deref())
    }

    fn apply_force(
        &mut self,
        handle: BodyHandle,
        force: Vec3,
        at_point: Vec3,
    ) -> Result<(), PhysicsError> {
        let body = self.body_mut(handle)?;
        body.force += force;
        body.torque += (at_point - body.position).cross(force);
        Ok(())
    }

    fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec3) -> Result<(), PhysicsError> {
        let body = self.body_mut(handle)?;
        body.velocity += impulse * body.inv_mass;
        Ok(())
    }

    fn step(
        &mut self,
        fixed_dt: f32,
        real_dt: f32,
        max_sub_steps: u32,
        events: &mut EventBus,
    ) -> StepReport {
        let mut report = StepReport::default();
        if fixed_dt > 0.0 && real_dt.is_finite() {
            self.accumulator += real_dt.max(0.0);
            while self.accumulator >= fixed_dt && report.sub_steps < max_sub_steps {
                self.internal_step(fixed_dt, events);
                self.accumulator -= fixed_dt;
                report.sub_steps += 1;
            }

            if self.accumulator >= fixed_dt {
                let kept = self.accumulator % fixed_dt;
                report.dropped_time = self.accumulator - kept;
                self.accumulator = kept;
                debug!(
                    dropped = report.dropped_time,
                    max_sub_steps, "sub-step cap reached"
                );
            }
        }

        for body in &mut self.bodies {
            body.force = Vec3::ZERO;
            body.torque = Vec3::ZERO;
        }
        report
    }
}
