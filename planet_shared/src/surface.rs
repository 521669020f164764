//! Local surface frame on the sphere.
//!
//! "Up" is the outward radial direction at the body (the planet is centered
//! at the origin), and forward/right span the tangent plane, oriented by the
//! camera's view direction.

use crate::math::{normalize_or, Vec3, DEGENERATE_LEN_SQ};

/// Orthonormal frame at a point on the sphere.
///
/// `right`, `up` and `forward` are unit length and mutually orthogonal, with
/// `forward == right.cross(up)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceBasis {
    pub up: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
}

impl SurfaceBasis {
    /// Derives the frame at `body_position` for a camera looking along
    /// `view_forward`.
    ///
    /// When the view is (anti)parallel to up, or zero, the tangent direction
    /// is taken from world -Z instead (world +X when up itself is close to
    /// the Z axis), so the result is always finite.
    pub fn compute(body_position: Vec3, view_forward: Vec3) -> Self {
        let up = normalize_or(body_position, Vec3::Y);

        let mut right = up.cross(view_forward);
        if right.length_squared() <= DEGENERATE_LEN_SQ || !right.is_finite() {
            let secondary = if up.z.abs() < 0.9 { Vec3::NEG_Z } else { Vec3::X };
            right = up.cross(secondary);
        }
        let right = right.normalize();
        let forward = right.cross(up).normalize();

        Self { up, forward, right }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_orthonormal(b: &SurfaceBasis) {
        for v in [b.up, b.forward, b.right] {
            assert!((v.length() - 1.0).abs() < EPS, "not unit: {v:?}");
        }
        assert!(b.up.dot(b.forward).abs() < EPS);
        assert!(b.up.dot(b.right).abs() < EPS);
        assert!(b.forward.dot(b.right).abs() < EPS);
        assert!(b.right.cross(b.up).abs_diff_eq(b.forward, EPS));
    }

    #[test]
    fn north_pole_looking_down_negative_z() {
        let b = SurfaceBasis::compute(Vec3::new(0.0, 5.4, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(b.up.abs_diff_eq(Vec3::Y, EPS));
        // up x view: points along -X for this camera.
        assert!(b.right.abs_diff_eq(Vec3::NEG_X, EPS));
        assert!(b.forward.abs_diff_eq(Vec3::NEG_Z, EPS));
        assert_orthonormal(&b);
    }

    #[test]
    fn tilted_camera_forward_is_projected_onto_tangent_plane() {
        // Camera looking down at the player from above and behind.
        let view = Vec3::new(0.0, -15.0, -25.0).normalize();
        let b = SurfaceBasis::compute(Vec3::new(0.0, 5.4, 0.0), view);
        assert!(b.forward.abs_diff_eq(Vec3::NEG_Z, EPS));
        assert_orthonormal(&b);
    }

    #[test]
    fn orthonormal_for_assorted_inputs() {
        let positions = [
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-4.0, 0.5, 2.0),
            Vec3::new(0.0, -5.0, 0.1),
            Vec3::new(7.0, 0.0, 0.0),
        ];
        let views = [
            Vec3::new(0.0, -0.5, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-0.3, 0.2, 0.9),
        ];
        for p in positions {
            for v in views {
                assert_orthonormal(&SurfaceBasis::compute(p, v));
            }
        }
    }

    #[test]
    fn view_parallel_to_up_uses_fallback() {
        let straight_down = SurfaceBasis::compute(Vec3::new(0.0, 6.0, 0.0), Vec3::NEG_Y);
        assert!(straight_down.right.is_finite());
        assert!(straight_down.forward.is_finite());
        assert_orthonormal(&straight_down);

        let straight_up = SurfaceBasis::compute(Vec3::new(0.0, 6.0, 0.0), Vec3::Y);
        assert_eq!(straight_down, straight_up);
    }

    #[test]
    fn fallback_near_z_axis_pole() {
        let b = SurfaceBasis::compute(Vec3::new(0.0, 0.0, 5.5), Vec3::NEG_Z);
        assert_orthonormal(&b);
    }

    #[test]
    fn zero_view_and_origin_position_stay_finite() {
        let b = SurfaceBasis::compute(Vec3::ZERO, Vec3::ZERO);
        assert!(b.up.abs_diff_eq(Vec3::Y, EPS));
        assert_orthonormal(&b);
    }
}
