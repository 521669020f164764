//! Math types.
//!
//! Vectors and rotations come from `glam`. This module only adds the few
//! helpers the planet core needs on top of them and keeps their semantics
//! deterministic (no random fallbacks, no SIMD-dependent branching).

pub use glam::{Mat3, Quat, Vec3};

/// Squared length below which a vector is treated as zero.
pub const DEGENERATE_LEN_SQ: f32 = 1e-12;

/// Normalizes `v`, or returns `fallback` when `v` is (close to) zero or not
/// finite.
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let len_sq = v.length_squared();
    if len_sq > DEGENERATE_LEN_SQ && len_sq.is_finite() {
        v / len_sq.sqrt()
    } else {
        fallback
    }
}

/// Rotation whose local -Z axis points from `eye` toward `target`, with
/// local +Y as close to `up` as possible.
///
/// Matches the usual "look at" convention for placing static props: the
/// local +Z axis is `normalize(eye - target)`.
pub fn look_at_rotation(eye: Vec3, target: Vec3, up: Vec3) -> Quat {
    let z = normalize_or(eye - target, Vec3::Z);
    let mut x = up.cross(z);
    if x.length_squared() <= DEGENERATE_LEN_SQ {
        // `up` is parallel to the view axis; nudge it.
        let nudged = if z.z.abs() < 0.9 { Vec3::Z } else { Vec3::X };
        x = nudged.cross(z);
    }
    let x = x.normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_or_uses_fallback_for_zero() {
        assert_eq!(normalize_or(Vec3::ZERO, Vec3::Y), Vec3::Y);
        assert_eq!(normalize_or(Vec3::splat(f32::NAN), Vec3::X), Vec3::X);
    }

    #[test]
    fn normalize_or_normalizes() {
        let n = normalize_or(Vec3::new(0.0, 3.0, 4.0), Vec3::X);
        assert!(n.abs_diff_eq(Vec3::new(0.0, 0.6, 0.8), 1e-6));
    }

    #[test]
    fn look_at_points_negative_z_toward_target() {
        let eye = Vec3::new(0.0, 0.0, -8.0);
        let target = Vec3::new(0.0, 180.0, 0.0);
        let q = look_at_rotation(eye, target, Vec3::Y);
        let facing = q * Vec3::NEG_Z;
        let expected = (target - eye).normalize();
        assert!(facing.abs_diff_eq(expected, 1e-5));
        assert!((q.length() - 1.0).abs() < 1e-5);
    }
}
