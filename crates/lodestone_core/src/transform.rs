//! Pure transform-state functions.
//!
//! No hidden state: the lifecycle and the tests call these with explicit
//! current values and deltas.

use lodestone_shared::{Quaternion, Vec3, SCALE_MAX, SCALE_MIN};

/// Applies a scalar scale delta to every axis independently.
///
/// Each component is clamped to `[SCALE_MIN, SCALE_MAX]`; the result is
/// in range for any finite `delta`.
#[must_use]
pub fn apply_scale(current: Vec3, delta: f32) -> Vec3 {
    Vec3::new(
        (current.x + delta).clamp(SCALE_MIN, SCALE_MAX),
        (current.y + delta).clamp(SCALE_MIN, SCALE_MAX),
        (current.z + delta).clamp(SCALE_MIN, SCALE_MAX),
    )
}

/// Composes a rotation delta onto the current rotation.
///
/// The delta is applied in the object's local space (`current * delta`).
/// The result is normalized so repeated per-tick composition cannot
/// drift away from unit length.
#[must_use]
pub fn apply_rotation(current: Quaternion, delta: Quaternion) -> Quaternion {
    (current * delta).normalized()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_clamps_above() {
        let scaled = apply_scale(Vec3::splat(9.5), 100.0);
        assert_eq!(scaled, Vec3::splat(SCALE_MAX));
    }

    #[test]
    fn test_scale_clamps_below() {
        let scaled = apply_scale(Vec3::splat(0.5), -100.0);
        assert_eq!(scaled, Vec3::splat(SCALE_MIN));
    }

    #[test]
    fn test_scale_axes_clamp_independently() {
        let scaled = apply_scale(Vec3::new(9.9, 5.0, 0.002), 0.5);
        assert_eq!(scaled.x, SCALE_MAX);
        assert!((scaled.y - 5.5).abs() < 1e-6);
        assert!((scaled.z - 0.502).abs() < 1e-6);
    }

    #[test]
    fn test_scale_in_range_stays_exact() {
        let scaled = apply_scale(Vec3::splat(1.0), -0.002);
        assert!((scaled.x - 0.998).abs() < 1e-6);
        assert!((scaled.y - 0.998).abs() < 1e-6);
        assert!((scaled.z - 0.998).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_composes_in_local_space() {
        let current = Quaternion::from_yaw_degrees(30.0);
        let delta = Quaternion::from_yaw_degrees(-10.0);
        let rotated = apply_rotation(current, delta);
        assert!((rotated.yaw_degrees() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_identity_delta_is_a_fixed_point() {
        let current = Quaternion::from_yaw_degrees(45.0);
        let rotated = apply_rotation(current, Quaternion::IDENTITY);
        assert!(rotated.approx_eq(current, 1e-6));
    }

    #[test]
    fn test_repeated_composition_stays_unit_length() {
        let step = Quaternion::from_yaw_degrees(7.0);
        let mut rotation = Quaternion::IDENTITY;
        for _ in 0..10_000 {
            rotation = apply_rotation(rotation, step);
        }
        assert!((rotation.length_squared() - 1.0).abs() < 1e-4);
    }
}
