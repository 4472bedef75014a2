//! Mathematical types shared between the controller and the authority.
//!
//! These are the canonical representations used in the replication
//! protocol and the lifecycle state.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 2D vector - screen positions and touch deltas.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vec2 {
    /// Creates a new Vec2.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Length of the vector.
    #[must_use]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// 3D vector - world positions and per-axis scale.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// Creates a new Vec3.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Unit scale.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Vector with the same value on every axis.
    #[must_use]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Converts to array.
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Quaternion for marker rotations.
///
/// The replication protocol only ever carries yaw-only rotations
/// (rotation about the world vertical axis), but composition and
/// normalization are general.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quaternion {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W component
    pub w: f32,
}

impl Quaternion {
    /// Creates a new quaternion.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Identity rotation.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Rotation about the world vertical (Y) axis.
    #[must_use]
    pub fn from_yaw_degrees(degrees: f32) -> Self {
        let half = degrees.to_radians() * 0.5;
        Self::new(0.0, half.sin(), 0.0, half.cos())
    }

    /// Yaw angle in degrees.
    ///
    /// Exact for yaw-only quaternions, which is all the protocol carries.
    #[must_use]
    pub fn yaw_degrees(self) -> f32 {
        (2.0 * self.y.atan2(self.w)).to_degrees()
    }

    /// Squared length.
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Unit-length copy.
    ///
    /// Degenerate (near-zero) quaternions normalize to the identity so a
    /// corrupt replica can never poison the saved rotation.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len_sq = self.length_squared();
        if len_sq <= f32::EPSILON {
            return Self::IDENTITY;
        }
        let inv = len_sq.sqrt().recip();
        Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
    }

    /// Component-wise approximate equality.
    #[must_use]
    pub fn approx_eq(self, other: Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.z - other.z).abs() <= epsilon
            && (self.w - other.w).abs() <= epsilon
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for Quaternion {
    type Output = Self;

    /// Hamilton product; `a * b` applies `b` in `a`'s local space.
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

/// Pose of a tracked marker - position, rotation and per-axis scale.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct MarkerTransform {
    /// World position. Owned by the tracking collaborator; never mutated
    /// by the lifecycle.
    pub position: Vec3,
    /// World rotation.
    pub rotation: Quaternion,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl MarkerTransform {
    /// Creates a new transform.
    #[must_use]
    pub const fn new(position: Vec3, rotation: Quaternion, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Identity transform with unit scale.
    pub const IDENTITY: Self = Self::new(Vec3::ZERO, Quaternion::IDENTITY, Vec3::ONE);
}

impl Default for MarkerTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_yaw_round_trip() {
        let q = Quaternion::from_yaw_degrees(-10.0);
        assert!((q.yaw_degrees() - (-10.0)).abs() < 1e-4);
    }

    #[test]
    fn test_yaw_composition_accumulates() {
        let a = Quaternion::from_yaw_degrees(30.0);
        let b = Quaternion::from_yaw_degrees(15.0);
        let composed = a * b;
        assert!((composed.yaw_degrees() - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_identity_is_neutral() {
        let q = Quaternion::from_yaw_degrees(72.5);
        let composed = q * Quaternion::IDENTITY;
        assert!(composed.approx_eq(q, 1e-6));
    }

    #[test]
    fn test_degenerate_normalizes_to_identity() {
        let q = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(q.normalized(), Quaternion::IDENTITY);
    }

    #[test]
    fn test_transform_bytemuck() {
        let t = MarkerTransform::IDENTITY;
        let bytes: &[u8] = bytemuck::bytes_of(&t);
        assert_eq!(bytes.len(), 40); // 3 + 4 + 3 floats
    }
}
