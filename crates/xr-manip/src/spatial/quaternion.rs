//! Quaternion representation for 3D rotations

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::ops::Mul;

use super::Vector3D;

/// Quaternions with a squared norm below this cannot be normalized
const DEGENERATE_NORM_SQ: f32 = 1e-12;

/// A quaternion for representing 3D rotations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a quaternion from axis-angle representation
    pub fn from_axis_angle(axis: Vector3D, angle_radians: f32) -> Self {
        let Some(axis) = axis.try_normalize() else {
            return Self::IDENTITY;
        };
        let half_angle = angle_radians / 2.0;
        let sin_half = half_angle.sin();

        Self {
            x: axis.x * sin_half,
            y: axis.y * sin_half,
            z: axis.z * sin_half,
            w: half_angle.cos(),
        }
    }

    /// Shortest rotation taking direction `from` onto direction `to`.
    ///
    /// Inputs need not be unit length. Zero-length inputs yield the identity;
    /// opposite directions rotate half a turn about an arbitrary perpendicular.
    pub fn from_rotation_arc(from: Vector3D, to: Vector3D) -> Self {
        let (Some(from), Some(to)) = (from.try_normalize(), to.try_normalize()) else {
            return Self::IDENTITY;
        };

        let dot = from.dot(&to);
        if dot >= 1.0 - 1e-6 {
            return Self::IDENTITY;
        }
        if dot <= -1.0 + 1e-6 {
            let axis = Vector3D::RIGHT
                .cross(&from)
                .try_normalize()
                .or_else(|| Vector3D::UP.cross(&from).try_normalize())
                .unwrap_or(Vector3D::UP);
            return Self::from_axis_angle(axis, PI);
        }

        let axis = from.cross(&to);
        Self::new(axis.x, axis.y, axis.z, 1.0 + dot).normalize()
    }

    /// Rotation whose local X/Y/Z axes map onto the given orthonormal columns
    pub fn from_basis(x_axis: Vector3D, y_axis: Vector3D, z_axis: Vector3D) -> Self {
        let (m00, m10, m20) = (x_axis.x, x_axis.y, x_axis.z);
        let (m01, m11, m21) = (y_axis.x, y_axis.y, y_axis.z);
        let (m02, m12, m22) = (z_axis.x, z_axis.y, z_axis.z);

        let trace = m00 + m11 + m22;
        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Self::new((m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s, 0.25 * s)
        } else if m00 > m11 && m00 > m22 {
            let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0;
            Self::new(0.25 * s, (m01 + m10) / s, (m02 + m20) / s, (m21 - m12) / s)
        } else if m11 > m22 {
            let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0;
            Self::new((m01 + m10) / s, 0.25 * s, (m12 + m21) / s, (m02 - m20) / s)
        } else {
            let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0;
            Self::new((m02 + m20) / s, (m12 + m21) / s, 0.25 * s, (m10 - m01) / s)
        };
        q.normalize()
    }

    pub fn dot(&self, other: &Quaternion) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn magnitude(&self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    /// Unit quaternion, or `None` if this one has (near) zero length
    pub fn try_normalize(&self) -> Option<Self> {
        let mag_sq = self.dot(self);
        if mag_sq > DEGENERATE_NORM_SQ && mag_sq.is_finite() {
            let inv = 1.0 / mag_sq.sqrt();
            Some(Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv))
        } else {
            None
        }
    }

    /// Unit quaternion, identity for a degenerate input
    pub fn normalize(&self) -> Self {
        self.try_normalize().unwrap_or(Self::IDENTITY)
    }

    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Inverse rotation. A zero quaternion inverts to the identity.
    pub fn inverse(&self) -> Self {
        let mag_sq = self.dot(self);
        if mag_sq > DEGENERATE_NORM_SQ && mag_sq.is_finite() {
            let inv_mag_sq = 1.0 / mag_sq;
            Self::new(
                -self.x * inv_mag_sq,
                -self.y * inv_mag_sq,
                -self.z * inv_mag_sq,
                self.w * inv_mag_sq,
            )
        } else {
            Self::IDENTITY
        }
    }

    /// Rotate a vector by this quaternion
    pub fn rotate_vector(&self, v: Vector3D) -> Vector3D {
        let q_vec = Vector3D::new(self.x, self.y, self.z);
        let uv = q_vec.cross(&v);
        let uuv = q_vec.cross(&uv);
        v + (uv * self.w + uuv) * 2.0
    }

    /// Spherical interpolation, or `None` when either endpoint is degenerate
    pub fn try_slerp(&self, other: &Quaternion, t: f32) -> Option<Self> {
        let from = self.try_normalize()?;
        let to = other.try_normalize()?;

        // Take the shorter arc
        let dot = from.dot(&to);
        let (to, dot) = if dot < 0.0 {
            (Quaternion::new(-to.x, -to.y, -to.z, -to.w), -dot)
        } else {
            (to, dot)
        };

        // Nearly parallel: normalized lerp avoids dividing by sin(~0)
        if dot > 0.9995 {
            return Quaternion::new(
                from.x + t * (to.x - from.x),
                from.y + t * (to.y - from.y),
                from.z + t * (to.z - from.z),
                from.w + t * (to.w - from.w),
            )
            .try_normalize();
        }

        let theta_0 = dot.min(1.0).acos();
        let theta = theta_0 * t;
        let sin_theta_0 = theta_0.sin();
        let s0 = (theta_0 - theta).sin() / sin_theta_0;
        let s1 = theta.sin() / sin_theta_0;

        let q = Quaternion::new(
            s0 * from.x + s1 * to.x,
            s0 * from.y + s1 * to.y,
            s0 * from.z + s1 * to.z,
            s0 * from.w + s1 * to.w,
        );
        q.is_finite().then_some(q)
    }

    /// Spherical interpolation that falls back to `other` on degenerate input
    pub fn slerp(&self, other: &Quaternion, t: f32) -> Self {
        self.try_slerp(other, t).unwrap_or(*other)
    }

    /// Angle in radians of the rotation taking `self` to `other`
    pub fn angle_to(&self, other: &Quaternion) -> f32 {
        let dot = self.normalize().dot(&other.normalize()).abs().min(1.0);
        2.0 * dot.acos()
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Self) -> Self::Output {
        Quaternion::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}
