//! 3D vector representation for offsets, directions and scale

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Vectors shorter than this are treated as having no direction
const DIRECTION_EPSILON: f32 = 1e-6;

/// A vector in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3D {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    /// Unit scale
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };
    /// Unit vector pointing right (+X)
    pub const RIGHT: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    /// Unit vector pointing up (+Y)
    pub const UP: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    /// Unit vector pointing forward (-Z)
    pub const FORWARD: Self = Self {
        x: 0.0,
        y: 0.0,
        z: -1.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Same value on every axis
    pub fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Unit vector in the same direction, or `None` for a (near) zero vector
    pub fn try_normalize(&self) -> Option<Self> {
        let mag = self.magnitude();
        if mag > DIRECTION_EPSILON && mag.is_finite() {
            Some(*self * (1.0 / mag))
        } else {
            None
        }
    }

    /// Unit vector in the same direction, zero for a degenerate input
    pub fn normalize(&self) -> Self {
        self.try_normalize().unwrap_or(Self::ZERO)
    }

    pub fn dot(&self, other: &Vector3D) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector3D) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Component-wise product, used for non-uniform scale
    pub fn scale_by(&self, other: &Vector3D) -> Self {
        Self {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }

    /// Component-wise quotient; axes divided by zero are left untouched
    pub fn divide_by(&self, other: &Vector3D) -> Self {
        let div = |a: f32, b: f32| if b != 0.0 { a / b } else { a };
        Self {
            x: div(self.x, other.x),
            y: div(self.y, other.y),
            z: div(self.z, other.z),
        }
    }

    pub fn lerp(&self, other: &Vector3D, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_point(&self) -> super::Point3D {
        super::Point3D::new(self.x, self.y, self.z)
    }
}

impl Add for Vector3D {
    type Output = Vector3D;

    fn add(self, rhs: Self) -> Self::Output {
        Vector3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3D {
    type Output = Vector3D;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vector3D {
    type Output = Vector3D;

    fn mul(self, rhs: f32) -> Self::Output {
        Vector3D::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vector3D {
    type Output = Vector3D;

    fn neg(self) -> Self::Output {
        Vector3D::new(-self.x, -self.y, -self.z)
    }
}
