//! Transform representing position, rotation, and scale in 3D space

use serde::{Deserialize, Serialize};

use super::{Point3D, Quaternion, Vector3D};

/// Position + rotation + non-uniform scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub position: Point3D,
    pub rotation: Quaternion,
    pub scale: Vector3D,
}

impl Transform {
    /// Identity transform (origin, no rotation, unit scale)
    pub fn identity() -> Self {
        Self {
            position: Point3D::ORIGIN,
            rotation: Quaternion::IDENTITY,
            scale: Vector3D::ONE,
        }
    }

    pub fn from_position(position: Point3D) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    pub fn from_position_rotation(position: Point3D, rotation: Quaternion) -> Self {
        Self {
            position,
            rotation,
            scale: Vector3D::ONE,
        }
    }

    pub fn with_scale(mut self, scale: Vector3D) -> Self {
        self.scale = scale;
        self
    }

    /// Transform a point from local space to world space
    pub fn transform_point(&self, local: Point3D) -> Point3D {
        let scaled = local.to_vector().scale_by(&self.scale);
        self.position + self.rotation.rotate_vector(scaled)
    }

    /// Transform a direction vector (ignores position and scale)
    pub fn transform_direction(&self, direction: Vector3D) -> Vector3D {
        self.rotation.rotate_vector(direction)
    }

    /// Inverse transform a point from world space to local space
    pub fn inverse_transform_point(&self, world: Point3D) -> Point3D {
        let unrotated = self.rotation.inverse().rotate_vector(world - self.position);
        unrotated.divide_by(&self.scale).to_point()
    }

    /// World transform of a child whose local transform is `local`
    pub fn compose(&self, local: &Transform) -> Transform {
        Transform {
            position: self.transform_point(local.position),
            rotation: (self.rotation * local.rotation).normalize(),
            scale: self.scale.scale_by(&local.scale),
        }
    }

    /// Local transform that places a child of `self` at `world`
    pub fn localize(&self, world: &Transform) -> Transform {
        Transform {
            position: self.inverse_transform_point(world.position),
            rotation: (self.rotation.inverse() * world.rotation).normalize(),
            scale: world.scale.divide_by(&self.scale),
        }
    }

    /// Interpolate every component toward `other`.
    ///
    /// Rotation uses slerp; if that is undefined for the inputs the rotation
    /// snaps to `other.rotation`.
    pub fn lerp(&self, other: &Transform, t: f32) -> Self {
        Self {
            position: self.position.lerp(&other.position, t),
            rotation: self.rotation.slerp(&other.rotation, t),
            scale: self.scale.lerp(&other.scale, t),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_transform_point() {
        let t = Transform::from_position(Point3D::new(10.0, 0.0, 0.0));
        let world = t.transform_point(Point3D::new(1.0, 0.0, 0.0));
        assert_eq!(world, Point3D::new(11.0, 0.0, 0.0));
    }

    #[test]
    fn test_inverse_transform() {
        let t = Transform::from_position(Point3D::new(5.0, 5.0, 5.0)).with_scale(Vector3D::splat(2.0));
        let local = t.inverse_transform_point(Point3D::new(7.0, 7.0, 7.0));
        assert!((local.x - 1.0).abs() < 0.0001);
        assert!((local.y - 1.0).abs() < 0.0001);
        assert!((local.z - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_compose_then_localize() {
        let parent = Transform::from_position_rotation(
            Point3D::new(1.0, 2.0, 3.0),
            Quaternion::from_axis_angle(Vector3D::UP, PI / 3.0),
        )
        .with_scale(Vector3D::splat(2.0));
        let local = Transform::from_position(Point3D::new(0.5, 0.0, -0.25))
            .with_scale(Vector3D::new(1.0, 3.0, 1.0));

        let world = parent.compose(&local);
        let back = parent.localize(&world);

        assert!(back.position.distance(&local.position) < 0.0001);
        assert!(back.rotation.angle_to(&local.rotation) < 0.001);
        assert!((back.scale - local.scale).magnitude() < 0.0001);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Transform::identity();
        let b = Transform::from_position(Point3D::new(2.0, 0.0, 0.0)).with_scale(Vector3D::splat(3.0));
        assert_eq!(a.lerp(&b, 1.0).position, b.position);
        assert_eq!(a.lerp(&b, 0.5).scale, Vector3D::splat(2.0));
    }
}
