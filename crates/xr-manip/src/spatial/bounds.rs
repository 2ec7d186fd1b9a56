//! Axis-aligned bounding boxes for grab hit testing

use serde::{Deserialize, Serialize};

use super::{Point3D, Transform, Vector3D};

/// An axis-aligned bounding box.
///
/// A box whose `min` exceeds its `max` on any axis is empty; empty boxes
/// contain nothing and are the identity for [`Bounds::union`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point3D,
    pub max: Point3D,
}

impl Bounds {
    pub fn new(min: Point3D, max: Point3D) -> Self {
        Self { min, max }
    }

    /// The empty box
    pub fn empty() -> Self {
        Self {
            min: Point3D::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point3D::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Create a box from center and half-extents
    pub fn centered(center: Point3D, half_extents: Vector3D) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Smallest box containing every point; empty for no points
    pub fn from_points(points: impl IntoIterator<Item = Point3D>) -> Self {
        points
            .into_iter()
            .fold(Self::empty(), |acc, p| acc.including(p))
    }

    /// True if the box contains no points
    pub fn is_empty(&self) -> bool {
        !(self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z)
    }

    pub fn center(&self) -> Point3D {
        self.min.midpoint(&self.max)
    }

    pub fn size(&self) -> Vector3D {
        if self.is_empty() {
            Vector3D::ZERO
        } else {
            self.max - self.min
        }
    }

    pub fn contains(&self, point: Point3D) -> bool {
        !self.is_empty()
            && point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Nearest point on or inside the box; `None` for an empty box
    pub fn closest_point(&self, point: Point3D) -> Option<Point3D> {
        (!self.is_empty()).then(|| point.clamp(&self.min, &self.max))
    }

    /// Distance from `point` to the box (zero inside); `None` for an empty box
    pub fn distance_to(&self, point: Point3D) -> Option<f32> {
        self.closest_point(point).map(|closest| closest.distance(&point))
    }

    /// Grow the box outward by `margin` on every side
    pub fn expand(&self, margin: f32) -> Self {
        if self.is_empty() {
            return *self;
        }
        let m = Vector3D::splat(margin);
        Self {
            min: self.min - m,
            max: self.max + m,
        }
    }

    /// Box grown to include `point`
    pub fn including(&self, point: Point3D) -> Self {
        Self {
            min: Point3D::new(
                self.min.x.min(point.x),
                self.min.y.min(point.y),
                self.min.z.min(point.z),
            ),
            max: Point3D::new(
                self.max.x.max(point.x),
                self.max.y.max(point.y),
                self.max.z.max(point.z),
            ),
        }
    }

    /// Smallest box enclosing both
    pub fn union(&self, other: &Bounds) -> Self {
        if other.is_empty() {
            return *self;
        }
        self.including(other.min).including(other.max)
    }

    /// World-space box enclosing this local box after `transform`
    pub fn transformed(&self, transform: &Transform) -> Self {
        if self.is_empty() {
            return *self;
        }
        let (lo, hi) = (self.min, self.max);
        let corners = [
            Point3D::new(lo.x, lo.y, lo.z),
            Point3D::new(hi.x, lo.y, lo.z),
            Point3D::new(lo.x, hi.y, lo.z),
            Point3D::new(hi.x, hi.y, lo.z),
            Point3D::new(lo.x, lo.y, hi.z),
            Point3D::new(hi.x, lo.y, hi.z),
            Point3D::new(lo.x, hi.y, hi.z),
            Point3D::new(hi.x, hi.y, hi.z),
        ];
        Self::from_points(corners.into_iter().map(|c| transform.transform_point(c)))
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::Quaternion;
    use std::f32::consts::PI;

    fn unit_box() -> Bounds {
        Bounds::new(Point3D::ORIGIN, Point3D::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_contains() {
        let bounds = unit_box();
        assert!(bounds.contains(Point3D::new(0.5, 0.5, 0.5)));
        assert!(bounds.contains(Point3D::ORIGIN));
        assert!(!bounds.contains(Point3D::new(-0.1, 0.5, 0.5)));
    }

    #[test]
    fn test_empty_box() {
        let empty = Bounds::empty();
        assert!(empty.is_empty());
        assert!(!empty.contains(Point3D::ORIGIN));
        assert!(empty.distance_to(Point3D::ORIGIN).is_none());
        assert_eq!(empty.union(&unit_box()), unit_box());
        assert_eq!(unit_box().union(&empty), unit_box());
        assert!(Bounds::from_points(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_distance_to() {
        let bounds = unit_box();
        assert_eq!(bounds.distance_to(Point3D::new(3.0, 0.5, 0.5)), Some(2.0));
        assert_eq!(bounds.distance_to(Point3D::new(0.2, 0.2, 0.2)), Some(0.0));
    }

    #[test]
    fn test_transformed_box() {
        let t = Transform::from_position_rotation(
            Point3D::new(10.0, 0.0, 0.0),
            Quaternion::from_axis_angle(Vector3D::UP, PI / 2.0),
        )
        .with_scale(Vector3D::new(2.0, 1.0, 1.0));
        let world = Bounds::centered(Point3D::ORIGIN, Vector3D::splat(0.5)).transformed(&t);

        // X extent 2 rotated onto Z
        assert!((world.size().z - 2.0).abs() < 0.0001);
        assert!((world.size().x - 1.0).abs() < 0.0001);
        assert!(world.center().distance(&Point3D::new(10.0, 0.0, 0.0)) < 0.0001);
    }
}
