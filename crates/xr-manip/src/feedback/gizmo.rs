//! Grab points published for visualization

use serde::{Deserialize, Serialize};

use crate::input::ManipulationPoint;
use crate::spatial::Point3D;

/// Active grab points this frame. Never more than two.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "shape", content = "points", rename_all = "snake_case")]
pub enum GizmoPoints {
    #[default]
    Empty,
    One(Point3D),
    Two(Point3D, Point3D),
}

impl GizmoPoints {
    /// From the first two grabbing points; any further ones are dropped
    pub fn from_points(points: &[ManipulationPoint]) -> Self {
        match points {
            [] => Self::Empty,
            [p] => Self::One(p.position),
            [a, b, ..] => Self::Two(a.position, b.position),
        }
    }

    pub fn points(&self) -> Vec<Point3D> {
        match *self {
            Self::Empty => Vec::new(),
            Self::One(p) => vec![p],
            Self::Two(a, b) => vec![a, b],
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::One(_) => 1,
            Self::Two(..) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Gizmo visualization backend
pub trait GizmoBackend: Send {
    /// Called once per frame, including with `Empty`
    fn show(&mut self, points: &GizmoPoints);
}

/// Null gizmo backend (no-op)
pub struct NullGizmoBackend;

impl GizmoBackend for NullGizmoBackend {
    fn show(&mut self, _points: &GizmoPoints) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Handedness, SourceId};

    fn point(id: u32, x: f32) -> ManipulationPoint {
        ManipulationPoint {
            source: SourceId(id),
            handedness: Handedness::Right,
            position: Point3D::new(x, 0.0, 0.0),
            orientation: None,
            grabbing: true,
            pinching: false,
            palm_down: true,
            radius: 0.05,
            just_started: false,
            has_haptics: false,
        }
    }

    #[test]
    fn test_shapes() {
        assert_eq!(GizmoPoints::from_points(&[]), GizmoPoints::Empty);
        assert_eq!(GizmoPoints::from_points(&[point(1, 1.0)]).len(), 1);

        let three = [point(1, 1.0), point(2, 2.0), point(3, 3.0)];
        let gizmo = GizmoPoints::from_points(&three);
        assert_eq!(gizmo, GizmoPoints::Two(Point3D::new(1.0, 0.0, 0.0), Point3D::new(2.0, 0.0, 0.0)));
        assert_eq!(gizmo.points().len(), 2);
    }
}
