//! Anchors captured when a grab session begins
//!
//! Each anchor snapshots the grabbing point(s) and the target at the start
//! of a session and turns later point positions into a desired transform.

use serde::{Deserialize, Serialize};

use crate::config::TwoHandConfig;
use crate::input::{ManipulationPoint, SourceId};
use crate::spatial::{Point3D, Quaternion, Transform, Vector3D};

/// Which kind of session is live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManipulationMode {
    #[default]
    Idle,
    /// One point carries the target rigidly
    OneHand,
    /// Two points grab but only one touches the target: translate only
    Translate,
    /// Two points translate, rotate and scale the target
    TwoHand,
}

/// Rigid one-point grab
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OneHandAnchor {
    pub source: SourceId,
    /// Target position in the hand's frame at grab start
    pub delta_pos: Vector3D,
    /// Rotation from hand to target at grab start
    pub delta_quat: Quaternion,
}

impl OneHandAnchor {
    pub fn capture(point: &ManipulationPoint, target: &Transform) -> Self {
        let hand_rot = point.orientation_or_identity();
        let inv = hand_rot.inverse();
        Self {
            source: point.source,
            delta_pos: inv.rotate_vector(target.position - point.position),
            delta_quat: (inv * target.rotation).normalize(),
        }
    }

    pub fn desired(&self, point: &ManipulationPoint, current: &Transform) -> Transform {
        let hand_rot = point.orientation_or_identity();
        Transform {
            position: point.position + hand_rot.rotate_vector(self.delta_pos),
            rotation: (hand_rot * self.delta_quat).normalize(),
            scale: current.scale,
        }
    }
}

/// Position-only grab used when only one of two grabbing points collides
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslateAnchor {
    pub source: SourceId,
    /// Target position minus point position, in world space
    pub delta_pos: Vector3D,
}

impl TranslateAnchor {
    pub fn capture(point: &ManipulationPoint, target: &Transform) -> Self {
        Self {
            source: point.source,
            delta_pos: target.position - point.position,
        }
    }

    /// Moves the target; rotation and scale stay exactly as they are
    pub fn desired(&self, point: &ManipulationPoint, current: &Transform) -> Transform {
        Transform {
            position: point.position + self.delta_pos,
            ..*current
        }
    }
}

/// Two-point grab: midpoint drives translation, the line between the points
/// drives rotation and its length drives uniform scaling of the anchor scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoHandAnchor {
    pub sources: [SourceId; 2],
    pub midpoint: Point3D,
    pub distance: f32,
    pub scale: Vector3D,
    pub position: Point3D,
    pub orientation: Quaternion,
    /// Unit vector from the first point to the second
    pub direction: Vector3D,
    /// Target position minus anchor midpoint
    pub offset: Vector3D,
}

impl TwoHandAnchor {
    pub fn capture(
        a: &ManipulationPoint,
        b: &ManipulationPoint,
        target: &Transform,
        limits: &TwoHandConfig,
    ) -> Self {
        let midpoint = a.position.midpoint(&b.position);
        Self {
            sources: [a.source, b.source],
            midpoint,
            distance: a.position.distance(&b.position).max(limits.min_anchor_distance),
            scale: target.scale,
            position: target.position,
            orientation: target.rotation,
            direction: (b.position - a.position).normalize(),
            offset: target.position - midpoint,
        }
    }

    /// Ratio of current to anchor separation, clamped to the configured range
    pub fn scale_factor(&self, a: &ManipulationPoint, b: &ManipulationPoint, limits: &TwoHandConfig) -> f32 {
        let current = a.position.distance(&b.position);
        (current / self.distance).clamp(limits.min_scale_factor, limits.max_scale_factor)
    }

    pub fn desired(
        &self,
        a: &ManipulationPoint,
        b: &ManipulationPoint,
        limits: &TwoHandConfig,
    ) -> Transform {
        let factor = self.scale_factor(a, b, limits);
        let direction = b.position - a.position;
        let rotation_delta = Quaternion::from_rotation_arc(self.direction, direction);
        let midpoint = a.position.midpoint(&b.position);

        Transform {
            position: midpoint + rotation_delta.rotate_vector(self.offset * factor),
            rotation: (rotation_delta * self.orientation).normalize(),
            scale: self.scale * factor,
        }
    }
}

/// The live session. At most one kind exists at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Session {
    #[default]
    Idle,
    OneHand(OneHandAnchor),
    Translate(TranslateAnchor),
    TwoHand(TwoHandAnchor),
}

impl Session {
    pub fn mode(&self) -> ManipulationMode {
        match self {
            Session::Idle => ManipulationMode::Idle,
            Session::OneHand(_) => ManipulationMode::OneHand,
            Session::Translate(_) => ManipulationMode::Translate,
            Session::TwoHand(_) => ManipulationMode::TwoHand,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Handedness;
    use std::f32::consts::PI;

    fn point(id: u32, position: Point3D, orientation: Option<Quaternion>) -> ManipulationPoint {
        ManipulationPoint {
            source: SourceId(id),
            handedness: Handedness::Right,
            position,
            orientation,
            grabbing: true,
            pinching: false,
            palm_down: true,
            radius: 0.05,
            just_started: false,
            has_haptics: false,
        }
    }

    #[test]
    fn test_one_hand_rigid_follow() {
        let target = Transform::from_position(Point3D::new(0.0, 1.0, -0.5));
        let start = point(1, Point3D::new(0.0, 1.0, -0.3), Some(Quaternion::IDENTITY));
        let anchor = OneHandAnchor::capture(&start, &target);

        // Turn the hand a quarter about +Y in place
        let turn = Quaternion::from_axis_angle(Vector3D::UP, PI / 2.0);
        let moved = point(1, start.position, Some(turn));
        let desired = anchor.desired(&moved, &target);

        // The target, 0.2 m ahead of the hand, swings to 0.2 m to its left
        assert!(desired.position.distance(&Point3D::new(-0.2, 1.0, -0.3)) < 0.0001);
        assert!(desired.rotation.angle_to(&turn) < 0.001);
        assert_eq!(desired.scale, target.scale);
    }

    #[test]
    fn test_translate_keeps_rotation_and_scale() {
        let target = Transform::from_position_rotation(
            Point3D::new(1.0, 0.0, 0.0),
            Quaternion::from_axis_angle(Vector3D::RIGHT, 0.4),
        )
        .with_scale(Vector3D::new(1.0, 2.0, 3.0));
        let anchor = TranslateAnchor::capture(&point(1, Point3D::ORIGIN, None), &target);
        let desired = anchor.desired(&point(1, Point3D::new(0.0, 0.5, 0.0), None), &target);

        assert_eq!(desired.position, Point3D::new(1.0, 0.5, 0.0));
        assert_eq!(desired.rotation, target.rotation);
        assert_eq!(desired.scale, target.scale);
    }

    #[test]
    fn test_two_hand_scale_and_rotation() {
        let limits = TwoHandConfig::default();
        let target = Transform::from_position(Point3D::new(0.0, 1.2, 0.0))
            .with_scale(Vector3D::new(1.0, 2.0, 1.0));
        let a0 = point(1, Point3D::new(-0.2, 1.0, 0.0), None);
        let b0 = point(2, Point3D::new(0.2, 1.0, 0.0), None);
        let anchor = TwoHandAnchor::capture(&a0, &b0, &target, &limits);
        assert!((anchor.distance - 0.4).abs() < 0.0001);

        // Hands twice as far apart and rotated a quarter turn about +Y
        let a1 = point(1, Point3D::new(0.0, 1.0, 0.4), None);
        let b1 = point(2, Point3D::new(0.0, 1.0, -0.4), None);
        let desired = anchor.desired(&a1, &b1, &limits);

        assert!((desired.scale - Vector3D::new(2.0, 4.0, 2.0)).magnitude() < 0.0001);
        let quarter = Quaternion::from_axis_angle(Vector3D::UP, PI / 2.0);
        assert!(desired.rotation.angle_to(&quarter) < 0.001);
        // Offset (0, 0.2, 0) scales to 0.4 and is unaffected by the yaw
        assert!(desired.position.distance(&Point3D::new(0.0, 1.4, 0.0)) < 0.0001);
    }

    #[test]
    fn test_two_hand_scale_clamp_and_distance_floor() {
        let limits = TwoHandConfig::default();
        let target = Transform::identity();
        let same = point(1, Point3D::ORIGIN, None);
        let same_b = point(2, Point3D::ORIGIN, None);
        let anchor = TwoHandAnchor::capture(&same, &same_b, &target, &limits);
        assert_eq!(anchor.distance, TwoHandConfig::DEFAULT_MIN_ANCHOR_DISTANCE);

        let far = point(2, Point3D::new(100.0, 0.0, 0.0), None);
        assert_eq!(anchor.scale_factor(&same, &far, &limits), 50.0);

        let wide = TwoHandAnchor::capture(&same, &point(2, Point3D::new(1.0, 0.0, 0.0), None), &target, &limits);
        let pinched = point(2, Point3D::new(0.001, 0.0, 0.0), None);
        assert_eq!(wide.scale_factor(&same, &pinched, &limits), 0.01);
    }
}
