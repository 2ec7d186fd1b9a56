//! Tracked input sources as reported by the XR runtime each frame

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::spatial::{Point3D, Quaternion, Transform};

/// Stable identity of a tracked device or hand for the life of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(pub u32);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source#{}", self.0)
    }
}

/// Which hand a source is held in or belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    #[default]
    Right,
    /// Runtime did not report a side
    None,
}

/// A rigid pose in the source's tracking space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point3D,
    #[serde(default)]
    pub orientation: Quaternion,
}

impl Pose {
    pub fn new(position: Point3D, orientation: Quaternion) -> Self {
        Self { position, orientation }
    }

    /// This pose expressed in the world frame of `space`
    pub fn in_space(&self, space: &Transform) -> Pose {
        Pose {
            position: space.transform_point(self.position),
            orientation: (space.rotation * self.orientation).normalize(),
        }
    }
}

/// Pose-plus-buttons source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerState {
    /// Grip space pose; the designated grab pose
    pub grip: Option<Pose>,
    /// Pointing ray pose; used when the grip pose is unavailable
    pub target_ray: Option<Pose>,
    /// 0.0 (released) - 1.0 (fully pressed)
    pub trigger: f32,
    /// 0.0 (released) - 1.0 (fully squeezed)
    pub squeeze: f32,
    /// Whether this controller exposes a vibration actuator
    pub haptic_actuator: bool,
}

/// A single articulated joint. Orientation is only reported by some runtimes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointPose {
    pub position: Point3D,
    #[serde(default)]
    pub orientation: Option<Quaternion>,
}

impl JointPose {
    pub fn at(position: Point3D) -> Self {
        Self {
            position,
            orientation: None,
        }
    }

    pub fn with_orientation(mut self, orientation: Quaternion) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn in_space(&self, space: &Transform) -> JointPose {
        JointPose {
            position: space.transform_point(self.position),
            orientation: self.orientation.map(|o| (space.rotation * o).normalize()),
        }
    }
}

/// Multi-joint hand source. Joints the runtime could not resolve are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandState {
    pub wrist: Option<JointPose>,
    pub thumb_tip: Option<JointPose>,
    pub index_tip: Option<JointPose>,
}

/// Capability set of a tracked source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceKind {
    Controller(ControllerState),
    Hand(HandState),
}

/// One tracked source for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedSource {
    pub id: SourceId,
    #[serde(default)]
    pub handedness: Handedness,
    #[serde(flatten)]
    pub kind: SourceKind,
}

impl TrackedSource {
    pub fn controller(id: u32, handedness: Handedness, state: ControllerState) -> Self {
        Self {
            id: SourceId(id),
            handedness,
            kind: SourceKind::Controller(state),
        }
    }

    pub fn hand(id: u32, handedness: Handedness, state: HandState) -> Self {
        Self {
            id: SourceId(id),
            handedness,
            kind: SourceKind::Hand(state),
        }
    }

    /// Hands never carry actuators
    pub fn has_haptics(&self) -> bool {
        match &self.kind {
            SourceKind::Controller(state) => state.haptic_actuator,
            SourceKind::Hand(_) => false,
        }
    }
}

/// Everything the engine consumes for one rendered frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameInput {
    /// All sources the runtime currently reports, including ones whose pose
    /// could not be resolved this frame
    pub sources: Vec<TrackedSource>,
    /// Maps tracking-space poses into world space
    pub reference_space: Transform,
    /// Time since the previous frame, when the frame loop knows it
    #[serde(with = "optional_millis")]
    pub delta_time: Option<Duration>,
}

impl FrameInput {
    pub fn new(sources: Vec<TrackedSource>) -> Self {
        Self {
            sources,
            ..Self::default()
        }
    }

    pub fn with_delta_time(mut self, dt: Duration) -> Self {
        self.delta_time = Some(dt);
        self
    }
}

/// Frame delta times are written as fractional milliseconds
mod optional_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        value.map(|d| d.as_secs_f64() * 1000.0).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        let millis = Option::<f64>::deserialize(d)?;
        Ok(millis
            .filter(|ms| ms.is_finite() && *ms >= 0.0)
            .map(|ms| Duration::from_secs_f64(ms / 1000.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::Vector3D;
    use std::f32::consts::PI;

    #[test]
    fn test_pose_in_space() {
        let space = Transform::from_position_rotation(
            Point3D::new(0.0, 1.5, 0.0),
            Quaternion::from_axis_angle(Vector3D::UP, PI),
        );
        let pose = Pose::new(Point3D::new(1.0, 0.0, 0.0), Quaternion::IDENTITY).in_space(&space);
        assert!(pose.position.distance(&Point3D::new(-1.0, 1.5, 0.0)) < 0.0001);
        assert!(pose.orientation.angle_to(&space.rotation) < 0.001);
    }

    #[test]
    fn test_haptics_capability() {
        let pad = TrackedSource::controller(
            1,
            Handedness::Left,
            ControllerState {
                haptic_actuator: true,
                ..Default::default()
            },
        );
        let hand = TrackedSource::hand(2, Handedness::Left, HandState::default());
        assert!(pad.has_haptics());
        assert!(!hand.has_haptics());
    }
}
