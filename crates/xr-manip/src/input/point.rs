//! Normalized manipulation points

use super::{Handedness, SourceId};
use crate::spatial::Point3D;
use crate::spatial::Quaternion;

/// One tracked source reduced to what manipulation needs this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManipulationPoint {
    pub source: SourceId,
    pub handedness: Handedness,
    pub position: Point3D,
    pub orientation: Option<Quaternion>,
    /// Out of the sampler: the grab gesture (pinch or press) is held.
    /// After gating: the source holds a grab.
    pub grabbing: bool,
    pub pinching: bool,
    /// Posture allows a new grab to start: palm facing down for hands,
    /// always true for controllers. Not required to keep a held grab.
    pub palm_down: bool,
    /// Interaction radius in meters
    pub radius: f32,
    /// First frame this source's grab is held
    pub just_started: bool,
    pub has_haptics: bool,
}

impl ManipulationPoint {
    /// Orientation with an identity fallback for sources that report none
    pub fn orientation_or_identity(&self) -> Quaternion {
        self.orientation.unwrap_or(Quaternion::IDENTITY)
    }
}
