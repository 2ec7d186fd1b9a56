//! Decides whether a point may start or keep a grab

use crate::input::ManipulationPoint;
use crate::spatial::Bounds;

#[derive(Debug, Clone, Copy)]
pub struct CollisionGate {
    enabled: bool,
}

impl Default for CollisionGate {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl CollisionGate {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Geometric test: is the target box within the point's radius?
    ///
    /// Passes unconditionally when gating is disabled or there is no usable
    /// box to test against.
    pub fn may_grab(&self, point: &ManipulationPoint, target_box: Option<&Bounds>) -> bool {
        if !self.enabled {
            return true;
        }
        match target_box.and_then(|b| b.distance_to(point.position)) {
            Some(distance) => distance <= point.radius,
            None => true,
        }
    }

    /// Whether an attempting point holds a grab this frame.
    ///
    /// A source that was already grabbing keeps its grab for as long as the
    /// gesture is held, wherever the point is and however the hand is turned.
    /// A fresh attempt needs a grab-ready posture and has to pass
    /// [`Self::may_grab`].
    pub fn admit(
        &self,
        point: &ManipulationPoint,
        was_grabbing: bool,
        target_box: Option<&Bounds>,
    ) -> bool {
        point.grabbing && (was_grabbing || (point.palm_down && self.may_grab(point, target_box)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Handedness, SourceId};
    use crate::spatial::{Point3D, Vector3D};

    fn point(x: f32, grabbing: bool) -> ManipulationPoint {
        ManipulationPoint {
            source: SourceId(1),
            handedness: Handedness::Left,
            position: Point3D::new(x, 0.0, 0.0),
            orientation: None,
            grabbing,
            pinching: grabbing,
            palm_down: true,
            radius: 0.05,
            just_started: false,
            has_haptics: false,
        }
    }

    fn unit_box() -> Bounds {
        Bounds::centered(Point3D::ORIGIN, Vector3D::splat(0.5))
    }

    #[test]
    fn test_radius_reaches_box() {
        let gate = CollisionGate::default();
        assert!(gate.may_grab(&point(0.54, true), Some(&unit_box())));
        assert!(!gate.may_grab(&point(0.6, true), Some(&unit_box())));
    }

    #[test]
    fn test_disabled_or_missing_box_always_passes() {
        let far = point(10.0, true);
        assert!(CollisionGate::new(false).may_grab(&far, Some(&unit_box())));
        assert!(CollisionGate::default().may_grab(&far, None));
        assert!(CollisionGate::default().may_grab(&far, Some(&Bounds::empty())));
    }

    #[test]
    fn test_hysteresis() {
        let gate = CollisionGate::default();
        let drifted = point(3.0, true);
        assert!(!gate.admit(&drifted, false, Some(&unit_box())));
        assert!(gate.admit(&drifted, true, Some(&unit_box())));
        // A released gesture ends the grab regardless of history
        assert!(!gate.admit(&point(0.0, false), true, Some(&unit_box())));
    }

    #[test]
    fn test_palm_posture_gates_only_new_grabs() {
        let gate = CollisionGate::default();
        let mut rolled = point(0.0, true);
        rolled.palm_down = false;
        assert!(!gate.admit(&rolled, false, Some(&unit_box())));
        assert!(gate.admit(&rolled, true, Some(&unit_box())));
    }
}
