//! Turns a frame's tracked sources into manipulation points

use super::hand::{palm_normal, pinch_distance, synthesize_orientation};
use super::{ControllerState, HandState, ManipulationPoint, SourceKind, TrackedSource};
use crate::config::InputConfig;
use crate::spatial::Transform;

/// Samples each tracked source independently into at most one point
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    config: InputConfig,
}

impl InputSampler {
    pub fn new(config: InputConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: InputConfig) {
        self.config = config;
    }

    /// Sample every source; sources with no resolvable pose are skipped
    pub fn sample(&self, sources: &[TrackedSource], reference: &Transform) -> Vec<ManipulationPoint> {
        sources
            .iter()
            .filter_map(|source| self.sample_source(source, reference))
            .collect()
    }

    pub fn sample_source(
        &self,
        source: &TrackedSource,
        reference: &Transform,
    ) -> Option<ManipulationPoint> {
        let point = match &source.kind {
            SourceKind::Controller(state) => self.sample_controller(source, state, reference),
            SourceKind::Hand(state) => self.sample_hand(source, state, reference),
        };
        if point.is_none() {
            tracing::trace!("{} has no pose this frame", source.id);
        }
        point
    }

    fn sample_controller(
        &self,
        source: &TrackedSource,
        state: &ControllerState,
        reference: &Transform,
    ) -> Option<ManipulationPoint> {
        let pose = state.grip.or(state.target_ray)?.in_space(reference);
        let pressed = state.trigger.max(state.squeeze) > self.config.press_threshold;

        Some(ManipulationPoint {
            source: source.id,
            handedness: source.handedness,
            position: pose.position,
            orientation: Some(pose.orientation),
            grabbing: pressed,
            pinching: false,
            palm_down: true,
            radius: if pressed {
                self.config.controller_grab_radius
            } else {
                self.config.controller_idle_radius
            },
            just_started: false,
            has_haptics: state.haptic_actuator,
        })
    }

    fn sample_hand(
        &self,
        source: &TrackedSource,
        state: &HandState,
        reference: &Transform,
    ) -> Option<ManipulationPoint> {
        let wrist = state.wrist.map(|j| j.in_space(reference));
        let thumb = state.thumb_tip.map(|j| j.in_space(reference).position);
        let index = state.index_tip.map(|j| j.in_space(reference).position);

        let pinching = match (thumb, index) {
            (Some(t), Some(i)) => pinch_distance(t, i) < self.config.pinch_distance,
            _ => false,
        };

        // Starting a grab also needs the palm turned down; holding one does not
        let palm_down = match (wrist, thumb, index) {
            (Some(w), Some(t), Some(i)) => palm_normal(source.handedness, w.position, i, t)
                .map(|n| n.y <= self.config.palm_down_threshold)
                .unwrap_or(false),
            _ => false,
        };

        if let (true, Some(w), Some(t), Some(i)) = (pinching, wrist, thumb, index) {
            let orientation = w
                .orientation
                .or_else(|| synthesize_orientation(w.position, i, t));
            return Some(ManipulationPoint {
                source: source.id,
                handedness: source.handedness,
                position: t.midpoint(&i),
                orientation,
                grabbing: true,
                pinching,
                palm_down,
                radius: self.config.hand_grab_radius,
                just_started: false,
                has_haptics: false,
            });
        }

        let wrist = wrist?;
        Some(ManipulationPoint {
            source: source.id,
            handedness: source.handedness,
            position: wrist.position,
            orientation: wrist.orientation,
            grabbing: false,
            pinching,
            palm_down,
            radius: self.config.hand_idle_radius,
            just_started: false,
            has_haptics: false,
        })
    }
}
