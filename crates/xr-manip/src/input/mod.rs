//! Input abstraction for tracked hands and controllers
//!
//! Provides:
//! - The per-frame tracked source model (controller-like or hand-like)
//! - Pinch and palm-orientation detection for articulated hands
//! - Sampling of sources into normalized manipulation points

mod source;
mod hand;
mod point;
mod sampler;

pub use source::{
    ControllerState, FrameInput, HandState, Handedness, JointPose, Pose, SourceId, SourceKind,
    TrackedSource,
};
pub use hand::{palm_normal, pinch_distance, synthesize_orientation};
pub use point::ManipulationPoint;
pub use sampler::InputSampler;
