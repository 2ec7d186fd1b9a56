//! xr-manip: direct manipulation of 3D objects from tracked hands and controllers
//!
//! This crate provides:
//! - 3D spatial math (points, vectors, quaternions, transforms, bounding boxes)
//! - Sampling of tracked controllers and articulated hands into grab points
//! - Collision-gated grabbing with per-source hysteresis
//! - One-hand, translate-only and two-hand (scale/rotate) sessions
//! - Per-object picking inside a compound scene
//! - Frame-rate-independent smoothing of the written transform
//! - Haptic pulse and gizmo point feeds for the host to render

pub mod spatial;
pub mod input;
pub mod gate;
pub mod scene;
pub mod manipulation;
pub mod smoothing;
pub mod feedback;
pub mod config;
pub mod error;
pub mod engine;

// Re-export commonly used types
pub use spatial::{Point3D, Vector3D, Quaternion, Transform, Bounds};
pub use input::{FrameInput, TrackedSource, SourceId, Handedness, ManipulationPoint};
pub use scene::{NodeId, SceneGraph, Scene};
pub use manipulation::ManipulationMode;
pub use feedback::{GizmoPoints, HapticPulse, HapticBackend, GizmoBackend};
pub use config::ManipulationConfig;
pub use error::{ManipError, Result};
pub use engine::{ManipulationEngine, FrameReport, SessionHandle};
