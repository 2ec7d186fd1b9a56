//! Spatial primitives for tracked-space manipulation
//!
//! Uses the tracking runtimes' right-handed coordinate system:
//! - X: Right (+) / Left (-)
//! - Y: Up (+) / Down (-)
//! - Z: Backward (+) / Forward (-)
//!
//! All distances are meters.

mod point3d;
mod vector3d;
mod quaternion;
mod transform;
mod bounds;

pub use point3d::Point3D;
pub use vector3d::Vector3D;
pub use quaternion::Quaternion;
pub use transform::Transform;
pub use bounds::Bounds;
