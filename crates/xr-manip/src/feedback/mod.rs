//! Outward, best-effort signals: haptic pulses and gizmo points

mod gizmo;
mod haptics;

pub use gizmo::{GizmoBackend, GizmoPoints, NullGizmoBackend};
pub use haptics::{HapticBackend, HapticDispatcher, HapticPulse, NullHapticBackend};
