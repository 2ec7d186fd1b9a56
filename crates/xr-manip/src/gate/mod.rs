//! Collision gating and per-source grab memory

mod collision;
mod memory;

pub use collision::CollisionGate;
pub use memory::{GrabMemory, GrabRecord, GrabTransition};
