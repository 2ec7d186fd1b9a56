//! Scene access for manipulation targets
//!
//! The engine never owns the scene. It reads and writes transforms through
//! the [`SceneGraph`] trait; [`Scene`] is an in-memory implementation for
//! hosts without their own graph, tests and the simulator.

mod graph;
mod memory;
mod resolver;

pub use graph::{NodeId, SceneGraph};
pub use memory::{Scene, SceneNode};
pub use resolver::TargetResolver;
