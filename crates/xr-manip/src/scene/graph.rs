//! Scene graph seam

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::spatial::{Bounds, Transform};

/// Handle to a node in the host's scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// What the engine needs from a scene graph
pub trait SceneGraph {
    /// Whether `node` exists
    fn contains(&self, node: NodeId) -> bool;

    /// World transform of `node`
    fn world_transform(&self, node: NodeId) -> Option<Transform>;

    /// Place `node` at `world`, converting into its parent's frame as needed
    fn set_world_transform(&mut self, node: NodeId, world: Transform) -> Result<()>;

    /// Fresh world-space box around `node` and its descendants.
    /// `None` (or an empty box) when there is no geometry.
    fn world_bounds(&self, node: NodeId) -> Option<Bounds>;

    /// Direct children of `node`
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    fn is_visible(&self, node: NodeId) -> bool;

    /// Gizmos, handles and other helpers that are never grab targets
    fn is_helper(&self, node: NodeId) -> bool;
}
