//! Per-object target picking inside a compound root

use super::{NodeId, SceneGraph};
use crate::input::ManipulationPoint;

/// Picks which sub-object of a root a new grab attaches to
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetResolver;

impl TargetResolver {
    pub fn new() -> Self {
        Self
    }

    /// Sub-object of `root` touched by `point` whose box center is nearest.
    ///
    /// Walks the subtree below `root` (the root itself is never a candidate)
    /// without descending into helpers or invisible nodes. A node qualifies
    /// when its world box lies within the point's radius. Ranking by center
    /// distance rather than surface distance prefers compact objects over
    /// large ones that enclose the point.
    pub fn resolve<S: SceneGraph + ?Sized>(
        &self,
        scene: &S,
        root: NodeId,
        point: &ManipulationPoint,
    ) -> Option<NodeId> {
        let mut best: Option<(NodeId, f32)> = None;
        let mut stack = scene.children(root);

        while let Some(node) = stack.pop() {
            if node == root || scene.is_helper(node) || !scene.is_visible(node) {
                continue;
            }
            stack.extend(scene.children(node));

            let Some(bounds) = scene.world_bounds(node) else {
                continue;
            };
            let Some(surface) = bounds.distance_to(point.position) else {
                continue;
            };
            if surface > point.radius {
                continue;
            }

            let center = bounds.center().distance_squared(&point.position);
            if best.map_or(true, |(_, d)| center < d) {
                best = Some((node, center));
            }
        }

        best.map(|(node, _)| node)
    }
}
