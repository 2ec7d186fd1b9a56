//! In-memory scene graph

use serde::{Deserialize, Serialize};

use super::{NodeId, SceneGraph};
use crate::error::{ManipError, Result};
use crate::spatial::{Bounds, Transform};

/// A node with a local transform and optional local-space geometry bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Transform relative to the parent (or world for roots)
    pub local: Transform,
    /// Mesh bounds in the node's own frame
    pub geometry: Option<Bounds>,
    pub visible: bool,
    pub helper: bool,
}

/// Arena-backed scene graph
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parentless node
    pub fn add_root(&mut self, name: impl Into<String>, local: Transform) -> NodeId {
        self.push(name.into(), None, local)
    }

    /// Add a node under `parent`
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        local: Transform,
    ) -> Result<NodeId> {
        if !self.contains(parent) {
            return Err(ManipError::UnknownNode(parent));
        }
        let id = self.push(name.into(), Some(parent), local);
        self.nodes[parent.0 as usize].children.push(id);
        Ok(id)
    }

    fn push(&mut self, name: String, parent: Option<NodeId>, local: Transform) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SceneNode {
            name,
            parent,
            children: Vec::new(),
            local,
            geometry: None,
            visible: true,
            helper: false,
        });
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0 as usize)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode> {
        self.nodes
            .get_mut(id.0 as usize)
            .ok_or(ManipError::UnknownNode(id))
    }

    /// First node with the given name
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .map(|i| NodeId(i as u32))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn set_geometry(&mut self, id: NodeId, bounds: Bounds) -> Result<()> {
        self.node_mut(id)?.geometry = Some(bounds);
        Ok(())
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<()> {
        self.node_mut(id)?.visible = visible;
        Ok(())
    }

    pub fn set_helper(&mut self, id: NodeId, helper: bool) -> Result<()> {
        self.node_mut(id)?.helper = helper;
        Ok(())
    }

    pub fn local_transform(&self, id: NodeId) -> Option<Transform> {
        self.node(id).map(|n| n.local)
    }

    pub fn set_local_transform(&mut self, id: NodeId, local: Transform) -> Result<()> {
        self.node_mut(id)?.local = local;
        Ok(())
    }

    fn parent_world(&self, id: NodeId) -> Option<Transform> {
        let parent = self.node(id)?.parent?;
        self.world_transform(parent)
    }
}

impl SceneGraph for Scene {
    fn contains(&self, node: NodeId) -> bool {
        (node.0 as usize) < self.nodes.len()
    }

    fn world_transform(&self, node: NodeId) -> Option<Transform> {
        let mut world = self.node(node)?.local;
        let mut current = self.node(node)?.parent;
        while let Some(parent) = current {
            let parent_node = self.node(parent)?;
            world = parent_node.local.compose(&world);
            current = parent_node.parent;
        }
        Some(world)
    }

    fn set_world_transform(&mut self, node: NodeId, world: Transform) -> Result<()> {
        let local = match self.parent_world(node) {
            Some(parent) => parent.localize(&world),
            None => world,
        };
        self.node_mut(node)?.local = local;
        Ok(())
    }

    fn world_bounds(&self, node: NodeId) -> Option<Bounds> {
        if !self.contains(node) {
            return None;
        }

        let mut bounds = Bounds::empty();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let Some(n) = self.node(id) else { continue };
            if n.helper {
                continue;
            }
            if let (Some(geometry), Some(world)) = (n.geometry, self.world_transform(id)) {
                bounds = bounds.union(&geometry.transformed(&world));
            }
            stack.extend(n.children.iter().copied());
        }

        (!bounds.is_empty()).then_some(bounds)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn is_visible(&self, node: NodeId) -> bool {
        self.node(node).map(|n| n.visible).unwrap_or(false)
    }

    fn is_helper(&self, node: NodeId) -> bool {
        self.node(node).map(|n| n.helper).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::{Point3D, Quaternion, Vector3D};
    use std::f32::consts::PI;

    fn cube() -> Bounds {
        Bounds::centered(Point3D::ORIGIN, Vector3D::splat(0.5))
    }

    #[test]
    fn test_world_transform_chain() {
        let mut scene = Scene::new();
        let root = scene.add_root(
            "root",
            Transform::from_position(Point3D::new(1.0, 0.0, 0.0)).with_scale(Vector3D::splat(2.0)),
        );
        let child = scene
            .add_child(root, "child", Transform::from_position(Point3D::new(0.5, 0.0, 0.0)))
            .unwrap();

        let world = scene.world_transform(child).unwrap();
        assert_eq!(world.position, Point3D::new(2.0, 0.0, 0.0));
        assert_eq!(world.scale, Vector3D::splat(2.0));
    }

    #[test]
    fn test_set_world_transform_under_rotated_parent() {
        let mut scene = Scene::new();
        let root = scene.add_root(
            "root",
            Transform::from_position_rotation(
                Point3D::new(0.0, 1.0, 0.0),
                Quaternion::from_axis_angle(Vector3D::UP, PI / 2.0),
            ),
        );
        let child = scene.add_child(root, "child", Transform::identity()).unwrap();

        let target = Transform::from_position(Point3D::new(3.0, 1.0, -2.0));
        scene.set_world_transform(child, target).unwrap();
        let world = scene.world_transform(child).unwrap();
        assert!(world.position.distance(&target.position) < 0.0001);
        assert!(world.rotation.angle_to(&Quaternion::IDENTITY) < 0.001);
    }

    #[test]
    fn test_world_bounds_cover_descendants_but_not_helpers() {
        let mut scene = Scene::new();
        let root = scene.add_root("root", Transform::identity());
        let a = scene
            .add_child(root, "a", Transform::from_position(Point3D::new(-1.0, 0.0, 0.0)))
            .unwrap();
        let b = scene
            .add_child(root, "b", Transform::from_position(Point3D::new(1.0, 0.0, 0.0)))
            .unwrap();
        let gizmo = scene
            .add_child(root, "gizmo", Transform::from_position(Point3D::new(0.0, 9.0, 0.0)))
            .unwrap();
        scene.set_geometry(a, cube()).unwrap();
        scene.set_geometry(b, cube()).unwrap();
        scene.set_geometry(gizmo, cube()).unwrap();
        scene.set_helper(gizmo, true).unwrap();

        let bounds = scene.world_bounds(root).unwrap();
        assert_eq!(bounds.min, Point3D::new(-1.5, -0.5, -0.5));
        assert_eq!(bounds.max, Point3D::new(1.5, 0.5, 0.5));
    }

    #[test]
    fn test_no_geometry_means_no_bounds() {
        let mut scene = Scene::new();
        let root = scene.add_root("empty", Transform::identity());
        assert!(scene.world_bounds(root).is_none());
        assert!(scene.world_bounds(NodeId(42)).is_none());
    }

    #[test]
    fn test_unknown_parent() {
        let mut scene = Scene::new();
        let err = scene.add_child(NodeId(3), "orphan", Transform::identity()).unwrap_err();
        assert!(matches!(err, ManipError::UnknownNode(NodeId(3))));
    }
}
