//! Handle-based transform hierarchy
//!
//! Nodes and colliders live in slot maps; everything outside the tree
//! refers to them through [`NodeId`] / [`ColliderHandle`]. A handle whose
//! node has been despawned simply stops resolving.

use thiserror::Error;

use crate::foundation::collections::{ColliderHandle, ColliderMap, NodeId, NodeMap};
use crate::foundation::math::{Transform, Vec3};
use crate::physics::ColliderComponent;
use crate::scene::game_object::GameObject;
use crate::scene::scene_graph::{SceneGraph, AABB};

/// Scene tree errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The node handle does not resolve
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// The collider handle does not resolve
    #[error("Collider not found: {0:?}")]
    ColliderNotFound(ColliderHandle),

    /// Re-parenting would make a node its own ancestor
    #[error("Parenting {child:?} under {parent:?} would create a cycle")]
    CycleDetected {
        /// Node being moved
        child: NodeId,
        /// Requested parent
        parent: NodeId,
    },
}

/// A node in the scene tree
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Display name
    pub name: String,
    /// Transform relative to the parent
    pub transform: Transform,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    collider: Option<ColliderHandle>,
}

impl SceneNode {
    fn new(name: String, transform: Transform) -> Self {
        Self {
            name,
            transform,
            parent: None,
            children: Vec::new(),
            collider: None,
        }
    }

    /// Parent node, `None` for roots
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Attached collider
    pub fn collider(&self) -> Option<ColliderHandle> {
        self.collider
    }
}

#[derive(Debug, Clone)]
struct ColliderSlot {
    node: NodeId,
    component: ColliderComponent,
}

/// Owning container for scene nodes and their colliders
#[derive(Debug, Default)]
pub struct SceneTree {
    nodes: NodeMap<SceneNode>,
    colliders: ColliderMap<ColliderSlot>,
}

impl SceneTree {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a root node at the origin
    pub fn create_node(&mut self, name: impl Into<String>) -> NodeId {
        self.nodes.insert(SceneNode::new(name.into(), Transform::identity()))
    }

    /// Create a node under `parent`
    pub fn create_child(&mut self, parent: NodeId, name: impl Into<String>) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NodeNotFound(parent));
        }
        let child = self.create_node(name);
        self.link(child, parent);
        Ok(child)
    }

    /// Turn a detached object tree into live nodes under `parent`
    /// (or as a new root) and return the handle of its top node
    pub fn instantiate(&mut self, parent: Option<NodeId>, object: GameObject) -> Result<NodeId, SceneError> {
        if let Some(parent) = parent {
            if !self.nodes.contains_key(parent) {
                return Err(SceneError::NodeNotFound(parent));
            }
        }
        Ok(self.spawn_object(parent, object))
    }

    fn spawn_object(&mut self, parent: Option<NodeId>, object: GameObject) -> NodeId {
        let GameObject { name, transform, collider, children } = object;

        let node = self.nodes.insert(SceneNode::new(name, transform));
        if let Some(parent) = parent {
            self.link(node, parent);
        }
        if let Some(component) = collider {
            let handle = self.colliders.insert(ColliderSlot { node, component });
            self.nodes[node].collider = Some(handle);
        }
        for child in children {
            self.spawn_object(Some(node), child);
        }
        node
    }

    fn link(&mut self, child: NodeId, parent: NodeId) {
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    fn unlink(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child].parent.take() {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.children.retain(|&c| c != child);
            }
        }
    }

    /// Move `child` under `parent`, or make it a root with `None`
    ///
    /// The child keeps its local transform.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> Result<(), SceneError> {
        if !self.nodes.contains_key(child) {
            return Err(SceneError::NodeNotFound(child));
        }
        if let Some(parent) = parent {
            if !self.nodes.contains_key(parent) {
                return Err(SceneError::NodeNotFound(parent));
            }
            if self.ancestors_inclusive(parent).any(|ancestor| ancestor == child) {
                return Err(SceneError::CycleDetected { child, parent });
            }
        }

        self.unlink(child);
        if let Some(parent) = parent {
            self.link(child, parent);
        }
        Ok(())
    }

    /// `node`, its parent, its grandparent, ... up to the root
    fn ancestors_inclusive(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(node), move |&current| {
            self.nodes.get(current).and_then(SceneNode::parent)
        })
    }

    /// Attach a collider to `node`, replacing any collider it already had
    pub fn attach_collider(&mut self, node: NodeId, component: ColliderComponent) -> Result<ColliderHandle, SceneError> {
        if !self.nodes.contains_key(node) {
            return Err(SceneError::NodeNotFound(node));
        }
        self.detach_collider(node);
        let handle = self.colliders.insert(ColliderSlot { node, component });
        self.nodes[node].collider = Some(handle);
        Ok(handle)
    }

    /// Remove the collider attached to `node`
    pub fn detach_collider(&mut self, node: NodeId) -> Option<ColliderComponent> {
        let handle = self.nodes.get_mut(node)?.collider.take()?;
        self.colliders.remove(handle).map(|slot| slot.component)
    }

    /// Set a node's position relative to its parent
    pub fn set_local_position(&mut self, node: NodeId, position: Vec3) -> Result<(), SceneError> {
        let node_ref = self.nodes.get_mut(node).ok_or(SceneError::NodeNotFound(node))?;
        node_ref.transform.position = position;
        Ok(())
    }

    /// Offset a node's local position
    pub fn translate(&mut self, node: NodeId, delta: Vec3) -> Result<(), SceneError> {
        let node_ref = self.nodes.get_mut(node).ok_or(SceneError::NodeNotFound(node))?;
        node_ref.transform.position += delta;
        Ok(())
    }

    /// Remove `node` and its whole subtree, with their colliders
    ///
    /// Returns the number of nodes removed (0 if `node` does not resolve).
    pub fn despawn(&mut self, node: NodeId) -> usize {
        if !self.nodes.contains_key(node) {
            return 0;
        }
        self.unlink(node);

        let mut removed = 0;
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(scene_node) = self.nodes.remove(current) {
                if let Some(handle) = scene_node.collider {
                    self.colliders.remove(handle);
                }
                stack.extend(scene_node.children);
                removed += 1;
            }
        }
        removed
    }

    /// Look up a node
    pub fn node(&self, node: NodeId) -> Option<&SceneNode> {
        self.nodes.get(node)
    }

    /// Look up a node mutably
    pub fn node_mut(&mut self, node: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(node)
    }

    /// First node with the given name, in no particular order
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().find(|(_, n)| n.name == name).map(|(id, _)| id)
    }

    /// Nodes without a parent
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().filter(|(_, n)| n.parent.is_none()).map(|(id, _)| id)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the scene has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Composed transform from the root down to `node`
    pub fn world_transform(&self, node: NodeId) -> Option<Transform> {
        if !self.nodes.contains_key(node) {
            return None;
        }
        let chain: Vec<NodeId> = self.ancestors_inclusive(node).collect();
        let world = chain
            .iter()
            .rev()
            .fold(Transform::identity(), |parent, &id| parent.combine(&self.nodes[id].transform));
        Some(world)
    }

    /// Collider component behind a handle
    pub fn collider(&self, handle: ColliderHandle) -> Option<&ColliderComponent> {
        self.colliders.get(handle).map(|slot| &slot.component)
    }

    /// Node a collider is attached to
    pub fn collider_node(&self, handle: ColliderHandle) -> Option<NodeId> {
        self.colliders.get(handle).map(|slot| slot.node)
    }

    /// World-space bounds of a collider
    pub fn collider_world_bounds(&self, handle: ColliderHandle) -> Option<AABB> {
        let slot = self.colliders.get(handle)?;
        let world = self.world_transform(slot.node)?;
        Some(slot.component.shape.world_bounds(&world))
    }

    /// All collider handles (unordered)
    pub fn collider_handles(&self) -> impl Iterator<Item = ColliderHandle> + '_ {
        self.colliders.keys()
    }

    /// Number of colliders
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }
}

impl SceneGraph for SceneTree {
    fn world_position(&self, node: NodeId) -> Option<Vec3> {
        self.world_transform(node).map(|t| t.position)
    }

    fn static_collider(&self, node: NodeId) -> Option<ColliderHandle> {
        let handle = self.nodes.get(node)?.collider?;
        self.colliders
            .get(handle)
            .filter(|slot| slot.component.is_static_box())
            .map(|_| handle)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(node).map_or(&[], |n| n.children.as_slice())
    }
}
