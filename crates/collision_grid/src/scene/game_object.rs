//! Detached object trees
//!
//! A [`GameObject`] is an owned description of a node and its descendants
//! that is not yet part of any scene. Map factories produce them, the map
//! builder nests them under a root, and [`SceneTree::instantiate`] turns
//! them into live nodes.
//!
//! [`SceneTree::instantiate`]: crate::scene::SceneTree::instantiate

use crate::foundation::math::{Transform, Vec3};
use crate::physics::ColliderComponent;

/// Owned object description with optional collider and children
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    /// Display name
    pub name: String,
    /// Transform relative to the parent object
    pub transform: Transform,
    /// Collider attached to this object
    pub collider: Option<ColliderComponent>,
    /// Child objects
    pub children: Vec<GameObject>,
}

impl GameObject {
    /// Create an empty object at the origin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::identity(),
            collider: None,
            children: Vec::new(),
        }
    }

    /// Builder pattern: set local position
    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    /// Builder pattern: set local scale
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    /// Builder pattern: attach a collider
    #[must_use]
    pub fn with_collider(mut self, collider: ColliderComponent) -> Self {
        self.collider = Some(collider);
        self
    }

    /// Builder pattern: add a child
    #[must_use]
    pub fn with_child(mut self, child: GameObject) -> Self {
        self.children.push(child);
        self
    }

    /// Add a child object
    pub fn add_child(&mut self, child: GameObject) {
        self.children.push(child);
    }

    /// Number of objects in this tree, including `self`
    pub fn object_count(&self) -> usize {
        1 + self.children.iter().map(GameObject::object_count).sum::<usize>()
    }
}
