//! Scene graph traversal trait and bounding volumes
//!
//! The grid only needs three things from a scene: where a node is, whether
//! it carries a static collider, and what its children are. Any hierarchy
//! that can answer those can be scanned.

use crate::foundation::collections::{ColliderHandle, NodeId};
use crate::foundation::math::Vec3;

/// Axis-Aligned Bounding Box for spatial queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this AABB intersects another AABB
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }
}

/// Read-only traversal of a transform hierarchy
///
/// Handles that no longer resolve yield `None` / an empty slice; callers
/// treat that as "nothing here" rather than an error.
pub trait SceneGraph {
    /// World-space position of a node
    fn world_position(&self, node: NodeId) -> Option<Vec3>;

    /// The node's collider, if it exposes the static-collidable capability
    fn static_collider(&self, node: NodeId) -> Option<ColliderHandle>;

    /// Direct children of a node
    fn children(&self, node: NodeId) -> &[NodeId];
}
