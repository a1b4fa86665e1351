//! Collider shapes and the collider component attached to scene nodes
//!
//! Shapes are stored in model space and moved to world space on demand,
//! using the owning node's world transform.

use crate::foundation::math::{Transform, Vec3};
use crate::physics::collision_layers::CollisionLayers;
use crate::scene::AABB;

/// Collision shape types (stored in MODEL SPACE)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionShape {
    /// Axis-aligned box, offset from the node origin
    Aabb {
        /// Box center relative to the node origin
        center: Vec3,
        /// Half the box size along each axis
        half_extents: Vec3,
    },
    /// Sphere, offset from the node origin
    Sphere {
        /// Sphere center relative to the node origin
        center: Vec3,
        /// Sphere radius
        radius: f32,
    },
}

impl CollisionShape {
    /// Axis-aligned box centered on the node with the given full size
    pub fn aabb(size: Vec3) -> Self {
        Self::Aabb {
            center: Vec3::zeros(),
            half_extents: size * 0.5,
        }
    }

    /// Sphere centered at `center` relative to the node
    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Self::Sphere { center, radius }
    }

    /// World-space bounds of this shape for a node with the given world transform
    ///
    /// Rotation is ignored for boxes: they stay axis-aligned, only scale applies.
    pub fn world_bounds(&self, world: &Transform) -> AABB {
        match *self {
            Self::Aabb { center, half_extents } => {
                let extents = half_extents.component_mul(&world.scale.abs());
                AABB::from_center_extents(world.transform_point(center), extents)
            }
            Self::Sphere { center, radius } => {
                let scaled = radius * world.scale.abs().max();
                AABB::from_center_extents(world.transform_point(center), Vec3::new(scaled, scaled, scaled))
            }
        }
    }
}

/// Collider attached to a scene node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderComponent {
    /// The collision shape
    pub shape: CollisionShape,

    /// Collision layer bitmask (what layer is this collider on?)
    pub layer: u32,

    /// Collision mask (what layers can this collider collide with?)
    pub mask: u32,

    /// Is this a trigger volume (reports overlaps but no physical response)?
    pub is_trigger: bool,
}

impl ColliderComponent {
    /// Create a new collider on every layer, colliding with every layer
    pub fn new(shape: CollisionShape) -> Self {
        Self {
            shape,
            layer: CollisionLayers::ALL,
            mask: CollisionLayers::ALL,
            is_trigger: false,
        }
    }

    /// Create a collider with specific layer and mask
    #[must_use]
    pub fn with_layers(mut self, layer: u32, mask: u32) -> Self {
        self.layer = layer;
        self.mask = mask;
        self
    }

    /// Mark this as a trigger volume
    #[must_use]
    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Whether this collider is an axis-aligned box, the kind of collider
    /// the grid treats as static geometry
    pub fn is_static_box(&self) -> bool {
        matches!(self.shape, CollisionShape::Aabb { .. })
    }
}
