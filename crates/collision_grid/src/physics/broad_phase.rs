//! Broad-phase registry
//!
//! Keeps the set of colliders that currently take part in collision
//! detection and answers overlap queries against them. This is the
//! in-crate [`RegistrationBridge`] implementation: hosts with their own
//! physics world implement the trait themselves instead.

use std::collections::HashSet;

use crate::foundation::collections::ColliderHandle;
use crate::physics::collision_layers::CollisionLayers;
use crate::physics::registration::RegistrationBridge;
use crate::scene::{SceneTree, AABB};

/// Set of colliders registered for collision detection
#[derive(Debug, Default)]
pub struct BroadPhase {
    registered: HashSet<ColliderHandle>,
    register_calls: u64,
    unregister_calls: u64,
}

impl BroadPhase {
    /// Create an empty broad phase
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every collider in `scene`, the way a physics world picks up
    /// colliders as soon as they are spawned
    pub fn register_scene(&mut self, scene: &SceneTree) {
        for handle in scene.collider_handles() {
            self.register(handle);
        }
    }

    /// Check if a collider is registered
    pub fn is_registered(&self, collider: ColliderHandle) -> bool {
        self.registered.contains(&collider)
    }

    /// Number of registered colliders
    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }

    /// Iterate over registered colliders (unordered)
    pub fn registered(&self) -> impl Iterator<Item = ColliderHandle> + '_ {
        self.registered.iter().copied()
    }

    /// Total number of `register` calls received
    pub fn register_calls(&self) -> u64 {
        self.register_calls
    }

    /// Total number of `unregister` calls received
    pub fn unregister_calls(&self) -> u64 {
        self.unregister_calls
    }

    /// Registered colliders whose world bounds intersect `bounds` and whose
    /// layers pass the mutual layer/mask test against `layer` / `mask`
    ///
    /// Colliders whose node no longer exists are skipped. Results are sorted
    /// by handle so repeated queries are stable.
    pub fn query_overlaps(&self, scene: &SceneTree, bounds: &AABB, layer: u32, mask: u32) -> Vec<ColliderHandle> {
        let mut hits: Vec<ColliderHandle> = self
            .registered
            .iter()
            .copied()
            .filter(|&handle| {
                let Some(collider) = scene.collider(handle) else {
                    return false;
                };
                if !CollisionLayers::should_collide(layer, mask, collider.layer, collider.mask) {
                    return false;
                }
                scene
                    .collider_world_bounds(handle)
                    .is_some_and(|other| bounds.intersects(&other))
            })
            .collect();
        hits.sort_unstable();
        hits
    }

    /// Drop every registration
    pub fn clear(&mut self) {
        self.registered.clear();
    }
}

impl RegistrationBridge for BroadPhase {
    fn register(&mut self, collider: ColliderHandle) {
        self.register_calls += 1;
        if !self.registered.insert(collider) {
            log::trace!("BroadPhase: {:?} already registered", collider);
        }
    }

    fn unregister(&mut self, collider: ColliderHandle) {
        self.unregister_calls += 1;
        self.registered.remove(&collider);
    }
}
