//! Scenario tests for the collision grid
//!
//! Scenes are built with [`SceneTree`] and the grid reports through a
//! [`RecordingBridge`] so tests can assert on the exact call sequence.

mod static_scan;

use crate::foundation::collections::{ColliderHandle, NodeId};
use crate::foundation::math::Vec3;
use crate::physics::{ColliderComponent, CollisionShape, RegistrationBridge};
use crate::scene::SceneTree;

/// A single call received by [`RecordingBridge`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BridgeCall {
    Register(ColliderHandle),
    Unregister(ColliderHandle),
}

/// Bridge that records every call in order
#[derive(Debug, Default)]
pub(super) struct RecordingBridge {
    pub calls: Vec<BridgeCall>,
}

impl RecordingBridge {
    /// Drain the recorded calls
    pub fn take(&mut self) -> Vec<BridgeCall> {
        std::mem::take(&mut self.calls)
    }
}

impl RegistrationBridge for RecordingBridge {
    fn register(&mut self, collider: ColliderHandle) {
        self.calls.push(BridgeCall::Register(collider));
    }

    fn unregister(&mut self, collider: ColliderHandle) {
        self.calls.push(BridgeCall::Unregister(collider));
    }
}

/// Add a 1x1x1 static box under `parent` at a local position
pub(super) fn add_wall(scene: &mut SceneTree, parent: NodeId, position: Vec3) -> ColliderHandle {
    let node = scene.create_child(parent, "wall").unwrap();
    scene.set_local_position(node, position).unwrap();
    scene
        .attach_collider(node, ColliderComponent::new(CollisionShape::aabb(Vec3::new(1.0, 1.0, 1.0))))
        .unwrap()
}

/// Add a root-level actor at a world position
pub(super) fn add_actor(scene: &mut SceneTree, position: Vec3) -> NodeId {
    let actor = scene.create_node("actor");
    scene.set_local_position(actor, position).unwrap();
    actor
}
