//! Handle types for stable, non-owning references into scene storage

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Handle to a node in a [`SceneTree`](crate::scene::SceneTree)
    pub struct NodeId;

    /// Handle to a collider attached to a scene node
    pub struct ColliderHandle;
}

/// Handle-based map for scene nodes
pub type NodeMap<T> = SlotMap<NodeId, T>;

/// Handle-based map for colliders
pub type ColliderMap<T> = SlotMap<ColliderHandle, T>;
