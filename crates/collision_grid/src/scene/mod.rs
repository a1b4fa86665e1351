//! Scene module: transform hierarchy the collision grid scans
//!
//! ## Architecture
//!
//! ```text
//! GameObject (detached tree, e.g. from the map builder)
//!      ↓ instantiate
//! SceneTree (nodes + colliders behind handles)
//!      ↓ SceneGraph
//! CollisionGrid (static scan, actor positions)
//! ```

mod game_object;
mod scene_graph;
mod scene_tree;

pub use game_object::GameObject;
pub use scene_graph::{SceneGraph, AABB};
pub use scene_tree::{SceneError, SceneNode, SceneTree};
