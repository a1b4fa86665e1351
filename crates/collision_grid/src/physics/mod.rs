//! Physics module: colliders, collision layers and broad-phase registration
//!
//! Only what the activation grid needs from a physics system lives here:
//! the shapes it buckets, the layer filter used by overlap queries, and the
//! registration boundary through which colliders are switched on and off.

pub mod collider;
pub mod collision_layers;
pub mod registration;
pub mod broad_phase;

pub use collider::{ColliderComponent, CollisionShape};
pub use collision_layers::CollisionLayers;
pub use registration::RegistrationBridge;
pub use broad_phase::BroadPhase;
