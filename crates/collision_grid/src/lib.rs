//! # Collision Grid
//!
//! Uniform-grid collision activation for scenes with a lot of static
//! geometry and a few moving actors.
//!
//! ## Features
//!
//! - **Cell Index**: floor-divided integer cells, 8x8x8 by default
//! - **Static Scan**: one lazy pass buckets every static box collider and unregisters it
//! - **Activation Diff**: only cells entering or leaving an actor's neighborhood touch the physics system
//! - **Registration Bridge**: physics is injected as a trait, not reached through a global
//! - **Map Builder**: layered character grids become positioned object trees
//!
//! ## Quick Start
//!
//! ```rust
//! use collision_grid::prelude::*;
//!
//! let mut builder = MapBuilder::new().with_factory('w', |_, size| {
//!     Some(GameObject::new("wall").with_collider(ColliderComponent::new(CollisionShape::aabb(size))))
//! });
//! let map = builder.build(&[["w_w", "www"]]);
//!
//! let mut scene = SceneTree::new();
//! let root = scene.instantiate(None, map).unwrap();
//! let player = scene.create_node("player");
//!
//! let mut broad_phase = BroadPhase::new();
//! broad_phase.register_scene(&scene);
//!
//! let mut grid = CollisionGrid::new(&mut broad_phase).with_root(root);
//! grid.register_dynamic(player);
//! let report = grid.step(&scene);
//!
//! assert_eq!(report.colliders_enabled, 5);
//! assert_eq!(grid.metrics().static_colliders, 5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::cast_precision_loss, clippy::cast_possible_truncation)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod map;
pub mod physics;
pub mod scene;
pub mod spatial;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        core::config::{Config, ConfigError, GridConfig, MapBuilderConfig},
        foundation::{
            collections::{ColliderHandle, NodeId},
            math::{Transform, Vec3},
            time::TickTimer,
        },
        map::{map_extent, MapBuilder, MapExtent},
        physics::{BroadPhase, ColliderComponent, CollisionLayers, CollisionShape, RegistrationBridge},
        scene::{GameObject, SceneError, SceneGraph, SceneTree, AABB},
        spatial::{CellCoord, CollisionGrid, GridMetrics, StepReport},
    };
}
