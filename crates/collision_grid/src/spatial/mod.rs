//! Spatial partitioning for collision activation
//!
//! Maps world positions to integer grid cells and keeps static colliders
//! registered only in the cells around dynamic objects.

mod cell;
mod collision_grid;

#[cfg(test)]
mod tests;

pub use cell::CellCoord;
pub use collision_grid::{CollisionGrid, GridMetrics, StepReport};
