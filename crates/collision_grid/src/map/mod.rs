//! Map building from character grids
//!
//! Turns layered text maps into [`GameObject`](crate::scene::GameObject)
//! trees ready to be instantiated into a scene and scanned by the grid.

mod map_builder;

pub use map_builder::{map_extent, MapBuilder, MapExtent, ObjectFactory, MAP_ROOT_NAME};
