//! # Core Module
//!
//! Shared configuration types used by the grid, the map builder and hosts
//! that load them from disk.

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    GridConfig,
    MAX_ACTIVE_RADIUS,
    MapBuilderConfig,
    Config,
    ConfigError,
};
