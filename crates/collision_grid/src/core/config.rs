//! # Unified Configuration
//!
//! Settings for the collision grid and the map builder. Both structs are
//! serializable and implement [`Config`], so hosts can ship them as TOML or
//! RON files next to their map data.
//!
//! ```toml
//! # grid.toml
//! cell_size = [8.0, 8.0, 8.0]
//! active_radius = 1
//! ```

use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec3;

pub use crate::config::{Config, ConfigError};

/// # Collision Grid Configuration
///
/// Cell dimensions and the activation neighborhood used by
/// [`CollisionGrid`](crate::spatial::CollisionGrid).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Size of one cell along each axis, in world units
    pub cell_size: Vec3,
    /// Number of cells kept active around each dynamic object's cell, per axis
    ///
    /// Every step visits `(2r + 1)^3` cells per dynamic object, so the
    /// radius is capped at [`MAX_ACTIVE_RADIUS`].
    pub active_radius: u32,
}

/// Largest accepted activation radius (`65^3` cells per dynamic object)
pub const MAX_ACTIVE_RADIUS: u32 = 32;

impl GridConfig {
    /// Create a configuration with a uniform cell size
    pub fn new(cell_size: f32, active_radius: u32) -> Self {
        Self {
            cell_size: Vec3::new(cell_size, cell_size, cell_size),
            active_radius,
        }
    }

    /// Set a per-axis cell size
    #[must_use]
    pub fn with_cell_size(mut self, cell_size: Vec3) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set the activation radius in cells
    #[must_use]
    pub fn with_active_radius(mut self, active_radius: u32) -> Self {
        self.active_radius = active_radius;
        self
    }

    /// Number of cells each dynamic object activates: `(2r + 1)^3`
    pub fn neighborhood_volume(&self) -> usize {
        let side = (self.active_radius as usize).saturating_mul(2).saturating_add(1);
        side.saturating_mul(side).saturating_mul(side)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "cell size must be positive and finite on every axis, got {:?}",
                self.cell_size.as_slice()
            )));
        }
        if self.active_radius > MAX_ACTIVE_RADIUS {
            return Err(ConfigError::Invalid(format!(
                "active radius must be at most {MAX_ACTIVE_RADIUS}, got {}",
                self.active_radius
            )));
        }
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(8.0, 1)
    }
}

impl Config for GridConfig {}

/// # Map Builder Configuration
///
/// Placement parameters for [`MapBuilder`](crate::map::MapBuilder).
///
/// Alignment is per axis: `-1` puts the grid's first cell at the origin,
/// `0` centers the grid on the origin, `1` puts the last cell at the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapBuilderConfig {
    /// World-space offset of the aligned grid
    pub origin: Vec3,
    /// Alignment per axis, each component in `[-1, 1]`
    pub alignment: Vec3,
    /// Distance between neighboring grid cells per axis
    pub spacing: Vec3,
    /// Nominal object size handed to every factory
    pub default_size: Vec3,
    /// Characters that never produce an object
    pub ignore_chars: Vec<char>,
}

impl MapBuilderConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let vectors = [
            ("origin", &self.origin),
            ("alignment", &self.alignment),
            ("spacing", &self.spacing),
            ("default_size", &self.default_size),
        ];
        for (name, v) in vectors {
            if v.iter().any(|c| !c.is_finite()) {
                return Err(ConfigError::Invalid(format!("{name} must be finite, got {:?}", v.as_slice())));
            }
        }

        if self.alignment.iter().any(|a| !(-1.0..=1.0).contains(a)) {
            return Err(ConfigError::Invalid(format!(
                "alignment components must lie in [-1, 1], got {:?}",
                self.alignment.as_slice()
            )));
        }

        Ok(())
    }
}

impl Default for MapBuilderConfig {
    fn default() -> Self {
        Self {
            origin: Vec3::zeros(),
            alignment: Vec3::zeros(),
            spacing: Vec3::new(1.0, 1.0, 1.0),
            default_size: Vec3::new(1.0, 1.0, 1.0),
            ignore_chars: vec!['_', ' '],
        }
    }
}

impl Config for MapBuilderConfig {}
