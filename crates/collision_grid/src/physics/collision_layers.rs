//! Collision layer system for filtering collision detection
//!
//! Layers are bit positions 0-31. Bits 0-7 are reserved for engine use,
//! game layers start at bit 8.

/// Collision layer definitions as bitmask constants
pub struct CollisionLayers;

impl CollisionLayers {
    /// No collision layer
    pub const NONE: u32 = 0;

    /// All collision layers
    pub const ALL: u32 = 0xFFFF_FFFF;

    /// Default layer for untagged colliders
    pub const DEFAULT: u32 = 1 << 0;

    /// Transparent effects, never solid
    pub const TRANSPARENT_FX: u32 = 1 << 1;

    /// Excluded from ray casts
    pub const IGNORE_RAYCAST: u32 = 1 << 2;

    /// Water volumes
    pub const WATER: u32 = 1 << 4;

    /// UI elements
    pub const UI: u32 = 1 << 5;

    /// Floors and other walkable ground
    pub const GROUND: u32 = 1 << 8;

    /// Player characters
    pub const PLAYER: u32 = 1 << 9;

    /// Enemy characters
    pub const ENEMY: u32 = 1 << 10;

    /// Bit for a layer index in `0..32`
    ///
    /// Returns [`NONE`](Self::NONE) for indices outside that range.
    pub const fn layer(index: u32) -> u32 {
        if index < 32 { 1 << index } else { Self::NONE }
    }

    /// Check if two colliders should collide based on their layers and masks
    ///
    /// A's layer must be in B's mask and B's layer must be in A's mask.
    ///
    /// # Example
    /// ```
    /// use collision_grid::physics::CollisionLayers;
    ///
    /// let floor_mask = CollisionLayers::PLAYER | CollisionLayers::ENEMY;
    /// assert!(CollisionLayers::should_collide(
    ///     CollisionLayers::GROUND, floor_mask,
    ///     CollisionLayers::PLAYER, CollisionLayers::ALL,
    /// ));
    /// ```
    pub const fn should_collide(layer_a: u32, mask_a: u32, layer_b: u32, mask_b: u32) -> bool {
        (layer_a & mask_b) != 0 && (layer_b & mask_a) != 0
    }

    /// Helper to create a mask from multiple layers
    pub fn mask(layers: &[u32]) -> u32 {
        layers.iter().fold(0, |acc, &layer| acc | layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_collide_mutual() {
        assert!(CollisionLayers::should_collide(
            CollisionLayers::PLAYER, CollisionLayers::ENEMY,
            CollisionLayers::ENEMY, CollisionLayers::PLAYER,
        ));
    }

    #[test]
    fn test_floors_skip_each_other() {
        let floor_mask = CollisionLayers::mask(&[CollisionLayers::PLAYER, CollisionLayers::ENEMY]);
        assert!(!CollisionLayers::should_collide(
            CollisionLayers::GROUND, floor_mask,
            CollisionLayers::GROUND, floor_mask,
        ));
    }

    #[test]
    fn test_layer_index() {
        assert_eq!(CollisionLayers::layer(8), CollisionLayers::GROUND);
        assert_eq!(CollisionLayers::layer(10), CollisionLayers::ENEMY);
        assert_eq!(CollisionLayers::layer(40), CollisionLayers::NONE);
    }
}
