//! Character-grid map builder
//!
//! Map data is indexed `[layer][row][column]`: layers stack along Y, rows
//! run along Z and columns along X. Rows may have different lengths.
//!
//! ```text
//! layer 0        world (alignment 0, spacing 1)
//!   "y_"   ->    y at (-0.5, 0, -0.5)
//!   "_y"   ->    y at ( 0.5, 0,  0.5)
//! ```

use std::collections::HashMap;

use crate::core::config::{ConfigError, MapBuilderConfig};
use crate::foundation::math::Vec3;
use crate::scene::GameObject;

/// Name given to the object every build returns
pub const MAP_ROOT_NAME: &str = "MapRoot";

/// Produces an object for a grid character from its world position and
/// the builder's nominal size; `None` places nothing
pub type ObjectFactory<'a> = Box<dyn FnMut(Vec3, Vec3) -> Option<GameObject> + 'a>;

/// Size of a map along each world axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapExtent {
    /// Longest row, in characters (X)
    pub columns: usize,
    /// Number of layers (Y)
    pub layers: usize,
    /// Most rows in any layer (Z)
    pub rows: usize,
}

impl MapExtent {
    /// Extent as `(columns, layers, rows)` floats on `(x, y, z)`
    pub fn as_vec3(&self) -> Vec3 {
        Vec3::new(self.columns as f32, self.layers as f32, self.rows as f32)
    }
}

/// Measure a map without building it
pub fn map_extent<L, R>(map: &[L]) -> MapExtent
where
    L: AsRef<[R]>,
    R: AsRef<str>,
{
    let mut extent = MapExtent {
        layers: map.len(),
        ..MapExtent::default()
    };
    for layer in map {
        let rows = layer.as_ref();
        extent.rows = extent.rows.max(rows.len());
        for row in rows {
            extent.columns = extent.columns.max(row.as_ref().chars().count());
        }
    }
    extent
}

/// Expands character grids into positioned object trees
pub struct MapBuilder<'a> {
    config: MapBuilderConfig,
    factories: HashMap<char, ObjectFactory<'a>>,
}

impl<'a> MapBuilder<'a> {
    /// Create a builder with default placement and no factories
    pub fn new() -> Self {
        Self {
            config: MapBuilderConfig::default(),
            factories: HashMap::new(),
        }
    }

    /// Create a builder from a validated configuration
    pub fn with_config(config: MapBuilderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            factories: HashMap::new(),
        })
    }

    /// Builder pattern: world offset of the aligned grid
    #[must_use]
    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.config.origin = origin;
        self
    }

    /// Builder pattern: per-axis alignment (-1 negative edge, 0 centered, 1 positive edge)
    #[must_use]
    pub fn with_alignment(mut self, alignment: Vec3) -> Self {
        self.config.alignment = alignment;
        self
    }

    /// Builder pattern: distance between neighboring cells per axis
    #[must_use]
    pub fn with_spacing(mut self, spacing: Vec3) -> Self {
        self.config.spacing = spacing;
        self
    }

    /// Builder pattern: nominal size passed to factories
    #[must_use]
    pub fn with_default_size(mut self, size: Vec3) -> Self {
        self.config.default_size = size;
        self
    }

    /// Builder pattern: register a factory for `ch`, replacing any previous one
    #[must_use]
    pub fn with_factory<F>(mut self, ch: char, factory: F) -> Self
    where
        F: FnMut(Vec3, Vec3) -> Option<GameObject> + 'a,
    {
        self.register(ch, factory);
        self
    }

    /// Register a factory for `ch`, replacing any previous one
    pub fn register<F>(&mut self, ch: char, factory: F) -> &mut Self
    where
        F: FnMut(Vec3, Vec3) -> Option<GameObject> + 'a,
    {
        self.factories.insert(ch, Box::new(factory));
        self
    }

    /// Treat `ch` as empty space
    pub fn add_ignore_char(&mut self, ch: char) -> &mut Self {
        if !self.config.ignore_chars.contains(&ch) {
            self.config.ignore_chars.push(ch);
        }
        self
    }

    /// Check if `ch` is treated as empty space
    pub fn is_ignored(&self, ch: char) -> bool {
        self.config.ignore_chars.contains(&ch)
    }

    /// Current placement configuration
    pub fn config(&self) -> &MapBuilderConfig {
        &self.config
    }

    /// World position of a grid coordinate for a map of the given extent
    pub fn position_of(&self, column: usize, layer: usize, row: usize, extent: &MapExtent) -> Vec3 {
        let grid = Vec3::new(column as f32, layer as f32, row as f32);
        let offset = (extent.as_vec3() - Vec3::repeat(1.0)).component_mul(&(self.config.alignment + Vec3::repeat(1.0))) * 0.5;
        self.config.origin + (grid - offset).component_mul(&self.config.spacing)
    }

    /// Build a `MapRoot` object whose children are the factory outputs
    ///
    /// Each produced object gets its local position set to the computed
    /// world position; its scale is left as the factory made it. Ignored
    /// characters and characters without a factory produce nothing.
    pub fn build<L, R>(&mut self, map: &[L]) -> GameObject
    where
        L: AsRef<[R]>,
        R: AsRef<str>,
    {
        let extent = map_extent(map);
        let size = self.config.default_size;
        let mut root = GameObject::new(MAP_ROOT_NAME);

        for (y, layer) in map.iter().enumerate() {
            for (z, row) in layer.as_ref().iter().enumerate() {
                for (x, ch) in row.as_ref().chars().enumerate() {
                    if self.is_ignored(ch) {
                        continue;
                    }
                    let position = self.position_of(x, y, z, &extent);
                    let Some(factory) = self.factories.get_mut(&ch) else {
                        continue;
                    };
                    if let Some(object) = factory(position, size) {
                        root.add_child(object.with_position(position));
                    }
                }
            }
        }

        log::info!(
            "MapBuilder: built {} objects from a {}x{}x{} map",
            root.children.len(),
            extent.columns,
            extent.layers,
            extent.rows
        );
        root
    }
}

impl Default for MapBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MapBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut chars: Vec<char> = self.factories.keys().copied().collect();
        chars.sort_unstable();
        f.debug_struct("MapBuilder")
            .field("config", &self.config)
            .field("factories", &chars)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn marker(position: Vec3, _size: Vec3) -> Option<GameObject> {
        Some(GameObject::new(format!("marker {position:?}")))
    }

    fn positions(root: &GameObject) -> Vec<Vec3> {
        root.children.iter().map(|c| c.transform.position).collect()
    }

    #[test]
    fn test_two_by_two_is_symmetric_about_origin() {
        let mut builder = MapBuilder::new().with_factory('y', marker);
        let root = builder.build(&[["y_", "_y"]]);

        assert_eq!(root.name, MAP_ROOT_NAME);
        let placed = positions(&root);
        assert_eq!(placed.len(), 2);
        assert_relative_eq!(placed[0], Vec3::new(-0.5, 0.0, -0.5));
        assert_relative_eq!(placed[1], Vec3::new(0.5, 0.0, 0.5));
    }

    #[test]
    fn test_alignment_edges() {
        let map = [["aaa"]];

        let mut negative = MapBuilder::new()
            .with_alignment(Vec3::new(-1.0, 0.0, 0.0))
            .with_factory('a', marker);
        let xs: Vec<f32> = positions(&negative.build(&map)).iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);

        let mut positive = MapBuilder::new()
            .with_alignment(Vec3::new(1.0, 0.0, 0.0))
            .with_factory('a', marker);
        let xs: Vec<f32> = positions(&positive.build(&map)).iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![-2.0, -1.0, 0.0]);
    }

    #[test]
    fn test_origin_spacing_and_layers() {
        let map = [vec!["y"], vec!["y"]];
        let mut builder = MapBuilder::new()
            .with_origin(Vec3::new(0.0, -1.5, 50.0))
            .with_alignment(Vec3::new(0.0, -1.0, 0.0))
            .with_spacing(Vec3::new(2.0, 1.5, 2.0))
            .with_factory('y', marker);

        let placed = positions(&builder.build(&map));
        assert_relative_eq!(placed[0], Vec3::new(0.0, -1.5, 50.0));
        assert_relative_eq!(placed[1], Vec3::new(0.0, 0.0, 50.0));
    }

    #[test]
    fn test_ragged_rows_use_longest_extent() {
        let map = [["w", "www", "ww"]];
        let extent = map_extent(&map);
        assert_eq!(extent, MapExtent { columns: 3, layers: 1, rows: 3 });

        let mut builder = MapBuilder::new().with_factory('w', marker);
        let placed = positions(&builder.build(&map));
        assert_eq!(placed.len(), 6);
        // Row 0 column 0 is offset by the full-width center
        assert_relative_eq!(placed[0], Vec3::new(-1.0, 0.0, -1.0));
    }

    #[test]
    fn test_unknown_and_ignored_chars_are_skipped() {
        let mut builder = MapBuilder::new().with_factory('y', marker).with_factory('.', marker);
        builder.add_ignore_char('.').add_ignore_char('.');

        let root = builder.build(&[["y?. _y"]]);
        assert_eq!(root.children.len(), 2);
        assert_eq!(builder.config().ignore_chars, vec!['_', ' ', '.']);
    }

    #[test]
    fn test_factory_receives_size_and_may_decline() {
        let mut seen = Vec::new();
        let mut count = 0;
        {
            let mut builder = MapBuilder::new().with_default_size(Vec3::new(2.0, 2.0, 2.0));
            builder.register('c', |position, size| {
                seen.push(size);
                count += 1;
                (count % 2 == 0).then(|| GameObject::new("coin").with_position(position + Vec3::y()))
            });
            let root = builder.build(&[["ccc"]]);
            assert_eq!(root.children.len(), 1);
            // The builder's position wins over the factory's
            assert_relative_eq!(root.children[0].transform.position, Vec3::zeros());
        }
        assert_eq!(seen, vec![Vec3::new(2.0, 2.0, 2.0); 3]);
    }

    #[test]
    fn test_factory_scale_is_kept() {
        let mut builder = MapBuilder::new()
            .with_default_size(Vec3::new(2.0, 2.0, 2.0))
            .with_factory('y', |_, _| Some(GameObject::new("floor").with_scale(Vec3::new(4.0, 1.0, 4.0))));

        let root = builder.build(&[["y"]]);
        assert_eq!(root.children[0].transform.scale, Vec3::new(4.0, 1.0, 4.0));
    }

    #[test]
    fn test_with_config_validates() {
        let config = MapBuilderConfig {
            alignment: Vec3::new(0.0, 0.0, -3.0),
            ..MapBuilderConfig::default()
        };
        assert!(MapBuilder::with_config(config).is_err());

        let config = MapBuilderConfig {
            ignore_chars: vec!['#'],
            ..MapBuilderConfig::default()
        };
        let mut builder = MapBuilder::with_config(config).unwrap().with_factory('_', marker);
        assert_eq!(builder.build(&[["_#"]]).children.len(), 1);
    }

    #[test]
    fn test_empty_map() {
        let mut builder = MapBuilder::new().with_factory('y', marker);
        let empty: [[&str; 0]; 0] = [];
        let root = builder.build(&empty);
        assert!(root.children.is_empty());
        assert_eq!(map_extent(&empty), MapExtent::default());
    }
}
