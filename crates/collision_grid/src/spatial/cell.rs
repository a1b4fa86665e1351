//! Integer cell coordinates over a uniform grid

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;

/// Integer coordinate of a grid cell
///
/// Cell `(x, y, z)` covers `[x * size.x, (x + 1) * size.x)` on the x axis,
/// and likewise for y and z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct CellCoord {
    /// X cell index
    pub x: i32,
    /// Y cell index
    pub y: i32,
    /// Z cell index
    pub z: i32,
}

impl CellCoord {
    /// The cell containing the world origin
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Create a cell coordinate
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Cell containing `position` for the given per-axis cell size
    ///
    /// Rounds toward negative infinity, so `-0.5` with size 8 lands in
    /// cell -1 rather than 0.
    pub fn containing(position: Vec3, cell_size: Vec3) -> Self {
        Self {
            x: (position.x / cell_size.x).floor() as i32,
            y: (position.y / cell_size.y).floor() as i32,
            z: (position.z / cell_size.z).floor() as i32,
        }
    }

    /// Offset this coordinate by whole cells, saturating at the `i32` range
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy), self.z.saturating_add(dz))
    }

    /// Every cell within `radius` cells of `self` on all three axes,
    /// `self` included: `(2r + 1)^3` cells
    ///
    /// Near the edge of the `i32` range offsets saturate, so the iterator
    /// repeats edge cells instead of wrapping.
    pub fn neighborhood(self, radius: u32) -> impl Iterator<Item = CellCoord> {
        let r = i32::try_from(radius).unwrap_or(i32::MAX);
        (-r..=r).flat_map(move |dx| {
            (-r..=r).flat_map(move |dy| (-r..=r).map(move |dz| self.offset(dx, dy, dz)))
        })
    }

    /// World-space minimum corner of this cell
    pub fn min_corner(self, cell_size: Vec3) -> Vec3 {
        Vec3::new(
            self.x as f32 * cell_size.x,
            self.y as f32 * cell_size.y,
            self.z as f32 * cell_size.z,
        )
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(i32, i32, i32)> for CellCoord {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn eight() -> Vec3 {
        Vec3::new(8.0, 8.0, 8.0)
    }

    #[test]
    fn test_containing_uses_floor() {
        assert_eq!(CellCoord::containing(Vec3::new(-0.5, 0.0, 0.0), eight()), CellCoord::new(-1, 0, 0));
        assert_eq!(CellCoord::containing(Vec3::new(-8.0, -8.01, 7.99), eight()), CellCoord::new(-1, -2, 0));
        assert_eq!(CellCoord::containing(Vec3::new(8.0, 15.9, 16.0), eight()), CellCoord::new(1, 1, 2));
    }

    #[test]
    fn test_containing_same_bucket() {
        let a = CellCoord::containing(Vec3::new(0.1, 0.2, 0.3), eight());
        let b = CellCoord::containing(Vec3::new(7.9, 7.8, 7.7), eight());
        assert_eq!(a, b);
        assert_eq!(a, CellCoord::containing(Vec3::new(0.1, 0.2, 0.3), eight()));
    }

    #[test]
    fn test_containing_per_axis_size() {
        let size = Vec3::new(2.0, 4.0, 0.5);
        assert_eq!(CellCoord::containing(Vec3::new(3.0, 3.0, 3.0), size), CellCoord::new(1, 0, 6));
    }

    #[test]
    fn test_neighborhood_sizes() {
        assert_eq!(CellCoord::ORIGIN.neighborhood(0).collect::<Vec<_>>(), vec![CellCoord::ORIGIN]);

        let cube: HashSet<CellCoord> = CellCoord::new(3, -2, 5).neighborhood(2).collect();
        assert_eq!(cube.len(), 125);
        assert!(cube.contains(&CellCoord::new(1, -4, 3)));
        assert!(cube.contains(&CellCoord::new(5, 0, 7)));
        assert!(!cube.contains(&CellCoord::new(6, 0, 7)));
    }

    #[test]
    fn test_far_positions_saturate() {
        let far = CellCoord::containing(Vec3::new(1e12, -1e12, 0.0), eight());
        assert_eq!(far, CellCoord::new(i32::MAX, i32::MIN, 0));

        let cube: HashSet<CellCoord> = far.neighborhood(1).collect();
        assert_eq!(cube.len(), 2 * 2 * 3);
        assert!(cube.contains(&CellCoord::new(i32::MAX, i32::MIN, 0)));
        assert!(cube.contains(&CellCoord::new(i32::MAX - 1, i32::MIN + 1, -1)));
        assert_eq!(far.offset(5, -5, 0), far);
    }

    #[test]
    fn test_min_corner() {
        let corner = CellCoord::new(-1, 2, 0).min_corner(eight());
        assert_eq!(corner, Vec3::new(-8.0, 16.0, 0.0));
    }
}
