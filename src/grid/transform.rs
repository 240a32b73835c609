//! # Grid ↔ World Mapping

use super::Coord;
use serde::{Deserialize, Serialize};

/// Places a tile grid in world space.
///
/// Tile `c` maps to `origin + c * unit`; world points map back to the tile
/// whose cell contains them.
///
/// # Examples
///
/// ```
/// use grotto::{Coord2, GridTransform};
///
/// let transform = GridTransform::new([10.0, 0.0, 0.0], [0.5, 0.5, 1.0]);
/// assert_eq!(transform.to_world(Coord2::new(2, 4)), [11.0, 2.0, 0.0]);
/// assert_eq!(transform.to_grid::<Coord2>([11.2, 2.3, 0.0]), Coord2::new(2, 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridTransform {
    /// World position of tile `(0, 0[, 0])`.
    pub origin: [f32; 3],
    /// World size of one tile along each axis.
    pub unit: [f32; 3],
}

impl GridTransform {
    /// Creates a transform. Non-positive unit sizes fall back to 1.
    pub fn new(origin: [f32; 3], unit: [f32; 3]) -> Self {
        let unit = unit.map(|u| if u > 0.0 { u } else { 1.0 });
        Self { origin, unit }
    }

    /// World position of a tile.
    pub fn to_world<C: Coord>(&self, coord: C) -> [f32; 3] {
        let c = coord.components();
        let mut world = [0.0f32; 3];
        for axis in 0..3 {
            world[axis] = if axis < C::DIMENSIONS {
                self.origin[axis] + c[axis] as f32 * self.unit[axis]
            } else {
                self.origin[axis]
            };
        }
        world
    }

    /// Tile containing a world position.
    pub fn to_grid<C: Coord>(&self, point: [f32; 3]) -> C {
        let mut c = [0i32; 3];
        for axis in 0..C::DIMENSIONS {
            c[axis] = ((point[axis] - self.origin[axis]) / self.unit[axis]).floor() as i32;
        }
        C::from_components(c)
    }

    /// Snaps a world position to its tile's world position.
    pub fn round_to_grid<C: Coord>(&self, point: [f32; 3]) -> [f32; 3] {
        self.to_world(self.to_grid::<C>(point))
    }
}

impl Default for GridTransform {
    fn default() -> Self {
        Self::new([0.0; 3], [1.0; 3])
    }
}
