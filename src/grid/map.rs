//! # Tile Grids
//!
//! Dense, fixed-size tile storage shared by the generator and the pathfinder.

use super::Coord;
use crate::{GrottoError, GrottoResult};
use serde::{Deserialize, Serialize};

/// Contents of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Solid rock; blocks movement.
    Wall,
    /// Open cave space; walkable.
    Room,
}

impl Tile {
    /// Returns the opposite tile type.
    pub fn flipped(self) -> Tile {
        match self {
            Tile::Wall => Tile::Room,
            Tile::Room => Tile::Wall,
        }
    }

    /// Checks if agents can stand on this tile.
    pub fn is_walkable(self) -> bool {
        self == Tile::Room
    }

    /// Maps the tile to a boolean, where `room_value` encodes [`Tile::Room`].
    pub fn to_bool(self, room_value: bool) -> bool {
        if self == Tile::Room {
            room_value
        } else {
            !room_value
        }
    }

    /// Inverse of [`Tile::to_bool`].
    pub fn from_bool(value: bool, room_value: bool) -> Tile {
        if value == room_value {
            Tile::Room
        } else {
            Tile::Wall
        }
    }
}

/// A dense row-major grid of tiles.
///
/// The extent is stored as a coordinate (`width, height[, depth]`) and never
/// changes after construction. Every accessor is bounds-checked.
///
/// # Examples
///
/// ```
/// use grotto::{Coord2, Tile, TileGrid};
///
/// let mut grid = TileGrid::new(Coord2::new(4, 3));
/// assert_eq!(grid.get(Coord2::new(1, 1)), Some(Tile::Wall));
/// grid.set(Coord2::new(1, 1), Tile::Room).unwrap();
/// assert!(grid.is_room(Coord2::new(1, 1)));
/// assert_eq!(grid.get(Coord2::new(4, 0)), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileGrid<C> {
    size: C,
    tiles: Vec<Tile>,
}

impl<C: Coord> TileGrid<C> {
    /// Creates a grid filled with walls.
    pub fn new(size: C) -> Self {
        Self::filled(size, Tile::Wall)
    }

    /// Creates a grid with every tile set to `tile`.
    pub fn filled(size: C, tile: Tile) -> Self {
        Self {
            size,
            tiles: vec![tile; size.volume()],
        }
    }

    /// Creates a grid by evaluating `f` for every coordinate in row-major order.
    pub fn from_fn<F>(size: C, mut f: F) -> Self
    where
        F: FnMut(C) -> Tile,
    {
        let tiles = (0..size.volume())
            .map(|i| f(C::from_index(i, size)))
            .collect();
        Self { size, tiles }
    }

    /// Bakes a walkability grid from a query such as a collision test
    /// against world geometry; `walkable` returning `true` yields a room tile.
    pub fn bake<F>(size: C, mut walkable: F) -> Self
    where
        F: FnMut(C) -> bool,
    {
        Self::from_fn(size, |coord| {
            if walkable(coord) {
                Tile::Room
            } else {
                Tile::Wall
            }
        })
    }

    /// Builds a grid from a plain boolean array with the given polarity.
    pub fn from_bools(size: C, values: &[bool], room_value: bool) -> GrottoResult<Self> {
        if values.len() != size.volume() {
            return Err(GrottoError::InvalidGrid(format!(
                "expected {} cells for size {:?}, got {}",
                size.volume(),
                size,
                values.len()
            )));
        }
        Ok(Self {
            size,
            tiles: values
                .iter()
                .map(|&v| Tile::from_bool(v, room_value))
                .collect(),
        })
    }

    /// Exports the grid as a boolean array with the given polarity.
    pub fn to_bools(&self, room_value: bool) -> Vec<bool> {
        self.tiles.iter().map(|t| t.to_bool(room_value)).collect()
    }

    /// Grid extent.
    pub fn size(&self) -> C {
        self.size
    }

    /// Total number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Checks if the grid has no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Raw tile storage in row-major order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Checks if a coordinate lies inside the grid.
    pub fn contains(&self, coord: C) -> bool {
        coord.within(self.size)
    }

    /// Gets the tile at a coordinate.
    pub fn get(&self, coord: C) -> Option<Tile> {
        coord.to_index(self.size).map(|i| self.tiles[i])
    }

    /// Gets a mutable reference to the tile at a coordinate.
    pub fn get_mut(&mut self, coord: C) -> Option<&mut Tile> {
        let index = coord.to_index(self.size)?;
        self.tiles.get_mut(index)
    }

    /// Sets the tile at a coordinate.
    pub fn set(&mut self, coord: C, tile: Tile) -> GrottoResult<()> {
        match self.get_mut(coord) {
            Some(slot) => {
                *slot = tile;
                Ok(())
            }
            None => Err(GrottoError::InvalidPosition(format!(
                "{:?} is outside grid of size {:?}",
                coord, self.size
            ))),
        }
    }

    /// Flips the tile at a coordinate; out-of-bounds coordinates are ignored.
    pub fn flip(&mut self, coord: C) {
        if let Some(slot) = self.get_mut(coord) {
            *slot = slot.flipped();
        }
    }

    /// Checks if the tile at a coordinate is open. Out-of-bounds is not.
    pub fn is_room(&self, coord: C) -> bool {
        self.get(coord) == Some(Tile::Room)
    }

    /// Checks if the tile at a coordinate is solid. Out-of-bounds counts as wall.
    pub fn is_wall(&self, coord: C) -> bool {
        self.get(coord) != Some(Tile::Room)
    }

    /// Counts tiles of the given type.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// Iterates over every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = C> {
        let size = self.size;
        (0..self.tiles.len()).map(move |i| C::from_index(i, size))
    }

    /// In-bounds axis-aligned neighbours (4 in 2D, 6 in 3D).
    pub fn axis_neighbours(&self, coord: C) -> impl Iterator<Item = C> + '_ {
        C::AXES
            .iter()
            .map(move |&d| coord + d)
            .filter(move |&n| self.contains(n))
    }

    /// In-bounds neighbours including diagonals (8 in 2D, 26 in 3D).
    pub fn neighbours(&self, coord: C) -> impl Iterator<Item = C> + '_ {
        C::NEIGHBOURS
            .iter()
            .map(move |&d| coord + d)
            .filter(move |&n| self.contains(n))
    }
}
