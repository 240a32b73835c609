//! # Walkability
//!
//! The capability interface the pathfinder searches over. Dense tile grids
//! implement it directly; [`WeightedMapper`] layers per-tile walk costs on
//! top of any other mapper.

use super::{Coord, TileGrid};

/// Answers "can an agent stand here" and "how expensive is it to step here".
///
/// Implementors only need [`Mapper::is_pathable`]; the footprint-aware
/// methods used by the pathfinder derive from the single-tile queries.
pub trait Mapper<C: Coord> {
    /// Checks a single tile. Out-of-bounds tiles must report `false`.
    fn is_pathable(&self, coord: C) -> bool;

    /// Multiplier applied to the step cost of entering a single tile.
    fn walk_multiplier(&self, _coord: C) -> f32 {
        1.0
    }

    /// Flat cost added when entering a single tile.
    fn traversal_penalty(&self, _coord: C) -> f32 {
        0.0
    }

    /// Checks every tile of an agent footprint anchored at `coord`.
    ///
    /// The anchor is checked on its own first, so the footprint is only
    /// expanded from in-bounds tiles.
    fn is_walkable(&self, coord: C, size: u32) -> bool {
        if !self.is_pathable(coord) {
            return false;
        }
        if size <= 1 {
            return true;
        }
        coord.footprint(size).into_iter().all(|p| self.is_pathable(p))
    }

    /// Average walk multiplier over an agent footprint.
    fn walk_cost(&self, coord: C, size: u32) -> f32 {
        if size <= 1 {
            return self.walk_multiplier(coord);
        }
        let points = coord.footprint(size);
        let total: f32 = points.iter().map(|&p| self.walk_multiplier(p)).sum();
        total / points.len() as f32
    }
}

impl<C: Coord> Mapper<C> for TileGrid<C> {
    fn is_pathable(&self, coord: C) -> bool {
        self.is_room(coord)
    }
}

impl<C: Coord, M: Mapper<C> + ?Sized> Mapper<C> for &M {
    fn is_pathable(&self, coord: C) -> bool {
        (**self).is_pathable(coord)
    }

    fn walk_multiplier(&self, coord: C) -> f32 {
        (**self).walk_multiplier(coord)
    }

    fn traversal_penalty(&self, coord: C) -> f32 {
        (**self).traversal_penalty(coord)
    }
}

/// Wraps a mapper with a per-tile walk-cost multiplier.
///
/// # Examples
///
/// ```
/// use grotto::{Coord2, Mapper, Tile, TileGrid, WeightedMapper};
///
/// let grid = TileGrid::filled(Coord2::new(4, 4), Tile::Room);
/// let mud = WeightedMapper::new(&grid, |c: Coord2| -> f32 { if c.x == 2 { 3.0 } else { 1.0 } });
/// assert_eq!(mud.walk_multiplier(Coord2::new(2, 0)), 3.0);
/// assert!(mud.is_pathable(Coord2::new(2, 0)));
/// ```
pub struct WeightedMapper<M, F> {
    inner: M,
    cost: F,
}

impl<M, F> WeightedMapper<M, F> {
    /// Creates a weighted view over `inner`.
    pub fn new(inner: M, cost: F) -> Self {
        Self { inner, cost }
    }
}

impl<C, M, F> Mapper<C> for WeightedMapper<M, F>
where
    C: Coord,
    M: Mapper<C>,
    F: Fn(C) -> f32,
{
    fn is_pathable(&self, coord: C) -> bool {
        self.inner.is_pathable(coord)
    }

    fn walk_multiplier(&self, coord: C) -> f32 {
        (self.cost)(coord).max(0.0)
    }

    fn traversal_penalty(&self, coord: C) -> f32 {
        self.inner.traversal_penalty(coord)
    }
}
