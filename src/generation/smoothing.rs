//! # Cellular Smoothing
//!
//! Majority-vote cellular automaton that turns noise into cave shapes.

use crate::grid::{Coord, Tile, TileGrid};

/// Runs `iterations` smoothing passes.
///
/// Each pass reads the previous grid and writes a fresh one. A tile becomes a
/// wall when more than half of its neighbours (8 in 2D, 26 in 3D) are walls,
/// a room when fewer than half are, and keeps its type on an exact tie.
/// Neighbours outside the grid count as walls.
pub fn smooth<C: Coord>(grid: &TileGrid<C>, iterations: u32) -> TileGrid<C> {
    let mut current = grid.clone();
    for _ in 0..iterations {
        current = smooth_once(&current);
    }
    current
}

/// A single smoothing pass.
pub fn smooth_once<C: Coord>(grid: &TileGrid<C>) -> TileGrid<C> {
    let neighbourhood = C::NEIGHBOURS.len();
    TileGrid::from_fn(grid.size(), |coord| {
        let walls = wall_neighbours(grid, coord);
        match (2 * walls).cmp(&neighbourhood) {
            std::cmp::Ordering::Greater => Tile::Wall,
            std::cmp::Ordering::Less => Tile::Room,
            std::cmp::Ordering::Equal => grid.get(coord).unwrap_or(Tile::Wall),
        }
    })
}

/// Counts wall neighbours, treating out-of-grid cells as walls.
pub fn wall_neighbours<C: Coord>(grid: &TileGrid<C>, coord: C) -> usize {
    C::NEIGHBOURS
        .iter()
        .filter(|&&d| grid.is_wall(coord + d))
        .count()
}
