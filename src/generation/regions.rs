//! # Region Analysis
//!
//! Flood fill of connected tile regions and size-threshold pruning.

use crate::grid::{Coord, Tile, TileGrid};
use std::collections::VecDeque;

/// A maximal axis-connected set of tiles of one type.
pub type Region<C> = Vec<C>;

/// Finds every region of `tile` in the grid.
///
/// Seeds are taken in row-major order and each region is grown breadth-first
/// through axis neighbours (4-connectivity in 2D, 6 in 3D). Every tile of the
/// requested type ends up in exactly one region.
///
/// # Examples
///
/// ```
/// use grotto::{regions_of, Coord2, Tile, TileGrid};
///
/// let grid = TileGrid::bake(Coord2::new(5, 1), |c| c.x != 2);
/// let rooms = regions_of(&grid, Tile::Room);
/// assert_eq!(rooms.len(), 2);
/// assert_eq!(rooms[0], vec![Coord2::new(0, 0), Coord2::new(1, 0)]);
/// ```
pub fn regions_of<C: Coord>(grid: &TileGrid<C>, tile: Tile) -> Vec<Region<C>> {
    let size = grid.size();
    let mut checked = vec![false; grid.len()];
    let mut regions = Vec::new();

    for (index, &current) in grid.tiles().iter().enumerate() {
        if current != tile || checked[index] {
            continue;
        }

        let mut region = Vec::new();
        let mut queue = VecDeque::new();
        checked[index] = true;
        queue.push_back(C::from_index(index, size));

        while let Some(coord) = queue.pop_front() {
            region.push(coord);
            for neighbour in grid.axis_neighbours(coord) {
                let Some(ni) = neighbour.to_index(size) else {
                    continue;
                };
                if !checked[ni] && grid.tiles()[ni] == tile {
                    checked[ni] = true;
                    queue.push_back(neighbour);
                }
            }
        }

        regions.push(region);
    }

    regions
}

/// Removes and returns every region with fewer than `threshold` tiles.
///
/// Regions of exactly `threshold` tiles are kept. The relative order of both
/// the kept and the removed regions is preserved.
pub fn remove_under_threshold<C: Coord>(
    regions: &mut Vec<Region<C>>,
    threshold: usize,
) -> Vec<Region<C>> {
    let (kept, removed): (Vec<_>, Vec<_>) = regions
        .drain(..)
        .partition(|region| region.len() >= threshold);
    *regions = kept;
    removed
}

/// Flips every tile of the given regions (room ↔ wall).
pub fn flip_regions<C: Coord>(grid: &mut TileGrid<C>, regions: &[Region<C>]) {
    for coord in regions.iter().flatten() {
        grid.flip(*coord);
    }
}

/// Prunes regions of `tile` smaller than `threshold` by flipping them, and
/// returns the surviving regions.
pub fn prune_regions<C: Coord>(
    grid: &mut TileGrid<C>,
    tile: Tile,
    threshold: usize,
) -> Vec<Region<C>> {
    let mut regions = regions_of(grid, tile);
    let removed = remove_under_threshold(&mut regions, threshold);
    if !removed.is_empty() {
        log::debug!(
            "pruned {} {:?} regions under {} tiles, {} kept",
            removed.len(),
            tile,
            threshold,
            regions.len()
        );
    }
    flip_regions(grid, &removed);
    regions
}
