//! # Random Fill
//!
//! Seeded noise fill with a solid frame.

use super::utils::frame_width;
use crate::grid::{Coord, Tile, TileGrid};
use rand::Rng;

/// Fills a new grid with random walls.
///
/// Tiles closer than `border` to any edge are walls. Every other tile is
/// visited in row-major order and becomes a wall with probability `fill`.
/// One value is drawn per interior tile, so the same RNG state, size and fill
/// always produce the same grid.
///
/// # Examples
///
/// ```
/// use grotto::{fill_random, Coord2, Tile};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let grid = fill_random(Coord2::new(8, 8), 1.0, 0, &mut rng);
/// assert_eq!(grid.count(Tile::Wall), 64);
/// ```
pub fn fill_random<C, R>(size: C, fill: f64, border: u32, rng: &mut R) -> TileGrid<C>
where
    C: Coord,
    R: Rng,
{
    let border = frame_width(border);
    TileGrid::from_fn(size, |coord| {
        if coord.edge_distance(size) < border {
            Tile::Wall
        } else if rng.gen::<f64>() < fill {
            Tile::Wall
        } else {
            Tile::Room
        }
    })
}

/// Forces every tile closer than `border` to any edge back to wall.
pub fn apply_border<C: Coord>(grid: &mut TileGrid<C>, border: u32) {
    if border == 0 {
        return;
    }
    let border = frame_width(border);
    let size = grid.size();
    let framed: Vec<C> = grid
        .coords()
        .filter(|c| c.edge_distance(size) < border)
        .collect();
    for coord in framed {
        if let Some(tile) = grid.get_mut(coord) {
            *tile = Tile::Wall;
        }
    }
}
