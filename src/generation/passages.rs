//! # Passage Carving
//!
//! Digital lines between edge tiles, widened by a disc (2D) or ball (3D)
//! brush that never cuts into the border frame.

use super::rooms::Connection;
use super::utils::frame_width;
use crate::grid::{Coord, Tile, TileGrid};

/// Tiles of the digital line from `a` to `b`, both endpoints included.
///
/// The line steps one tile along the dominant axis each time and carries an
/// error accumulator per minor axis, starting at half the dominant length.
/// It always has exactly `max(|b - a|) + 1` tiles.
///
/// # Examples
///
/// ```
/// use grotto::{line_tiles, Coord2};
///
/// let line = line_tiles(Coord2::new(0, 0), Coord2::new(4, 2));
/// assert_eq!(line.len(), 5);
/// assert_eq!(line.first(), Some(&Coord2::new(0, 0)));
/// assert_eq!(line.last(), Some(&Coord2::new(4, 2)));
/// ```
pub fn line_tiles<C: Coord>(a: C, b: C) -> Vec<C> {
    let delta = (b - a).components();
    let lengths = delta.map(i32::abs);
    let steps = delta.map(i32::signum);

    let dominant = (0..C::DIMENSIONS).fold(0, |best, axis| {
        if lengths[axis] > lengths[best] {
            axis
        } else {
            best
        }
    });
    let longest = lengths[dominant];

    let mut current = a.components();
    let mut error = [longest / 2; 3];
    let mut tiles = Vec::with_capacity(longest as usize + 1);
    tiles.push(a);

    for _ in 0..longest {
        current[dominant] += steps[dominant];
        for axis in (0..C::DIMENSIONS).filter(|&axis| axis != dominant) {
            error[axis] += lengths[axis];
            if error[axis] >= longest {
                error[axis] -= longest;
                current[axis] += steps[axis];
            }
        }
        tiles.push(C::from_components(current));
    }

    tiles
}

/// Opens every tile within `radius` of `center` that lies outside the
/// border frame.
pub fn clear_disc<C: Coord>(grid: &mut TileGrid<C>, center: C, radius: u32, border: u32) {
    let r = radius as i32;
    let r_sq = i64::from(r) * i64::from(r);
    let border = frame_width(border);
    let min = C::splat(border);
    let max = grid.size() - C::splat(border.saturating_add(1));

    for offset in C::cube_offsets(r) {
        let tile = center + offset;
        if offset.distance_sq(C::zero()) <= r_sq && tile.within_range(min, max) {
            if let Some(slot) = grid.get_mut(tile) {
                *slot = Tile::Room;
            }
        }
    }
}

/// Carves a passage of `radius` along every connection.
///
/// Where a line step changes more than one coordinate, the intermediate
/// corner tiles are brushed too so that the passage stays connected through
/// axis neighbours.
pub fn carve<C: Coord>(grid: &mut TileGrid<C>, connections: &[Connection<C>], radius: u32, border: u32) {
    for connection in connections {
        let line = line_tiles(connection.a, connection.b);
        clear_disc(grid, connection.a, radius, border);

        for pair in line.windows(2) {
            let (previous, current) = (pair[0], pair[1]);
            for corner in (current - previous).corner_offsets() {
                clear_disc(grid, previous + corner, radius, border);
            }
            clear_disc(grid, current, radius, border);
        }
    }
}
