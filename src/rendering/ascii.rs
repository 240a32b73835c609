//! # ASCII Rendering
//!
//! Plain-text dumps of tile grids, one line per row, with an optional path
//! overlay. 3D grids are printed one z slice at a time.

use crate::grid::{Coord, Tile, TileGrid};
use std::collections::HashSet;

/// Characters used when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub wall: char,
    pub room: char,
    pub path: char,
    pub start: char,
    pub target: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            wall: '#',
            room: '.',
            path: '*',
            start: 'S',
            target: 'T',
        }
    }
}

/// Text renderer for tile grids.
///
/// # Examples
///
/// ```
/// use grotto::rendering::AsciiRenderer;
/// use grotto::{Coord2, TileGrid};
///
/// let grid = TileGrid::bake(Coord2::new(3, 2), |c| c.y == 1);
/// assert_eq!(AsciiRenderer::new().render(&grid, &[]), "###\n...\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct AsciiRenderer {
    glyphs: Glyphs,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_glyphs(glyphs: Glyphs) -> Self {
        Self { glyphs }
    }

    /// Renders `grid` with `path` drawn over it.
    ///
    /// The first path tile is drawn as the start, the last as the target
    /// and the rest as path markers. 3D grids get a `z = n` header before
    /// each slice.
    pub fn render<C: Coord>(&self, grid: &TileGrid<C>, path: &[C]) -> String {
        let size = grid.size().components();
        let on_path: HashSet<C> = path.iter().copied().collect();
        let start = path.first().copied();
        let target = path.last().copied();

        let mut out = String::with_capacity(grid.len() + size[1].max(0) as usize * 2);
        let depth = if C::DIMENSIONS > 2 { size[2] } else { 1 };

        for z in 0..depth {
            if C::DIMENSIONS > 2 {
                out.push_str(&format!("z = {}\n", z));
            }
            for y in 0..size[1] {
                for x in 0..size[0] {
                    let coord = C::from_components([x, y, z]);
                    out.push(self.glyph(grid, coord, &on_path, start, target));
                }
                out.push('\n');
            }
        }

        out
    }

    fn glyph<C: Coord>(
        &self,
        grid: &TileGrid<C>,
        coord: C,
        on_path: &HashSet<C>,
        start: Option<C>,
        target: Option<C>,
    ) -> char {
        if Some(coord) == start {
            self.glyphs.start
        } else if Some(coord) == target {
            self.glyphs.target
        } else if on_path.contains(&coord) {
            self.glyphs.path
        } else {
            match grid.get(coord) {
                Some(Tile::Room) => self.glyphs.room,
                _ => self.glyphs.wall,
            }
        }
    }
}

/// Renders a grid without a path using the default glyphs.
pub fn render_ascii<C: Coord>(grid: &TileGrid<C>) -> String {
    AsciiRenderer::new().render(grid, &[])
}
