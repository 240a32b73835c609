//! # Grid Module
//!
//! Tile coordinates, dense tile grids and the walkability interface.
//!
//! The generator writes into a [`TileGrid`]; once finished the same grid is
//! handed to the pathfinder, which only reads it through [`Mapper`].

pub mod coord;
pub mod map;
pub mod transform;
pub mod walkability;

pub use coord::*;
pub use map::*;
pub use transform::*;
pub use walkability::*;
