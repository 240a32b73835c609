//! # Grotto
//!
//! Procedural cave generation and grid pathfinding for 2D and 3D tile worlds.
//!
//! ## Architecture Overview
//!
//! Grotto is built from two independent cores that meet at the tile grid:
//!
//! - **Grid**: integer coordinates, dense tile storage and the [`Mapper`]
//!   walkability interface
//! - **Generation**: seeded noise, cellular smoothing, region pruning and
//!   passage carving that produce connected caves
//! - **Pathfinding**: octile A* over any mapper, with footprint-aware agents
//!   and path trimming and smoothing
//! - **Service**: asynchronous path requests and a registry of grids placed
//!   in world space
//!
//! Every algorithm is written once against the [`Coord`] trait and runs on
//! both [`Coord2`] and [`Coord3`] grids.
//!
//! ## Example
//!
//! ```
//! use grotto::pathfinding::{find_path, PathfindingConfig};
//! use grotto::{generate_cave, CaveConfig, Coord2};
//!
//! let cave = generate_cave::<Coord2>(&CaveConfig::for_testing("overview")).unwrap();
//! let open: Vec<Coord2> = cave.grid.coords().filter(|&c| cave.grid.is_room(c)).collect();
//! if let (Some(&start), Some(&target)) = (open.first(), open.last()) {
//!     let outcome = find_path(&cave.grid, start, target, &PathfindingConfig::new()).unwrap();
//!     assert!(outcome.is_found());
//! }
//! ```

pub mod generation;
pub mod grid;
pub mod pathfinding;
pub mod rendering;
pub mod service;

// Core module re-exports
pub use generation::*;
pub use grid::*;

pub use pathfinding::{
    find_path, AStarPathfinder, NoPathReason, Path, PathOutcome, PathfindingConfig,
};
pub use rendering::{render_ascii, AsciiRenderer};
pub use service::{GridRegistry, PathRequest, PathResponse, PathService, PostProcess};

/// Core error type for the Grotto crate.
#[derive(thiserror::Error, Debug)]
pub enum GrottoError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Grid data does not match its declared shape
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Coordinate or world point outside the grid
    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    /// Generated output violates a structural guarantee
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Background search task failed
    #[error("Worker error: {0}")]
    Worker(String),
}

/// Result type used throughout the Grotto codebase.
pub type GrottoResult<T> = Result<T, GrottoError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate-wide limits and defaults.
pub mod config {
    /// Largest accepted grid extent along any axis
    pub const MAX_GRID_EXTENT: u32 = 4096;

    /// Largest accepted agent footprint along any axis
    pub const MAX_AGENT_SIZE: u32 = 16;

    /// Concurrent searches when the CPU count is unknown
    pub const DEFAULT_PATH_WORKERS: usize = 4;

    /// Default seed used by the command line tool
    pub const DEFAULT_SEED: &str = "grotto";
}
