//! # Pathfinding Module
//!
//! Grid A* search and path post-processing.
//!
//! The search only sees the world through the [`Mapper`] trait, so it runs
//! on generated caves, baked collision grids and weighted views alike. Results
//! are dense tile paths that can be trimmed to turning points, shortcut with
//! straight walkable lines, and mapped to world positions.

pub mod astar;
pub mod heap;
pub mod node;
pub mod postprocess;

pub use astar::*;
pub use heap::*;
pub use node::*;
pub use postprocess::*;

use crate::config::MAX_AGENT_SIZE;
use crate::grid::{Coord, GridTransform, Mapper};
use crate::{GrottoError, GrottoResult};
use serde::{Deserialize, Serialize};
use std::path::Path as FilePath;

/// Search options. Start and target are per-call arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathfindingConfig {
    /// Agent footprint in tiles along every axis
    pub agent_size: u32,
    /// Return the route to the closest reachable tile when the target is not reached
    pub allow_partial_path: bool,
    /// Allow diagonal moves past blocked corner tiles
    pub allow_corner_cutting: bool,
    /// Maximum number of node expansions, unlimited when `None`
    pub max_steps: Option<usize>,
}

impl PathfindingConfig {
    /// Creates the default options: a single-tile agent, no partial paths,
    /// no corner cutting and no step budget.
    pub fn new() -> Self {
        Self {
            agent_size: 1,
            allow_partial_path: false,
            allow_corner_cutting: false,
            max_steps: None,
        }
    }

    /// Creates options for testing with a small step budget.
    pub fn for_testing() -> Self {
        Self {
            max_steps: Some(10_000),
            ..Self::new()
        }
    }

    /// Sets the agent footprint.
    pub fn with_agent_size(mut self, agent_size: u32) -> Self {
        self.agent_size = agent_size;
        self
    }

    /// Checks that the options can be searched with.
    pub fn validate(&self) -> GrottoResult<()> {
        if self.agent_size == 0 || self.agent_size > MAX_AGENT_SIZE {
            return Err(GrottoError::InvalidConfig(format!(
                "agent_size must be between 1 and {}, got {}",
                MAX_AGENT_SIZE, self.agent_size
            )));
        }
        if self.max_steps == Some(0) {
            return Err(GrottoError::InvalidConfig(
                "max_steps must be positive when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses options from JSON; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> GrottoResult<Self> {
        let config: PathfindingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<FilePath>) -> GrottoResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

impl Default for PathfindingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a search produced no path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoPathReason {
    /// Start is out of bounds or its footprint is blocked
    StartInvalid,
    /// Target is out of bounds or blocked
    TargetInvalid,
    /// Every reachable tile was expanded without reaching the target
    Exhausted,
    /// The step budget ran out
    StepLimit,
}

/// A tile path from start to end with its accumulated cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path<C> {
    pub tiles: Vec<C>,
    pub cost: f32,
}

impl<C: Coord> Path<C> {
    pub fn new(tiles: Vec<C>, cost: f32) -> Self {
        Self { tiles, cost }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn start(&self) -> Option<C> {
        self.tiles.first().copied()
    }

    pub fn end(&self) -> Option<C> {
        self.tiles.last().copied()
    }

    /// Copy reduced to its turning points. The cost is unchanged.
    pub fn trimmed(&self) -> Self {
        Self::new(trim(&self.tiles), self.cost)
    }

    /// Copy with skippable waypoints removed. The cost is unchanged.
    pub fn smoothed<M>(&self, mapper: &M, agent_size: u32) -> Self
    where
        M: Mapper<C> + ?Sized,
    {
        Self::new(smooth(&self.tiles, mapper, agent_size), self.cost)
    }

    /// World positions of the waypoints.
    pub fn to_world(&self, transform: &GridTransform) -> Vec<[f32; 3]> {
        self.tiles.iter().map(|&c| transform.to_world(c)).collect()
    }
}

/// Result of a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathOutcome<C> {
    /// The target was reached
    Found(Path<C>),
    /// The target was not reached; the path leads to the closest tile found
    Partial(Path<C>),
    NoPath(NoPathReason),
}

impl<C: Coord> PathOutcome<C> {
    /// The path, whether complete or partial.
    pub fn path(&self) -> Option<&Path<C>> {
        match self {
            PathOutcome::Found(path) | PathOutcome::Partial(path) => Some(path),
            PathOutcome::NoPath(_) => None,
        }
    }

    pub fn into_path(self) -> Option<Path<C>> {
        match self {
            PathOutcome::Found(path) | PathOutcome::Partial(path) => Some(path),
            PathOutcome::NoPath(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, PathOutcome::Found(_))
    }

    /// Applies `f` to the path, keeping the outcome kind.
    pub fn map_path<F>(self, f: F) -> Self
    where
        F: FnOnce(Path<C>) -> Path<C>,
    {
        match self {
            PathOutcome::Found(path) => PathOutcome::Found(f(path)),
            PathOutcome::Partial(path) => PathOutcome::Partial(f(path)),
            PathOutcome::NoPath(reason) => PathOutcome::NoPath(reason),
        }
    }
}

/// Runs a single search with the given options.
///
/// # Examples
///
/// ```
/// use grotto::pathfinding::{find_path, PathfindingConfig};
/// use grotto::{Coord2, Tile, TileGrid};
///
/// let grid = TileGrid::filled(Coord2::new(10, 10), Tile::Room);
/// let outcome = find_path(&grid, Coord2::new(0, 0), Coord2::new(9, 9), &PathfindingConfig::new()).unwrap();
/// let path = outcome.into_path().unwrap().trimmed();
/// assert_eq!(path.tiles, vec![Coord2::new(0, 0), Coord2::new(9, 9)]);
/// ```
pub fn find_path<C, M>(
    mapper: &M,
    start: C,
    target: C,
    config: &PathfindingConfig,
) -> GrottoResult<PathOutcome<C>>
where
    C: Coord,
    M: Mapper<C> + ?Sized,
{
    let pathfinder = AStarPathfinder::new(config.clone())?;
    Ok(pathfinder.find_path(mapper, start, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coord2, Tile, TileGrid};

    #[test]
    fn test_config_validation() {
        assert!(PathfindingConfig::new().validate().is_ok());
        assert!(PathfindingConfig::for_testing().validate().is_ok());
        assert!(PathfindingConfig::new().with_agent_size(0).validate().is_err());

        let mut config = PathfindingConfig::new();
        config.max_steps = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_json() {
        let config = PathfindingConfig::from_json_str(r#"{ "agent_size": 2, "allow_partial_path": true }"#).unwrap();
        assert_eq!(config.agent_size, 2);
        assert!(config.allow_partial_path);
        assert!(!config.allow_corner_cutting);
        assert_eq!(config.max_steps, None);

        assert!(PathfindingConfig::from_json_str(r#"{ "agent_size": 0 }"#).is_err());
    }

    #[test]
    fn test_find_path_rejects_bad_config() {
        let grid = TileGrid::filled(Coord2::new(3, 3), Tile::Room);
        let config = PathfindingConfig::new().with_agent_size(0);
        assert!(find_path(&grid, Coord2::new(0, 0), Coord2::new(2, 2), &config).is_err());
    }

    #[test]
    fn test_path_to_world() {
        let path = Path::new(vec![Coord2::new(0, 0), Coord2::new(2, 1)], 24.0);
        let transform = GridTransform::new([1.0, 1.0, 0.0], [0.5, 0.5, 1.0]);
        assert_eq!(path.to_world(&transform), vec![[1.0, 1.0, 0.0], [2.0, 1.5, 0.0]]);
        assert_eq!(path.start(), Some(Coord2::new(0, 0)));
        assert_eq!(path.end(), Some(Coord2::new(2, 1)));
    }

    #[test]
    fn test_outcome_map_path_keeps_kind() {
        let partial = PathOutcome::Partial(Path::new(
            vec![Coord2::new(0, 0), Coord2::new(1, 1), Coord2::new(2, 2)],
            28.0,
        ));
        let trimmed = partial.map_path(|p| p.trimmed());
        assert!(matches!(trimmed, PathOutcome::Partial(ref p) if p.len() == 2));

        let none: PathOutcome<Coord2> = PathOutcome::NoPath(NoPathReason::Exhausted);
        assert_eq!(none.clone().map_path(|p| p.trimmed()), none);
    }
}
