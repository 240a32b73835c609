//! # Grid Registry
//!
//! Several grids placed in one world. A world-space request is answered by
//! the first registered grid that contains both endpoints.

use super::PostProcess;
use crate::grid::{Coord, GridTransform, TileGrid};
use crate::pathfinding::{AStarPathfinder, PathOutcome, PathfindingConfig};
use crate::{GrottoError, GrottoResult};
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier of a registered grid.
pub type GridId = Uuid;

/// A grid placed in world space.
#[derive(Debug, Clone)]
pub struct GridInstance<C> {
    pub id: GridId,
    pub name: String,
    pub transform: GridTransform,
    pub grid: Arc<TileGrid<C>>,
}

impl<C: Coord> GridInstance<C> {
    /// Checks if a world point falls on a tile of this grid.
    pub fn contains_world(&self, point: [f32; 3]) -> bool {
        self.grid.contains(self.transform.to_grid(point))
    }
}

/// A world-space path search result.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldPath<C> {
    /// Grid the search ran on
    pub instance: GridId,
    pub outcome: PathOutcome<C>,
    /// World positions of the waypoints; empty when no path was found
    pub waypoints: Vec<[f32; 3]>,
}

/// Registered grids in registration order.
#[derive(Debug, Clone)]
pub struct GridRegistry<C> {
    instances: Vec<GridInstance<C>>,
}

impl<C: Coord> GridRegistry<C> {
    pub fn new() -> Self {
        Self {
            instances: Vec::new(),
        }
    }

    /// Adds a grid and returns its new id.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        transform: GridTransform,
        grid: TileGrid<C>,
    ) -> GridId {
        let id = Uuid::new_v4();
        let name = name.into();
        log::debug!("registered grid '{}' ({}) of size {:?}", name, id, grid.size());
        self.instances.push(GridInstance {
            id,
            name,
            transform,
            grid: Arc::new(grid),
        });
        id
    }

    /// Removes a grid.
    pub fn remove(&mut self, id: GridId) -> Option<GridInstance<C>> {
        let index = self.instances.iter().position(|i| i.id == id)?;
        Some(self.instances.remove(index))
    }

    pub fn get(&self, id: GridId) -> Option<&GridInstance<C>> {
        self.instances.iter().find(|i| i.id == id)
    }

    pub fn instances(&self) -> &[GridInstance<C>] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// First grid containing a world point.
    pub fn instance_at(&self, point: [f32; 3]) -> Option<&GridInstance<C>> {
        self.instances.iter().find(|i| i.contains_world(point))
    }

    /// Finds a path between two world points.
    ///
    /// Both points must fall on the same registered grid; the first such
    /// grid in registration order is searched. Points outside every grid are
    /// an error, while an unreachable target is reported in the outcome.
    pub fn find_path_world(
        &self,
        start: [f32; 3],
        target: [f32; 3],
        config: &PathfindingConfig,
        post: PostProcess,
    ) -> GrottoResult<WorldPath<C>> {
        let instance = self
            .instances
            .iter()
            .find(|i| i.contains_world(start) && i.contains_world(target))
            .ok_or_else(|| {
                GrottoError::InvalidPosition(format!(
                    "no registered grid contains both {:?} and {:?}",
                    start, target
                ))
            })?;

        let pathfinder = AStarPathfinder::new(config.clone())?;
        let grid = instance.grid.as_ref();
        let outcome = pathfinder
            .find_path(
                grid,
                instance.transform.to_grid::<C>(start),
                instance.transform.to_grid::<C>(target),
            )
            .map_path(|path| post.apply(path, grid, config.agent_size));

        let waypoints = outcome
            .path()
            .map(|path| path.to_world(&instance.transform))
            .unwrap_or_default();

        Ok(WorldPath {
            instance: instance.id,
            outcome,
            waypoints,
        })
    }
}

impl<C: Coord> Default for GridRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}
