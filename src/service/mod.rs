//! # Path Service
//!
//! Asynchronous path requests over a shared, replaceable grid.
//!
//! Searches are CPU-bound, so each request runs on tokio's blocking pool
//! against an immutable snapshot of the current grid. Publishing a new grid
//! never disturbs searches already in flight; they finish on the snapshot
//! they started with.

pub mod registry;

pub use registry::*;

use crate::grid::{Coord, Mapper, TileGrid};
use crate::pathfinding::{AStarPathfinder, Path, PathOutcome, PathfindingConfig};
use crate::{GrottoError, GrottoResult};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Semaphore};

/// Post-processing applied to a found path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostProcess {
    /// Reduce the path to its turning points
    pub trim: bool,
    /// Skip waypoints reachable by a straight walkable line
    pub smooth: bool,
}

impl PostProcess {
    /// Both trimming and smoothing.
    pub fn full() -> Self {
        Self {
            trim: true,
            smooth: true,
        }
    }

    /// Applies the selected steps to `path`, trimming first.
    pub fn apply<C, M>(&self, path: Path<C>, mapper: &M, agent_size: u32) -> Path<C>
    where
        C: Coord,
        M: Mapper<C> + ?Sized,
    {
        let path = if self.trim { path.trimmed() } else { path };
        if self.smooth {
            path.smoothed(mapper, agent_size)
        } else {
            path
        }
    }
}

/// A path request in tile coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRequest<C> {
    pub start: C,
    pub target: C,
    #[serde(default)]
    pub post: PostProcess,
}

impl<C: Coord> PathRequest<C> {
    pub fn new(start: C, target: C) -> Self {
        Self {
            start,
            target,
            post: PostProcess::default(),
        }
    }

    pub fn with_post(mut self, post: PostProcess) -> Self {
        self.post = post;
        self
    }
}

/// The answer to a [`PathRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResponse<C> {
    /// Sequence number assigned when the request was accepted
    pub id: u64,
    /// Version of the grid snapshot the search ran on
    pub grid_version: u64,
    pub outcome: PathOutcome<C>,
}

/// An immutable grid together with its publication number.
#[derive(Debug)]
pub struct GridSnapshot<C> {
    pub version: u64,
    pub grid: TileGrid<C>,
}

/// Runs path requests on the blocking pool.
///
/// # Examples
///
/// ```
/// use grotto::service::{PathRequest, PathService};
/// use grotto::pathfinding::PathfindingConfig;
/// use grotto::{Coord2, Tile, TileGrid};
///
/// # tokio_test::block_on(async {
/// let grid = TileGrid::filled(Coord2::new(8, 8), Tile::Room);
/// let service = PathService::new(grid, PathfindingConfig::new()).unwrap();
/// let response = service
///     .request(PathRequest::new(Coord2::new(0, 0), Coord2::new(7, 7)))
///     .await
///     .unwrap();
/// assert!(response.outcome.is_found());
/// # });
/// ```
#[derive(Debug)]
pub struct PathService<C> {
    grid: watch::Sender<Arc<GridSnapshot<C>>>,
    pathfinder: AStarPathfinder,
    permits: Arc<Semaphore>,
    next_id: AtomicU64,
    next_version: AtomicU64,
}

impl<C: Coord> PathService<C> {
    /// Creates a service over `grid` with one concurrent search per CPU.
    pub fn new(grid: TileGrid<C>, config: PathfindingConfig) -> GrottoResult<Self> {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(crate::config::DEFAULT_PATH_WORKERS);
        Self::with_workers(grid, config, workers)
    }

    /// Creates a service that runs at most `workers` searches at once.
    pub fn with_workers(
        grid: TileGrid<C>,
        config: PathfindingConfig,
        workers: usize,
    ) -> GrottoResult<Self> {
        if workers == 0 {
            return Err(GrottoError::InvalidConfig(
                "path service needs at least one worker".to_string(),
            ));
        }
        let pathfinder = AStarPathfinder::new(config)?;
        let (sender, _) = watch::channel(Arc::new(GridSnapshot { version: 0, grid }));
        Ok(Self {
            grid: sender,
            pathfinder,
            permits: Arc::new(Semaphore::new(workers)),
            next_id: AtomicU64::new(0),
            next_version: AtomicU64::new(1),
        })
    }

    /// Replaces the grid seen by requests issued from now on and returns its
    /// version.
    pub fn publish(&self, grid: TileGrid<C>) -> u64 {
        let version = self.next_version.fetch_add(1, Ordering::Relaxed);
        self.grid.send_replace(Arc::new(GridSnapshot { version, grid }));
        log::debug!("published grid version {}", version);
        version
    }

    /// The current grid snapshot.
    pub fn snapshot(&self) -> Arc<GridSnapshot<C>> {
        self.grid.borrow().clone()
    }

    /// Receiver notified whenever a new grid is published.
    pub fn subscribe(&self) -> watch::Receiver<Arc<GridSnapshot<C>>> {
        self.grid.subscribe()
    }

    /// Searches on the current snapshot without blocking the async runtime.
    pub async fn request(&self, request: PathRequest<C>) -> GrottoResult<PathResponse<C>> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let snapshot = self.snapshot();
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| GrottoError::Worker(e.to_string()))?;

        let pathfinder = self.pathfinder.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let agent_size = pathfinder.config().agent_size;
            let outcome = pathfinder
                .find_path(&snapshot.grid, request.start, request.target)
                .map_path(|path| request.post.apply(path, &snapshot.grid, agent_size));
            PathResponse {
                id,
                grid_version: snapshot.version,
                outcome,
            }
        });

        let response = handle
            .await
            .map_err(|e| GrottoError::Worker(format!("path request {} failed: {}", id, e)))?;
        log::debug!(
            "path request {} on grid version {} finished: found={}",
            id,
            response.grid_version,
            response.outcome.is_found()
        );
        Ok(response)
    }
}
