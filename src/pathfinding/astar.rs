//! # A* Search
//!
//! Octile A* over any [`Mapper`], with agent footprints, corner-cutting
//! control, partial results and a step budget.

use super::heap::IndexedHeap;
use super::node::{NodeState, NodeTable};
use super::{NoPathReason, Path, PathOutcome, PathfindingConfig};
use crate::grid::{Coord, Mapper};
use crate::GrottoResult;

/// A* pathfinder over 8-connected (2D) or 26-connected (3D) grids.
///
/// Step costs are the octile distances 10, 14 and 20 scaled by the mapper's
/// averaged walk multiplier plus its traversal penalty. The heuristic is the
/// octile distance itself, so paths are optimal as long as no multiplier is
/// below one.
///
/// # Examples
///
/// ```
/// use grotto::pathfinding::{AStarPathfinder, PathfindingConfig};
/// use grotto::{Coord2, Tile, TileGrid};
///
/// let grid = TileGrid::filled(Coord2::new(10, 10), Tile::Room);
/// let pathfinder = AStarPathfinder::new(PathfindingConfig::new()).unwrap();
/// let outcome = pathfinder.find_path(&grid, Coord2::new(0, 0), Coord2::new(9, 9));
/// let path = outcome.path().unwrap();
/// assert_eq!(path.tiles.len(), 10);
/// assert_eq!(path.cost, 126.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AStarPathfinder {
    config: PathfindingConfig,
}

impl AStarPathfinder {
    /// Creates a pathfinder after validating its configuration.
    pub fn new(config: PathfindingConfig) -> GrottoResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PathfindingConfig {
        &self.config
    }

    /// Searches for a path from `start` to `target`.
    ///
    /// The search ends as soon as `target` lies within the footprint of the
    /// node being expanded. Invalid endpoints, an exhausted open set and an
    /// exceeded step budget are reported through the outcome, never as errors.
    pub fn find_path<C, M>(&self, mapper: &M, start: C, target: C) -> PathOutcome<C>
    where
        C: Coord,
        M: Mapper<C> + ?Sized,
    {
        let size = self.config.agent_size;

        if !mapper.is_walkable(start, size) {
            log::debug!("start {:?} is not walkable", start);
            return PathOutcome::NoPath(NoPathReason::StartInvalid);
        }
        if !mapper.is_pathable(target) && !self.config.allow_partial_path {
            log::debug!("target {:?} is not walkable", target);
            return PathOutcome::NoPath(NoPathReason::TargetInvalid);
        }

        let heuristic = |coord: C| coord.octile_cost(target) as f32;

        let mut nodes = NodeTable::new();
        let mut open = IndexedHeap::new();

        let first = nodes.insert(start, heuristic(start));
        if let Some(node) = nodes.get_mut(first) {
            node.g = 0.0;
            node.state = NodeState::Frontier;
        }
        open.push(first, nodes.as_mut_slice());

        let mut closest = first;
        let mut closest_distance = start.octile_cost(target);
        let mut expanded = 0usize;

        while let Some(current) = open.pop(nodes.as_mut_slice()) {
            let Some(node) = nodes.get_mut(current) else {
                break;
            };
            node.state = NodeState::Finalized;
            let (coord, g) = (node.coord, node.g);

            if coord.footprint_contains(target, size) {
                log::debug!("path found after expanding {} nodes", expanded);
                return PathOutcome::Found(Path::new(nodes.retrace(current), g));
            }

            // Exact integer distance; `h` loses precision for far targets.
            let distance = coord.octile_cost(target);
            if distance < closest_distance {
                closest = current;
                closest_distance = distance;
            }

            expanded += 1;
            if self.config.max_steps.map_or(false, |limit| expanded > limit) {
                log::debug!("step budget of {} nodes exhausted", expanded - 1);
                return self.give_up(&nodes, closest, first, NoPathReason::StepLimit);
            }

            for &offset in C::NEIGHBOURS {
                let next = coord + offset;
                if !mapper.is_walkable(next, size) {
                    continue;
                }
                if !self.config.allow_corner_cutting
                    && offset
                        .corner_offsets()
                        .into_iter()
                        .any(|corner| !mapper.is_walkable(coord + corner, size))
                {
                    continue;
                }

                let existing = nodes.index_of(next);
                if let Some(index) = existing {
                    if nodes.get(index).map_or(true, |n| n.state == NodeState::Finalized) {
                        continue;
                    }
                }

                let step = coord.octile_cost(next) as f32 * mapper.walk_cost(next, size)
                    + mapper.traversal_penalty(next);
                let tentative = g + step;

                let index = existing.unwrap_or_else(|| nodes.insert(next, heuristic(next)));
                let Some(neighbour) = nodes.get_mut(index) else {
                    continue;
                };
                if tentative < neighbour.g {
                    neighbour.g = tentative;
                    neighbour.parent = Some(current);
                    if neighbour.state == NodeState::Frontier {
                        open.update(index, nodes.as_mut_slice());
                    } else {
                        neighbour.state = NodeState::Frontier;
                        open.push(index, nodes.as_mut_slice());
                    }
                }
            }
        }

        log::debug!("open set exhausted after expanding {} nodes", expanded);
        self.give_up(&nodes, closest, first, NoPathReason::Exhausted)
    }

    fn give_up<C: Coord>(
        &self,
        nodes: &NodeTable<C>,
        closest: usize,
        start: usize,
        reason: NoPathReason,
    ) -> PathOutcome<C> {
        if !self.config.allow_partial_path || closest == start {
            return PathOutcome::NoPath(reason);
        }
        let cost = nodes.get(closest).map_or(0.0, |node| node.g);
        PathOutcome::Partial(Path::new(nodes.retrace(closest), cost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coord2, Coord3, Tile, TileGrid, WeightedMapper};

    fn open_grid(width: i32, height: i32) -> TileGrid<Coord2> {
        TileGrid::filled(Coord2::new(width, height), Tile::Room)
    }

    fn pathfinder(config: PathfindingConfig) -> AStarPathfinder {
        AStarPathfinder::new(config).unwrap()
    }

    #[test]
    fn test_start_equals_target() {
        let grid = open_grid(3, 3);
        let outcome = pathfinder(PathfindingConfig::new()).find_path(&grid, Coord2::new(1, 1), Coord2::new(1, 1));
        let path = outcome.path().unwrap();
        assert_eq!(path.tiles, vec![Coord2::new(1, 1)]);
        assert_eq!(path.cost, 0.0);
    }

    #[test]
    fn test_invalid_endpoints() {
        let mut grid = open_grid(5, 5);
        grid.set(Coord2::new(4, 4), Tile::Wall).unwrap();
        let finder = pathfinder(PathfindingConfig::new());

        assert_eq!(
            finder.find_path(&grid, Coord2::new(-1, 0), Coord2::new(2, 2)),
            PathOutcome::NoPath(NoPathReason::StartInvalid)
        );
        assert_eq!(
            finder.find_path(&grid, Coord2::new(0, 0), Coord2::new(4, 4)),
            PathOutcome::NoPath(NoPathReason::TargetInvalid)
        );
    }

    #[test]
    fn test_far_start_with_large_agent() {
        let grid = open_grid(4, 4);
        let big = pathfinder(PathfindingConfig::new().with_agent_size(2));
        for start in [Coord2::new(i32::MAX, 0), Coord2::new(i32::MIN, i32::MAX)] {
            assert_eq!(
                big.find_path(&grid, start, Coord2::new(1, 1)),
                PathOutcome::NoPath(NoPathReason::StartInvalid)
            );
        }
    }

    #[test]
    fn test_partial_path_toward_far_target() {
        let grid = open_grid(4, 4);
        let mut config = PathfindingConfig::new();
        config.allow_partial_path = true;
        let finder = pathfinder(config.clone());

        let outcome = finder.find_path(&grid, Coord2::new(0, 0), Coord2::new(i32::MAX, 0));
        match outcome {
            PathOutcome::Partial(path) => assert_eq!(path.end(), Some(Coord2::new(3, 0))),
            other => panic!("expected a partial path, got {:?}", other),
        }

        // Already as close as the grid allows.
        assert_eq!(
            finder.find_path(&grid, Coord2::new(0, 0), Coord2::new(i32::MIN, 0)),
            PathOutcome::NoPath(NoPathReason::Exhausted)
        );

        let big = pathfinder(config.with_agent_size(2));
        let outcome = big.find_path(&grid, Coord2::new(0, 0), Coord2::new(i32::MIN, i32::MIN));
        assert!(!outcome.is_found());
    }

    #[test]
    fn test_wall_column_with_opening() {
        let grid = TileGrid::bake(Coord2::new(5, 5), |c| c.x != 2 || c.y == 2);
        let outcome = pathfinder(PathfindingConfig::new()).find_path(&grid, Coord2::new(0, 0), Coord2::new(4, 4));
        let path = outcome.path().unwrap();
        assert!(path.tiles.contains(&Coord2::new(2, 2)));
        assert_eq!(path.tiles.first(), Some(&Coord2::new(0, 0)));
        assert_eq!(path.tiles.last(), Some(&Coord2::new(4, 4)));
    }

    #[test]
    fn test_no_corner_cutting_by_default() {
        // Two rooms touching only diagonally.
        let grid = TileGrid::bake(Coord2::new(2, 2), |c| c.x == c.y);
        let strict = pathfinder(PathfindingConfig::new());
        assert_eq!(
            strict.find_path(&grid, Coord2::new(0, 0), Coord2::new(1, 1)),
            PathOutcome::NoPath(NoPathReason::Exhausted)
        );

        let mut config = PathfindingConfig::new();
        config.allow_corner_cutting = true;
        let loose = pathfinder(config);
        assert!(loose
            .find_path(&grid, Coord2::new(0, 0), Coord2::new(1, 1))
            .is_found());
    }

    #[test]
    fn test_partial_path_reaches_closest_tile() {
        let grid = TileGrid::bake(Coord2::new(7, 3), |c| c.x != 4);
        let mut config = PathfindingConfig::new();
        config.allow_partial_path = true;
        let outcome = pathfinder(config).find_path(&grid, Coord2::new(0, 1), Coord2::new(6, 1));
        match outcome {
            PathOutcome::Partial(path) => {
                assert_eq!(path.tiles.last(), Some(&Coord2::new(3, 1)));
            }
            other => panic!("expected a partial path, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_path_toward_wall_target() {
        let mut grid = open_grid(5, 1);
        grid.set(Coord2::new(4, 0), Tile::Wall).unwrap();
        let mut config = PathfindingConfig::new();
        config.allow_partial_path = true;
        let outcome = pathfinder(config).find_path(&grid, Coord2::new(0, 0), Coord2::new(4, 0));
        assert_eq!(outcome.path().and_then(|p| p.tiles.last().copied()), Some(Coord2::new(3, 0)));
        assert!(!outcome.is_found());
    }

    #[test]
    fn test_step_budget() {
        let grid = open_grid(30, 30);
        let mut config = PathfindingConfig::new();
        config.max_steps = Some(5);
        assert_eq!(
            pathfinder(config).find_path(&grid, Coord2::new(0, 0), Coord2::new(29, 29)),
            PathOutcome::NoPath(NoPathReason::StepLimit)
        );
    }

    #[test]
    fn test_large_agent_needs_room() {
        // A one-tile gap blocks a 2x2 agent but not a 1x1 agent.
        let grid = TileGrid::bake(Coord2::new(7, 7), |c| c.x != 3 || c.y == 3);
        let small = pathfinder(PathfindingConfig::new());
        assert!(small.find_path(&grid, Coord2::new(0, 0), Coord2::new(6, 6)).is_found());

        let big = pathfinder(PathfindingConfig::new().with_agent_size(2));
        assert_eq!(
            big.find_path(&grid, Coord2::new(0, 0), Coord2::new(5, 5)),
            PathOutcome::NoPath(NoPathReason::Exhausted)
        );
    }

    #[test]
    fn test_large_agent_stops_when_target_in_footprint() {
        let grid = open_grid(6, 6);
        let big = pathfinder(PathfindingConfig::new().with_agent_size(2));
        let outcome = big.find_path(&grid, Coord2::new(0, 0), Coord2::new(5, 5));
        assert_eq!(outcome.path().and_then(|p| p.tiles.last().copied()), Some(Coord2::new(4, 4)));
    }

    #[test]
    fn test_weighted_tiles_are_avoided() {
        let grid = open_grid(5, 3);
        let mud = WeightedMapper::new(&grid, |c: Coord2| -> f32 { if c.y == 1 && c.x == 2 { 10.0 } else { 1.0 } });
        let outcome = pathfinder(PathfindingConfig::new()).find_path(&mud, Coord2::new(0, 1), Coord2::new(4, 1));
        let path = outcome.path().unwrap();
        assert!(!path.tiles.contains(&Coord2::new(2, 1)));
        assert_eq!(path.cost, 48.0);
    }

    #[test]
    fn test_3d_diagonal_cost() {
        let grid = TileGrid::filled(Coord3::new(4, 4, 4), Tile::Room);
        let outcome = pathfinder(PathfindingConfig::new()).find_path(&grid, Coord3::new(0, 0, 0), Coord3::new(3, 3, 3));
        let path = outcome.path().unwrap();
        assert_eq!(path.tiles.len(), 4);
        assert_eq!(path.cost, 60.0);
    }
}
