//! Integration tests for A* search and path post-processing.

use grotto::pathfinding::{find_path, AStarPathfinder, NoPathReason, PathfindingConfig};
use grotto::{
    generate_cave, CaveConfig, Coord, Coord2, Coord3, Mapper, PathOutcome, Tile, TileGrid,
};
use pathfinding::prelude::dijkstra;
use proptest::prelude::*;

/// Reference successors: the same moves A* may take, without corner cutting.
fn successors<C: Coord>(grid: &TileGrid<C>, coord: C) -> Vec<(C, u64)> {
    C::NEIGHBOURS
        .iter()
        .map(|&offset| (offset, coord + offset))
        .filter(|&(offset, next)| {
            grid.is_pathable(next)
                && offset
                    .corner_offsets()
                    .into_iter()
                    .all(|corner| grid.is_pathable(coord + corner))
        })
        .map(|(_, next)| (next, coord.octile_cost(next)))
        .collect()
}

#[test]
fn test_open_grid_diagonal() {
    let grid = TileGrid::filled(Coord2::new(10, 10), Tile::Room);
    let outcome = find_path(&grid, Coord2::new(0, 0), Coord2::new(9, 9), &PathfindingConfig::new())
        .expect("valid config");

    let path = outcome.into_path().expect("open grid has a path");
    assert_eq!(path.cost, 126.0);
    assert_eq!(path.tiles.len(), 10);
    assert_eq!(path.trimmed().tiles, vec![Coord2::new(0, 0), Coord2::new(9, 9)]);
}

#[test]
fn test_column_with_single_opening() {
    let grid = TileGrid::bake(Coord2::new(5, 5), |c| c.x != 2 || c.y == 2);
    let outcome = find_path(&grid, Coord2::new(0, 0), Coord2::new(4, 4), &PathfindingConfig::new())
        .expect("valid config");
    let path = outcome.into_path().expect("gap at (2, 2) is passable");
    assert!(path.tiles.contains(&Coord2::new(2, 2)));

    let sealed = TileGrid::bake(Coord2::new(5, 5), |c| c.x != 2);
    assert_eq!(
        find_path(&sealed, Coord2::new(0, 0), Coord2::new(4, 4), &PathfindingConfig::new())
            .expect("valid config"),
        PathOutcome::NoPath(NoPathReason::Exhausted)
    );
}

#[test]
fn test_row_through_single_opening() {
    let grid = TileGrid::bake(Coord2::new(5, 5), |c| c.x != 2 || c.y == 2);
    let path = find_path(&grid, Coord2::new(0, 2), Coord2::new(4, 2), &PathfindingConfig::new())
        .expect("valid config")
        .into_path()
        .expect("gap at (2, 2) is passable");

    let expected: Vec<Coord2> = (0..5).map(|x| Coord2::new(x, 2)).collect();
    assert_eq!(path.tiles, expected);
    assert_eq!(path.cost, 40.0);
    assert_eq!(path.trimmed().tiles, vec![Coord2::new(0, 2), Coord2::new(4, 2)]);
}

#[test]
fn test_paths_through_generated_caves() {
    let cave = generate_cave::<Coord2>(&CaveConfig::new("tunnels")).expect("generation failed");
    let open: Vec<Coord2> = cave.grid.coords().filter(|&c| cave.grid.is_room(c)).collect();
    let (start, target) = (open[0], open[open.len() - 1]);

    let pathfinder = AStarPathfinder::new(PathfindingConfig::new()).expect("valid config");
    let path = pathfinder
        .find_path(&cave.grid, start, target)
        .into_path()
        .expect("generated caves are connected");

    let (_, reference) = dijkstra(&start, |&c| successors(&cave.grid, c), |&c| c == target)
        .expect("reference search agrees on connectivity");
    assert_eq!(path.cost as u64, reference);

    let smoothed = path.smoothed(&cave.grid, 1);
    assert_eq!(smoothed.start(), Some(start));
    assert_eq!(smoothed.end(), Some(target));
    assert!(smoothed.len() <= path.len());
}

#[test]
fn test_3d_path_matches_reference() {
    let grid = TileGrid::bake(Coord3::new(6, 6, 6), |c| !(c.z == 3 && !(c.x == 5 && c.y == 5)));
    let start = Coord3::new(0, 0, 0);
    let target = Coord3::new(0, 0, 5);

    let path = find_path(&grid, start, target, &PathfindingConfig::new())
        .expect("valid config")
        .into_path()
        .expect("hole at (5, 5, 3)");
    let (_, reference) =
        dijkstra(&start, |&c| successors(&grid, c), |&c| c == target).expect("reachable");
    assert_eq!(path.cost as u64, reference);
    assert!(path.tiles.contains(&Coord3::new(5, 5, 3)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_astar_matches_dijkstra(cells in prop::collection::vec(prop::bool::weighted(0.7), 64)) {
        let size = Coord2::new(8, 8);
        let start = Coord2::new(0, 0);
        let target = Coord2::new(7, 7);
        let grid = TileGrid::bake(size, |c| {
            c == start || c == target || cells[c.to_index(size).unwrap_or(0)]
        });

        let outcome = find_path(&grid, start, target, &PathfindingConfig::new()).expect("valid config");
        let reference = dijkstra(&start, |&c| successors(&grid, c), |&c| c == target);

        match (outcome, reference) {
            (PathOutcome::Found(path), Some((_, cost))) => {
                prop_assert_eq!(path.cost as u64, cost);
                prop_assert_eq!(path.start(), Some(start));
                prop_assert_eq!(path.end(), Some(target));
            }
            (PathOutcome::NoPath(NoPathReason::Exhausted), None) => {}
            (outcome, reference) => {
                prop_assert!(false, "disagreement: {:?} vs {:?}", outcome, reference);
            }
        }
    }
}
