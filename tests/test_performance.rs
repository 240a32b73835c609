//! Performance tests for generation and search

use grotto::pathfinding::PathfindingConfig;
use grotto::{find_path, generate_cave, CaveConfig, Coord2, GrottoResult, Tile, TileGrid};
use std::time::Instant;

#[test]
fn test_generation_performance() -> GrottoResult<()> {
    let start = Instant::now();
    let iterations = 10;

    for i in 0..iterations {
        let config = CaveConfig::new(format!("perf-{}", i));
        let _cave = generate_cave::<Coord2>(&config)?;
    }

    let elapsed = start.elapsed();
    let avg_generation_time = elapsed / iterations;

    println!("Average 64x64 generation time: {:?}", avg_generation_time);

    // Generous bound so unoptimized test builds pass
    assert!(
        avg_generation_time.as_millis() < 2000,
        "Generation too slow: {:?}",
        avg_generation_time
    );

    Ok(())
}

#[test]
fn test_search_performance() -> GrottoResult<()> {
    // Open floor with a long wall forcing a detour
    let grid = TileGrid::bake(Coord2::new(128, 128), |c| c.x != 64 || c.y > 120);
    let config = PathfindingConfig::new();

    let start = Instant::now();
    let iterations = 10;

    for _ in 0..iterations {
        let outcome = find_path(&grid, Coord2::new(0, 0), Coord2::new(127, 0), &config)?;
        assert!(outcome.is_found());
    }

    let elapsed = start.elapsed();
    let avg_search_time = elapsed / iterations;

    println!("Average 128x128 search time: {:?}", avg_search_time);
    assert_eq!(grid.count(Tile::Wall), 121);

    assert!(
        avg_search_time.as_millis() < 2000,
        "Search too slow: {:?}",
        avg_search_time
    );

    Ok(())
}
