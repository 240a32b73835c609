//! # Cave Generation
//!
//! Runs the whole pipeline for a 2D or 3D grid. The generator is generic over
//! the coordinate type; [`CaveGenerator2D`] and [`CaveGenerator3D`] are the
//! two concrete variants.

use super::{
    apply_border, carve, fill_random, prune_regions, regions_of, smooth, utils, CaveConfig,
    Connection, Generator, Room, RoomGraphConnector,
};
use crate::grid::{Coord, Coord2, Coord3, Tile, TileGrid};
use crate::{GrottoError, GrottoResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Output of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCave<C> {
    /// Finished tile grid
    pub grid: TileGrid<C>,
    /// Rooms that survived pruning, in scan order
    pub rooms: Vec<Room<C>>,
    /// Passages carved between rooms
    pub connections: Vec<Connection<C>>,
    /// Integer seed the RNG was created from
    pub seed: u64,
}

impl<C: Coord> GeneratedCave<C> {
    /// The room every other room is connected to.
    pub fn main_room(&self) -> Option<&Room<C>> {
        self.rooms.iter().find(|room| room.is_main)
    }

    /// Number of open tiles.
    pub fn open_tiles(&self) -> usize {
        self.grid.count(Tile::Room)
    }
}

/// Rooms and passages produced while generating into a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaveLayout<C> {
    pub rooms: Vec<Room<C>>,
    pub connections: Vec<Connection<C>>,
}

/// Cellular-automaton cave generator.
#[derive(Debug, Clone, Copy)]
pub struct CaveGenerator<C> {
    marker: PhantomData<C>,
}

/// Generator for 2D caves.
pub type CaveGenerator2D = CaveGenerator<Coord2>;

/// Generator for 3D caves.
pub type CaveGenerator3D = CaveGenerator<Coord3>;

impl<C: Coord> CaveGenerator<C> {
    /// Creates a new generator.
    pub fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }

    /// Regenerates `grid` in place, keeping its size.
    ///
    /// The stages run in this order: random fill with border, smoothing,
    /// wall pruning, border re-application, room pruning, room linking and
    /// passage carving. The size fields of `config` are ignored.
    pub fn generate_into(
        &self,
        grid: &mut TileGrid<C>,
        config: &CaveConfig,
        rng: &mut StdRng,
    ) -> GrottoResult<CaveLayout<C>> {
        let size = grid.size();
        log::debug!("filling {:?} grid with fill {}", size, config.fill);
        *grid = fill_random(size, config.fill, config.border_width, rng);

        *grid = smooth(grid, config.smooths);

        prune_regions(grid, Tile::Wall, config.wall_threshold);
        apply_border(grid, config.border_width);
        let regions = prune_regions(grid, Tile::Room, config.room_threshold);

        let connector = RoomGraphConnector::new(config.border_width);
        let mut rooms = connector.build_rooms(regions, grid);
        let connections = connector.connect(&mut rooms);
        carve(grid, &connections, config.passage_width, config.border_width);

        if rooms.is_empty() {
            log::warn!("no rooms survived pruning; the grid is solid");
        }

        Ok(CaveLayout { rooms, connections })
    }

    /// Checks that no open tile lies inside the border frame.
    fn validate_border(&self, grid: &TileGrid<C>, border: u32) -> GrottoResult<()> {
        let size = grid.size();
        let border = utils::frame_width(border);
        match grid
            .coords()
            .find(|&c| c.edge_distance(size) < border && grid.is_room(c))
        {
            Some(coord) => Err(GrottoError::GenerationFailed(format!(
                "open tile {:?} inside the border",
                coord
            ))),
            None => Ok(()),
        }
    }

    /// Checks that every open tile is reachable from every other one.
    fn validate_connectivity(&self, grid: &TileGrid<C>) -> GrottoResult<()> {
        let regions = regions_of(grid, Tile::Room);
        if regions.len() > 1 {
            return Err(GrottoError::GenerationFailed(format!(
                "cave has {} disconnected open regions",
                regions.len()
            )));
        }
        Ok(())
    }
}

impl<C: Coord> Default for CaveGenerator<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Coord> Generator<GeneratedCave<C>> for CaveGenerator<C> {
    fn generate(&self, config: &CaveConfig, rng: &mut StdRng) -> GrottoResult<GeneratedCave<C>> {
        config.validate()?;

        let mut grid = TileGrid::new(config.size::<C>());
        let layout = self.generate_into(&mut grid, config, rng)?;

        let cave = GeneratedCave {
            grid,
            rooms: layout.rooms,
            connections: layout.connections,
            seed: config.seed_value(),
        };

        log::info!(
            "generated {:?} cave '{}': {} rooms, {} passages, {} open tiles",
            cave.grid.size(),
            config.seed,
            cave.rooms.len(),
            cave.connections.len(),
            cave.open_tiles()
        );

        Ok(cave)
    }

    fn validate(&self, cave: &GeneratedCave<C>, config: &CaveConfig) -> GrottoResult<()> {
        if cave.grid.size() != config.size::<C>() {
            return Err(GrottoError::GenerationFailed(format!(
                "grid size {:?} does not match configuration",
                cave.grid.size()
            )));
        }
        self.validate_border(&cave.grid, config.border_width)?;
        self.validate_connectivity(&cave.grid)
    }

    fn generator_type(&self) -> &'static str {
        match C::DIMENSIONS {
            2 => "CaveGenerator2D",
            _ => "CaveGenerator3D",
        }
    }
}

/// Generates and validates a cave from a configuration.
///
/// # Examples
///
/// ```
/// use grotto::{generate_cave, CaveConfig, Coord2};
///
/// let config = CaveConfig::for_testing("readme");
/// let cave = generate_cave::<Coord2>(&config).unwrap();
/// assert_eq!(cave.grid.size(), Coord2::new(32, 24));
/// ```
pub fn generate_cave<C: Coord>(config: &CaveConfig) -> GrottoResult<GeneratedCave<C>> {
    let generator = CaveGenerator::<C>::new();
    let mut rng = utils::create_rng(config);
    let cave = generator.generate(config, &mut rng)?;
    generator.validate(&cave, config)?;
    Ok(cave)
}
