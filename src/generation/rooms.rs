//! # Room Graph
//!
//! Turns surviving room regions into [`Room`]s and links them into a single
//! connected cave by picking the closest pair of edge tiles, one link at a
//! time, starting from the largest room.

use super::regions::Region;
use super::utils::frame_width;
use crate::grid::{Coord, TileGrid};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A connected region of open tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room<C> {
    /// Index of the room in scan order
    pub id: u32,
    /// Every open tile of the room
    pub tiles: Vec<C>,
    /// Wall tiles bordering the room where a passage may start
    pub edge_tiles: Vec<C>,
    /// Ids of rooms this room has been linked to
    pub connections: Vec<u32>,
    /// Whether this is the room every other room is connected to
    pub is_main: bool,
    /// Whether a chain of links leads from this room to the main room
    pub is_connected_to_main: bool,
}

impl<C: Coord> Room<C> {
    /// Builds a room from its region.
    ///
    /// Edge tiles are the in-bounds wall tiles axis-adjacent to the region
    /// that lie inside `[border, extent - 1 - border]` on every axis. Each
    /// appears once, in discovery order.
    pub fn new(id: u32, tiles: Region<C>, grid: &TileGrid<C>, border: u32) -> Self {
        let size = grid.size();
        let border = frame_width(border);
        let min = C::splat(border);
        let max = size - C::splat(border.saturating_add(1));

        let mut seen = HashSet::new();
        let mut edge_tiles = Vec::new();
        for &tile in &tiles {
            for neighbour in grid.axis_neighbours(tile) {
                if grid.is_wall(neighbour)
                    && neighbour.within_range(min, max)
                    && seen.insert(neighbour)
                {
                    edge_tiles.push(neighbour);
                }
            }
        }

        Self {
            id,
            tiles,
            edge_tiles,
            connections: Vec::new(),
            is_main: false,
            is_connected_to_main: false,
        }
    }

    /// Number of open tiles in the room.
    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    /// Records a link to another room.
    pub fn add_connection(&mut self, other: u32) {
        if !self.connections.contains(&other) {
            self.connections.push(other);
        }
    }

    /// Checks if this room is directly linked to `other`.
    pub fn is_linked_to(&self, other: u32) -> bool {
        self.connections.contains(&other)
    }
}

/// A planned passage between two rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection<C> {
    /// Room the passage starts from (already connected to the main room)
    pub from_room: u32,
    /// Room the passage reaches
    pub to_room: u32,
    /// Edge tile of `from_room`
    pub a: C,
    /// Edge tile of `to_room`
    pub b: C,
}

/// Builds rooms from regions and plans the passages between them.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoomGraphConnector {
    border: u32,
}

impl RoomGraphConnector {
    /// Creates a connector that keeps passages out of a frame of `border` tiles.
    pub fn new(border: u32) -> Self {
        Self { border }
    }

    /// Wraps each region in a [`Room`] and marks the main room.
    pub fn build_rooms<C: Coord>(&self, regions: Vec<Region<C>>, grid: &TileGrid<C>) -> Vec<Room<C>> {
        let mut rooms: Vec<Room<C>> = regions
            .into_iter()
            .enumerate()
            .map(|(id, tiles)| Room::new(id as u32, tiles, grid, self.border))
            .collect();

        if let Some(main) = main_room_index(&rooms) {
            rooms[main].is_main = true;
            rooms[main].is_connected_to_main = true;
        }

        rooms
    }

    /// Links every room to the main room and returns the planned passages.
    ///
    /// All edge tiles of rooms already connected form one pool. Each round
    /// scans the unconnected rooms in order, the pool in insertion order and
    /// the room's edge tiles in order, keeping the first pair with a strictly
    /// smaller squared distance. The winning room joins the pool. With `n`
    /// rooms this yields `n - 1` connections.
    pub fn connect<C: Coord>(&self, rooms: &mut [Room<C>]) -> Vec<Connection<C>> {
        let mut connections = Vec::new();
        let Some(main) = main_room_index(rooms) else {
            return connections;
        };
        if rooms.len() < 2 {
            return connections;
        }

        let mut connected = vec![false; rooms.len()];
        connected[main] = true;
        let mut pool: Vec<(C, usize)> = rooms[main].edge_tiles.iter().map(|&t| (t, main)).collect();

        while connected.iter().any(|c| !c) {
            let mut best: Option<(i64, usize, usize, C, C)> = None;

            for (index, room) in rooms.iter().enumerate() {
                if connected[index] {
                    continue;
                }
                for &(a, owner) in &pool {
                    for &b in &room.edge_tiles {
                        let distance = a.distance_sq(b);
                        if best.map_or(true, |(d, ..)| distance < d) {
                            best = Some((distance, owner, index, a, b));
                        }
                    }
                }
            }

            let Some((_, owner, index, a, b)) = best else {
                log::warn!(
                    "{} rooms have no carvable edge and stay unconnected",
                    connected.iter().filter(|c| !**c).count()
                );
                break;
            };

            let from_room = rooms[owner].id;
            let to_room = rooms[index].id;
            rooms[owner].add_connection(to_room);
            rooms[index].add_connection(from_room);
            rooms[index].is_connected_to_main = true;
            connected[index] = true;
            pool.extend(rooms[index].edge_tiles.iter().map(|&t| (t, index)));

            connections.push(Connection {
                from_room,
                to_room,
                a,
                b,
            });
        }

        log::debug!("planned {} passages between {} rooms", connections.len(), rooms.len());
        connections
    }
}

/// Index of the largest room; ties go to the earliest.
pub fn main_room_index<C>(rooms: &[Room<C>]) -> Option<usize> {
    rooms
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, usize)>, (index, room)| match best {
            Some((_, size)) if size >= room.tiles.len() => best,
            _ => Some((index, room.tiles.len())),
        })
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::regions_of;
    use crate::{Coord2, Tile};

    /// Three rooms on a 12x5 grid: 3x3 at x=1..3, 2x3 at x=6..7, 1x3 at x=10.
    fn three_rooms() -> TileGrid<Coord2> {
        TileGrid::bake(Coord2::new(12, 5), |c| {
            (1..=3).contains(&c.y) && ((1..=3).contains(&c.x) || (6..=7).contains(&c.x) || c.x == 10)
        })
    }

    #[test]
    fn test_edge_tiles_respect_border() {
        let grid = three_rooms();
        let rooms = RoomGraphConnector::new(1).build_rooms(regions_of(&grid, Tile::Room), &grid);
        assert_eq!(rooms.len(), 3);

        for room in &rooms {
            for &edge in &room.edge_tiles {
                assert!(grid.is_wall(edge));
                assert!(edge.x >= 1 && edge.x <= 10 && edge.y >= 1 && edge.y <= 3);
            }
            let unique: HashSet<_> = room.edge_tiles.iter().collect();
            assert_eq!(unique.len(), room.edge_tiles.len());
        }
        // First room only touches the interior on its right side.
        assert_eq!(rooms[0].edge_tiles.len(), 3);

        let framed = RoomGraphConnector::new(u32::MAX).build_rooms(regions_of(&grid, Tile::Room), &grid);
        assert!(framed.iter().all(|room| room.edge_tiles.is_empty()));

        let unbounded = RoomGraphConnector::new(0).build_rooms(regions_of(&grid, Tile::Room), &grid);
        assert_eq!(unbounded[0].edge_tiles.len(), 12);
    }

    #[test]
    fn test_main_room_is_largest_earliest_on_tie() {
        let grid = three_rooms();
        let rooms = RoomGraphConnector::new(1).build_rooms(regions_of(&grid, Tile::Room), &grid);
        assert!(rooms[0].is_main);
        assert!(rooms[0].is_connected_to_main);
        assert!(!rooms[1].is_main);

        let twins = TileGrid::bake(Coord2::new(7, 3), |c| c.y == 1 && c.x != 3 && c.x != 0 && c.x != 6);
        let rooms = RoomGraphConnector::new(0).build_rooms(regions_of(&twins, Tile::Room), &twins);
        assert_eq!(rooms.len(), 2);
        assert_eq!(main_room_index(&rooms), Some(0));
    }

    #[test]
    fn test_connect_links_every_room() {
        let grid = three_rooms();
        let connector = RoomGraphConnector::new(1);
        let mut rooms = connector.build_rooms(regions_of(&grid, Tile::Room), &grid);
        let connections = connector.connect(&mut rooms);

        assert_eq!(connections.len(), 2);
        assert!(rooms.iter().all(|r| r.is_connected_to_main));

        // The middle room is closest to the main room, the thin room to the middle one.
        assert_eq!((connections[0].from_room, connections[0].to_room), (0, 1));
        assert_eq!((connections[1].from_room, connections[1].to_room), (1, 2));
        assert_eq!(connections[0].a.distance_sq(connections[0].b), 1);
        assert!(rooms[1].is_linked_to(0) && rooms[1].is_linked_to(2));
    }

    #[test]
    fn test_connect_degenerate_inputs() {
        let connector = RoomGraphConnector::new(0);
        let mut none: Vec<Room<Coord2>> = Vec::new();
        assert!(connector.connect(&mut none).is_empty());

        let grid = TileGrid::bake(Coord2::new(4, 4), |c| c == Coord2::new(1, 1));
        let mut single = connector.build_rooms(regions_of(&grid, Tile::Room), &grid);
        assert!(connector.connect(&mut single).is_empty());
        assert!(single[0].is_main);
    }
}
