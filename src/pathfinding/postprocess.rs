//! # Path Post-Processing
//!
//! Waypoint reduction for finished paths.

use crate::generation::line_tiles;
use crate::grid::{Coord, Mapper};

/// Drops interior points that continue in the same direction.
///
/// Directions are compared after reducing each step to its primitive
/// vector, so a path trims to the same result no matter how many times it
/// is trimmed. The endpoints are always kept.
///
/// # Examples
///
/// ```
/// use grotto::pathfinding::trim;
/// use grotto::Coord2;
///
/// let path: Vec<Coord2> = (0..5).map(|i| Coord2::new(i, i)).collect();
/// assert_eq!(trim(&path), vec![Coord2::new(0, 0), Coord2::new(4, 4)]);
/// ```
pub fn trim<C: Coord>(path: &[C]) -> Vec<C> {
    if path.len() <= 2 {
        return path.to_vec();
    }

    let mut trimmed = Vec::with_capacity(path.len());
    trimmed.push(path[0]);
    for window in path.windows(3) {
        let incoming = (window[1] - window[0]).primitive();
        let outgoing = (window[2] - window[1]).primitive();
        if incoming != outgoing {
            trimmed.push(window[1]);
        }
    }
    trimmed.push(path[path.len() - 1]);
    trimmed
}

/// Checks that an agent of `agent_size` can move straight from `a` to `b`.
///
/// Every tile of the digital line must be walkable, and multi-axis steps
/// also need their corner tiles walkable.
pub fn is_line_walkable<C, M>(mapper: &M, a: C, b: C, agent_size: u32) -> bool
where
    C: Coord,
    M: Mapper<C> + ?Sized,
{
    let line = line_tiles(a, b);
    if !line.iter().all(|&tile| mapper.is_walkable(tile, agent_size)) {
        return false;
    }
    line.windows(2).all(|pair| {
        (pair[1] - pair[0])
            .corner_offsets()
            .into_iter()
            .all(|corner| mapper.is_walkable(pair[0] + corner, agent_size))
    })
}

/// Removes waypoints that can be skipped with a straight walkable line.
///
/// For each point, if the point two ahead is directly reachable, the one in
/// between is removed and the check resumes one point back. This is a local
/// shortcut pass; it does not produce the tautest possible path.
pub fn smooth<C, M>(path: &[C], mapper: &M, agent_size: u32) -> Vec<C>
where
    C: Coord,
    M: Mapper<C> + ?Sized,
{
    let mut points = path.to_vec();
    let mut i = 0;
    while i + 2 < points.len() {
        if is_line_walkable(mapper, points[i], points[i + 2], agent_size) {
            points.remove(i + 1);
            i = i.saturating_sub(1);
        } else {
            i += 1;
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coord2, Coord3, Tile, TileGrid};
    use proptest::prelude::*;

    #[test]
    fn test_trim_keeps_turns() {
        let path = vec![
            Coord2::new(0, 0),
            Coord2::new(1, 0),
            Coord2::new(2, 0),
            Coord2::new(3, 1),
            Coord2::new(4, 2),
            Coord2::new(4, 3),
        ];
        assert_eq!(
            trim(&path),
            vec![
                Coord2::new(0, 0),
                Coord2::new(2, 0),
                Coord2::new(4, 2),
                Coord2::new(4, 3)
            ]
        );
    }

    #[test]
    fn test_trim_short_paths_unchanged() {
        let single = vec![Coord3::new(1, 2, 3)];
        assert_eq!(trim(&single), single);
        let pair = vec![Coord2::new(0, 0), Coord2::new(1, 1)];
        assert_eq!(trim(&pair), pair);
    }

    #[test]
    fn test_line_walkable_checks_corners() {
        let mut grid = TileGrid::filled(Coord2::new(3, 3), Tile::Room);
        assert!(is_line_walkable(&grid, Coord2::new(0, 0), Coord2::new(2, 2), 1));

        grid.set(Coord2::new(1, 0), Tile::Wall).unwrap();
        assert!(!is_line_walkable(&grid, Coord2::new(0, 0), Coord2::new(1, 1), 1));
        assert!(is_line_walkable(&grid, Coord2::new(0, 1), Coord2::new(2, 1), 1));
    }

    #[test]
    fn test_smooth_cuts_open_corners() {
        let grid = TileGrid::filled(Coord2::new(5, 5), Tile::Room);
        let path = vec![Coord2::new(0, 0), Coord2::new(4, 0), Coord2::new(4, 4)];
        assert_eq!(
            smooth(&path, &grid, 1),
            vec![Coord2::new(0, 0), Coord2::new(4, 4)]
        );
    }

    #[test]
    fn test_smooth_respects_walls() {
        // Wall block in the middle of an L-shaped route.
        let grid = TileGrid::bake(Coord2::new(5, 5), |c| !(c.x < 4 && c.y > 0));
        let path = vec![Coord2::new(0, 0), Coord2::new(4, 0), Coord2::new(4, 4)];
        assert_eq!(smooth(&path, &grid, 1), path);
    }

    fn step() -> impl Strategy<Value = Coord2> {
        prop::sample::select(Coord2::NEIGHBOURS.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn prop_trim_is_idempotent(steps in prop::collection::vec(step(), 0..40)) {
            let mut path = vec![Coord2::new(0, 0)];
            for s in steps {
                let next = *path.last().unwrap() + s;
                path.push(next);
            }
            let once = trim(&path);
            prop_assert_eq!(trim(&once), once.clone());
            prop_assert_eq!(once.first(), path.first());
            prop_assert_eq!(once.last(), path.last());
        }
    }
}
