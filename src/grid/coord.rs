//! # Tile Coordinates
//!
//! Integer tile coordinates for 2D and 3D grids, plus the [`Coord`] trait that
//! lets generation and pathfinding code run unchanged in either dimension.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{Add, Sub};

/// Common behaviour of 2D and 3D tile coordinates.
///
/// A coordinate doubles as a grid extent: the size of a grid is stored as a
/// coordinate whose components are the width, height (and depth). Unused
/// components of a 2D coordinate are always zero.
pub trait Coord:
    Copy + Debug + Eq + Hash + Ord + Send + Sync + Add<Output = Self> + Sub<Output = Self> + 'static
{
    /// Number of active axes (2 or 3).
    const DIMENSIONS: usize;

    /// Offsets of the axis-aligned neighbours (4 in 2D, 6 in 3D).
    const AXES: &'static [Self];

    /// Offsets of every neighbour including diagonals (8 in 2D, 26 in 3D).
    const NEIGHBOURS: &'static [Self];

    /// Builds a coordinate from `[x, y, z]`, ignoring inactive axes.
    fn from_components(components: [i32; 3]) -> Self;

    /// Returns `[x, y, z]`; inactive axes are zero.
    fn components(self) -> [i32; 3];

    /// The origin.
    fn zero() -> Self {
        Self::from_components([0; 3])
    }

    /// A coordinate with every active component set to `value`.
    fn splat(value: i32) -> Self {
        Self::from_components([value; 3])
    }

    /// Number of tiles in a grid of this extent (zero if any axis is not positive).
    fn volume(self) -> usize {
        let c = self.components();
        c[..Self::DIMENSIONS]
            .iter()
            .map(|&v| usize::try_from(v).unwrap_or(0))
            .product()
    }

    /// Checks whether this coordinate lies inside a grid of extent `size`.
    fn within(self, size: Self) -> bool {
        let c = self.components();
        let s = size.components();
        (0..Self::DIMENSIONS).all(|axis| c[axis] >= 0 && c[axis] < s[axis])
    }

    /// Checks whether `tile` is covered by an agent of `size` tiles per axis
    /// anchored at this corner.
    ///
    /// Differences are taken in 64 bits, so any pair of coordinates works.
    fn footprint_contains(self, tile: Self, size: u32) -> bool {
        let anchor = self.components();
        let t = tile.components();
        let size = i64::from(size.max(1));
        (0..Self::DIMENSIONS).all(|axis| {
            let d = i64::from(t[axis]) - i64::from(anchor[axis]);
            (0..size).contains(&d)
        })
    }

    /// Checks whether this coordinate lies inside `[min, max]` on every axis.
    fn within_range(self, min: Self, max: Self) -> bool {
        let c = self.components();
        let lo = min.components();
        let hi = max.components();
        (0..Self::DIMENSIONS).all(|axis| c[axis] >= lo[axis] && c[axis] <= hi[axis])
    }

    /// Row-major index inside a grid of extent `size`, or `None` when out of bounds.
    fn to_index(self, size: Self) -> Option<usize> {
        if !self.within(size) {
            return None;
        }
        let c = self.components();
        let s = size.components();
        let mut index = 0usize;
        let mut stride = 1usize;
        for axis in 0..Self::DIMENSIONS {
            index += c[axis] as usize * stride;
            stride *= s[axis] as usize;
        }
        Some(index)
    }

    /// Inverse of [`Coord::to_index`].
    fn from_index(index: usize, size: Self) -> Self {
        let s = size.components();
        let mut rest = index;
        let mut c = [0i32; 3];
        for axis in 0..Self::DIMENSIONS {
            let extent = s[axis].max(1) as usize;
            c[axis] = (rest % extent) as i32;
            rest /= extent;
        }
        Self::from_components(c)
    }

    /// Squared Euclidean distance.
    fn distance_sq(self, other: Self) -> i64 {
        let a = self.components();
        let b = other.components();
        (0..Self::DIMENSIONS)
            .map(|axis| {
                let d = i64::from(a[axis]) - i64::from(b[axis]);
                d * d
            })
            .sum()
    }

    /// Distance to the nearest grid edge along any axis (0 for edge tiles).
    fn edge_distance(self, size: Self) -> i32 {
        let c = self.components();
        let s = size.components();
        (0..Self::DIMENSIONS)
            .map(|axis| c[axis].min(s[axis] - 1 - c[axis]))
            .min()
            .unwrap_or(0)
    }

    /// Octile movement cost scaled by ten.
    ///
    /// Moves along one axis cost 10, two axes 14 and three axes 20, so the
    /// 2D and 3D distance tables come out of the same formula. The result is
    /// exact for any pair of coordinates.
    fn octile_cost(self, other: Self) -> u64 {
        let a = self.components();
        let b = other.components();
        let mut d = [0u64; 3];
        for axis in 0..Self::DIMENSIONS {
            d[axis] = u64::from(a[axis].abs_diff(b[axis]));
        }
        d.sort_unstable_by(|l, r| r.cmp(l));
        20 * d[2] + 14 * (d[1] - d[2]) + 10 * (d[0] - d[1])
    }

    /// Per-axis sign of the components.
    fn signum(self) -> Self {
        let c = self.components();
        Self::from_components([c[0].signum(), c[1].signum(), c[2].signum()])
    }

    /// Divides every component by their greatest common divisor.
    ///
    /// Two steps point the same way exactly when their primitive vectors
    /// are equal. The zero vector stays zero.
    fn primitive(self) -> Self {
        let c = self.components();
        let divisor = c.iter().fold(0u32, |acc, &v| gcd(acc, v.unsigned_abs()));
        if divisor <= 1 {
            return self;
        }
        let d = divisor as i32;
        Self::from_components([c[0] / d, c[1] / d, c[2] / d])
    }

    /// Number of axes along which this offset is non-zero.
    fn active_axes(self) -> usize {
        let c = self.components();
        (0..Self::DIMENSIONS).filter(|&axis| c[axis] != 0).count()
    }

    /// Tiles covered by an agent of `size` tiles per axis anchored at this corner.
    fn footprint(self, size: u32) -> Vec<Self> {
        let size = size.max(1) as i32;
        let extent = Self::splat(size);
        (0..extent.volume())
            .map(|i| self + Self::from_index(i, extent))
            .collect()
    }

    /// Offsets in the cube `[-r, r]` on every active axis, row-major.
    fn cube_offsets(radius: i32) -> Vec<Self> {
        let r = radius.max(0);
        let extent = Self::splat(2 * r + 1);
        (0..extent.volume())
            .map(|i| Self::from_index(i, extent) - Self::splat(r))
            .collect()
    }

    /// Partial moves of a multi-axis step: each non-empty proper subset of
    /// its non-zero components. Used to forbid squeezing past corners.
    fn corner_offsets(self) -> Vec<Self> {
        let c = self.components();
        let axes: Vec<usize> = (0..Self::DIMENSIONS).filter(|&a| c[a] != 0).collect();
        if axes.len() < 2 {
            return Vec::new();
        }
        let full = (1u32 << axes.len()) - 1;
        (1..full)
            .map(|mask| {
                let mut partial = [0i32; 3];
                for (bit, &axis) in axes.iter().enumerate() {
                    if mask & (1 << bit) != 0 {
                        partial[axis] = c[axis];
                    }
                }
                Self::from_components(partial)
            })
            .collect()
    }
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// A tile position on a 2D grid.
///
/// # Examples
///
/// ```
/// use grotto::Coord2;
///
/// let pos = Coord2::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// assert_eq!(pos.adjacent_positions().len(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord2 {
    pub x: i32,
    pub y: i32,
}

impl Coord2 {
    /// Creates a new coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Calculates the Manhattan distance to another coordinate.
    ///
    /// # Examples
    ///
    /// ```
    /// use grotto::Coord2;
    ///
    /// assert_eq!(Coord2::new(0, 0).manhattan_distance(Coord2::new(3, 4)), 7);
    /// ```
    pub fn manhattan_distance(self, other: Coord2) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Calculates the Euclidean distance to another coordinate.
    pub fn euclidean_distance(self, other: Coord2) -> f64 {
        (self.distance_sq(other) as f64).sqrt()
    }

    /// Returns all 8 adjacent coordinates (including diagonals).
    pub fn adjacent_positions(self) -> Vec<Coord2> {
        Self::NEIGHBOURS.iter().map(|&d| self + d).collect()
    }

    /// Returns only the 4 axis-aligned adjacent coordinates.
    pub fn cardinal_adjacent_positions(self) -> Vec<Coord2> {
        Self::AXES.iter().map(|&d| self + d).collect()
    }
}

impl Coord for Coord2 {
    const DIMENSIONS: usize = 2;

    const AXES: &'static [Self] = &[
        Coord2::new(-1, 0),
        Coord2::new(0, -1),
        Coord2::new(1, 0),
        Coord2::new(0, 1),
    ];

    const NEIGHBOURS: &'static [Self] = &[
        Coord2::new(-1, 0),
        Coord2::new(0, 1),
        Coord2::new(1, 0),
        Coord2::new(0, -1),
        Coord2::new(-1, -1),
        Coord2::new(-1, 1),
        Coord2::new(1, 1),
        Coord2::new(1, -1),
    ];

    fn from_components(components: [i32; 3]) -> Self {
        Self::new(components[0], components[1])
    }

    fn components(self) -> [i32; 3] {
        [self.x, self.y, 0]
    }
}

impl Add for Coord2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Coord2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl From<(i32, i32)> for Coord2 {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A tile position on a 3D grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coord3 {
    /// Creates a new coordinate.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Calculates the Manhattan distance to another coordinate.
    pub fn manhattan_distance(self, other: Coord3) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }

    /// Returns all 26 adjacent coordinates.
    pub fn adjacent_positions(self) -> Vec<Coord3> {
        Self::NEIGHBOURS.iter().map(|&d| self + d).collect()
    }
}

impl Coord for Coord3 {
    const DIMENSIONS: usize = 3;

    const AXES: &'static [Self] = &[
        Coord3::new(-1, 0, 0),
        Coord3::new(0, -1, 0),
        Coord3::new(0, 0, -1),
        Coord3::new(1, 0, 0),
        Coord3::new(0, 1, 0),
        Coord3::new(0, 0, 1),
    ];

    const NEIGHBOURS: &'static [Self] = &[
        Coord3::new(-1, -1, -1),
        Coord3::new(-1, 0, -1),
        Coord3::new(-1, 1, -1),
        Coord3::new(0, 1, -1),
        Coord3::new(1, 1, -1),
        Coord3::new(1, 0, -1),
        Coord3::new(1, -1, -1),
        Coord3::new(0, -1, -1),
        Coord3::new(0, 0, -1),
        Coord3::new(-1, -1, 0),
        Coord3::new(-1, 0, 0),
        Coord3::new(-1, 1, 0),
        Coord3::new(0, 1, 0),
        Coord3::new(1, 1, 0),
        Coord3::new(1, 0, 0),
        Coord3::new(1, -1, 0),
        Coord3::new(0, -1, 0),
        Coord3::new(-1, -1, 1),
        Coord3::new(-1, 0, 1),
        Coord3::new(-1, 1, 1),
        Coord3::new(0, 1, 1),
        Coord3::new(1, 1, 1),
        Coord3::new(1, 0, 1),
        Coord3::new(1, -1, 1),
        Coord3::new(0, -1, 1),
        Coord3::new(0, 0, 1),
    ];

    fn from_components(components: [i32; 3]) -> Self {
        Self::new(components[0], components[1], components[2])
    }

    fn components(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Coord3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Coord3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl From<(i32, i32, i32)> for Coord3 {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}
