//! # Search Nodes
//!
//! Per-search node arena. Nodes are created lazily the first time a tile is
//! reached and refer to their predecessor by arena index.

use super::heap::HeapItem;
use crate::grid::Coord;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Lifecycle of a node during one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Created but never queued
    Unvisited,
    /// Queued in the open set
    Frontier,
    /// Expanded; its cost is final
    Finalized,
}

/// A tile reached by the search.
#[derive(Debug, Clone)]
pub struct PathNode<C> {
    pub coord: C,
    /// Cost of the best known route from the start
    pub g: f32,
    /// Estimated cost to the target
    pub h: f32,
    /// Arena index of the predecessor on the best known route
    pub parent: Option<usize>,
    pub state: NodeState,
    heap_index: Option<usize>,
}

impl<C: Coord> PathNode<C> {
    /// Creates an unreached node.
    pub fn new(coord: C, h: f32) -> Self {
        Self {
            coord,
            g: f32::INFINITY,
            h,
            parent: None,
            state: NodeState::Unvisited,
            heap_index: None,
        }
    }

    /// Total estimated cost through this node.
    pub fn f(&self) -> f32 {
        self.g + self.h
    }
}

impl<C> HeapItem for PathNode<C>
where
    C: Coord,
{
    fn heap_index(&self) -> Option<usize> {
        self.heap_index
    }

    fn set_heap_index(&mut self, index: Option<usize>) {
        self.heap_index = index;
    }

    fn priority_cmp(&self, other: &Self) -> Ordering {
        self.f()
            .total_cmp(&other.f())
            .then_with(|| self.h.total_cmp(&other.h))
    }
}

/// Arena of nodes with a coordinate lookup.
#[derive(Debug, Clone, Default)]
pub struct NodeTable<C> {
    nodes: Vec<PathNode<C>>,
    lookup: HashMap<C, usize>,
}

impl<C: Coord> NodeTable<C> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Arena index of the node for `coord`, if it was reached.
    pub fn index_of(&self, coord: C) -> Option<usize> {
        self.lookup.get(&coord).copied()
    }

    /// Adds a node for `coord` and returns its index.
    pub fn insert(&mut self, coord: C, h: f32) -> usize {
        let index = self.nodes.len();
        self.nodes.push(PathNode::new(coord, h));
        self.lookup.insert(coord, index);
        index
    }

    pub fn get(&self, index: usize) -> Option<&PathNode<C>> {
        self.nodes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut PathNode<C>> {
        self.nodes.get_mut(index)
    }

    /// The arena as a slice, for the open-set heap.
    pub fn as_mut_slice(&mut self) -> &mut [PathNode<C>] {
        &mut self.nodes
    }

    /// Number of nodes reached so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Coordinates from the start to the node at `index`.
    pub fn retrace(&self, index: usize) -> Vec<C> {
        let mut tiles = Vec::new();
        let mut cursor = Some(index);
        while let Some(node) = cursor.and_then(|i| self.nodes.get(i)) {
            tiles.push(node.coord);
            cursor = node.parent;
        }
        tiles.reverse();
        tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coord2;

    #[test]
    fn test_priority_breaks_ties_on_heuristic() {
        let mut a = PathNode::new(Coord2::new(0, 0), 10.0);
        let mut b = PathNode::new(Coord2::new(1, 0), 4.0);
        a.g = 4.0;
        b.g = 10.0;
        assert_eq!(a.f(), b.f());
        assert_eq!(b.priority_cmp(&a), Ordering::Less);
    }

    #[test]
    fn test_retrace_follows_parents() {
        let mut table = NodeTable::new();
        let a = table.insert(Coord2::new(0, 0), 0.0);
        let b = table.insert(Coord2::new(1, 1), 0.0);
        let c = table.insert(Coord2::new(2, 1), 0.0);
        table.get_mut(b).unwrap().parent = Some(a);
        table.get_mut(c).unwrap().parent = Some(b);

        assert_eq!(
            table.retrace(c),
            vec![Coord2::new(0, 0), Coord2::new(1, 1), Coord2::new(2, 1)]
        );
        assert_eq!(table.index_of(Coord2::new(1, 1)), Some(b));
        assert_eq!(table.index_of(Coord2::new(5, 5)), None);
    }
}
