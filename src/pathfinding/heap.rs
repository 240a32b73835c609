//! # Indexed Binary Heap
//!
//! A binary min-heap over arena keys. Items live in a slice owned by the
//! caller and carry their own heap slot, which lets the search find and
//! re-prioritise an open node in O(log n) without scanning.

use std::cmp::Ordering;

/// An item that can be stored in an [`IndexedHeap`].
pub trait HeapItem {
    /// Current slot in the heap, or `None` when not queued.
    fn heap_index(&self) -> Option<usize>;

    /// Records the item's slot. Called by the heap on every move.
    fn set_heap_index(&mut self, index: Option<usize>);

    /// Priority order; `Ordering::Less` pops first.
    fn priority_cmp(&self, other: &Self) -> Ordering;
}

/// Binary min-heap of indices into a caller-owned item slice.
///
/// Keys passed to the heap must be valid indices of the slice handed to
/// every call, and the same slice must be used for the heap's lifetime.
///
/// # Examples
///
/// ```
/// use grotto::pathfinding::{HeapItem, IndexedHeap};
/// use std::cmp::Ordering;
///
/// struct Job { cost: u32, slot: Option<usize> }
///
/// impl HeapItem for Job {
///     fn heap_index(&self) -> Option<usize> { self.slot }
///     fn set_heap_index(&mut self, index: Option<usize>) { self.slot = index; }
///     fn priority_cmp(&self, other: &Self) -> Ordering { self.cost.cmp(&other.cost) }
/// }
///
/// let mut jobs = vec![Job { cost: 5, slot: None }, Job { cost: 2, slot: None }];
/// let mut heap = IndexedHeap::new();
/// heap.push(0, &mut jobs);
/// heap.push(1, &mut jobs);
///
/// jobs[0].cost = 1;
/// heap.update(0, &mut jobs);
/// assert_eq!(heap.pop(&mut jobs), Some(0));
/// assert_eq!(heap.pop(&mut jobs), Some(1));
/// assert!(heap.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct IndexedHeap {
    keys: Vec<usize>,
}

impl IndexedHeap {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Creates an empty heap with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
        }
    }

    /// Number of queued keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Checks if the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Key with the highest priority, without removing it.
    pub fn peek(&self) -> Option<usize> {
        self.keys.first().copied()
    }

    /// Queues `key`.
    pub fn push<T: HeapItem>(&mut self, key: usize, items: &mut [T]) {
        let slot = self.keys.len();
        self.keys.push(key);
        items[key].set_heap_index(Some(slot));
        self.sift_up(slot, items);
    }

    /// Removes and returns the key with the highest priority.
    pub fn pop<T: HeapItem>(&mut self, items: &mut [T]) -> Option<usize> {
        if self.keys.is_empty() {
            return None;
        }
        let last = self.keys.len() - 1;
        self.swap(0, last, items);
        let key = self.keys.pop()?;
        items[key].set_heap_index(None);
        if !self.keys.is_empty() {
            self.sift_down(0, items);
        }
        Some(key)
    }

    /// Restores order after the priority of `key` improved.
    ///
    /// Priorities may only improve between pushes; a worsened priority
    /// would need a sift down and is not supported.
    pub fn update<T: HeapItem>(&mut self, key: usize, items: &mut [T]) {
        if let Some(slot) = items[key].heap_index() {
            if self.keys.get(slot) == Some(&key) {
                self.sift_up(slot, items);
            }
        }
    }

    /// Checks if `key` is queued in this heap.
    pub fn contains<T: HeapItem>(&self, key: usize, items: &[T]) -> bool {
        items
            .get(key)
            .and_then(|item| item.heap_index())
            .map_or(false, |slot| self.keys.get(slot) == Some(&key))
    }

    /// Removes every key, clearing their slots.
    pub fn clear<T: HeapItem>(&mut self, items: &mut [T]) {
        for key in self.keys.drain(..) {
            items[key].set_heap_index(None);
        }
    }

    fn sift_up<T: HeapItem>(&mut self, mut slot: usize, items: &mut [T]) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.less(slot, parent, items) {
                self.swap(slot, parent, items);
                slot = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down<T: HeapItem>(&mut self, mut slot: usize, items: &mut [T]) {
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            if left >= self.keys.len() {
                break;
            }
            let child = if right < self.keys.len() && self.less(right, left, items) {
                right
            } else {
                left
            };
            if self.less(child, slot, items) {
                self.swap(child, slot, items);
                slot = child;
            } else {
                break;
            }
        }
    }

    fn less<T: HeapItem>(&self, a: usize, b: usize, items: &[T]) -> bool {
        items[self.keys[a]].priority_cmp(&items[self.keys[b]]) == Ordering::Less
    }

    fn swap<T: HeapItem>(&mut self, a: usize, b: usize, items: &mut [T]) {
        self.keys.swap(a, b);
        items[self.keys[a]].set_heap_index(Some(a));
        items[self.keys[b]].set_heap_index(Some(b));
    }
}
