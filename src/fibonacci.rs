//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert, find-min and union
//! - O(log n) amortized extract-min
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked list and the heap keeps a handle to the minimum
//! root.
//!
//! # Arena and heap tokens
//!
//! Nodes live in a [`FibonacciArena`], which may host any number of heaps. A
//! [`FibonacciHeap`] is a small token (minimum handle plus node count) that
//! identifies one heap inside its arena. Because both heaps of a union share
//! one arena, union splices the two root lists by reassigning four sibling
//! handles and never touches a node record.
//!
//! Tokens are neither `Clone` nor `Copy`: [`FibonacciArena::union`] takes both
//! by value, so the second heap cannot be used once its nodes belong to the
//! first.

use tracing::{debug, instrument};

use crate::config::HeapConfig;
use crate::consolidate::consolidate;
use crate::error::HeapError;
use crate::ring::{self, Ring};
use crate::storage::{ArenaId, NodeHandle, NodeKey, NodeStore};

/// One heap hosted by a [`FibonacciArena`].
///
/// Created by [`FibonacciArena::create_heap`]; every operation on it goes
/// through the arena that created it.
#[derive(Debug)]
pub struct FibonacciHeap {
    min: Option<NodeKey>,
    len: usize,
    arena: ArenaId,
}

impl FibonacciHeap {
    /// Returns the number of nodes in the heap
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Returns the handle of the minimum root, if any
    pub fn min_handle(&self) -> Option<NodeHandle> {
        self.min.map(|min| NodeHandle::new(self.arena, min))
    }

    pub(crate) fn min_key(&self) -> Option<NodeKey> {
        self.min
    }

    #[cfg(test)]
    pub(crate) fn set_len_for_tests(&mut self, len: usize) {
        self.len = len;
    }
}

/// A node removed by [`FibonacciArena::extract_min`].
///
/// The handle is stale from the moment it is returned; the key is owned by
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<K> {
    /// Handle the node had while it was in the heap.
    pub handle: NodeHandle,
    /// The extracted key.
    pub key: K,
}

/// Node host for one or more Fibonacci heaps.
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::FibonacciArena;
///
/// let mut arena: FibonacciArena<i64> = FibonacciArena::new();
/// let mut a = arena.create_heap();
/// let mut b = arena.create_heap();
/// arena.insert(&mut a, 3);
/// arena.insert(&mut a, 7);
/// arena.insert(&mut b, 1);
///
/// let mut merged = arena.union(a, b);
/// assert_eq!(arena.find_min(&merged), Some(&1));
/// assert_eq!(arena.extract_min(&mut merged).map(|e| e.key), Some(1));
/// assert_eq!(arena.find_min(&merged), Some(&3));
/// ```
#[derive(Debug)]
pub struct FibonacciArena<K = i64> {
    store: NodeStore<K>,
    config: HeapConfig,
    id: ArenaId,
}

impl<K> Default for FibonacciArena<K> {
    fn default() -> Self {
        Self::with_config(HeapConfig::default())
    }
}

impl<K> FibonacciArena<K> {
    /// Creates an empty arena with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty arena with the given configuration
    pub fn with_config(config: HeapConfig) -> Self {
        Self {
            store: NodeStore::default(),
            config,
            id: ArenaId::next(),
        }
    }

    /// Returns the arena configuration
    pub fn config(&self) -> &HeapConfig {
        &self.config
    }

    /// Returns the number of live nodes across all heaps in the arena
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if no heap in the arena holds a node
    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Creates a new empty heap hosted by this arena
    pub fn create_heap(&self) -> FibonacciHeap {
        FibonacciHeap {
            min: None,
            len: 0,
            arena: self.id,
        }
    }

    /// Returns true if `handle` was issued by this arena and its node is
    /// still live
    pub fn contains(&self, handle: NodeHandle) -> bool {
        handle.arena() == self.id && self.store.contains(handle.node_key())
    }

    /// Returns the key stored at `handle`
    ///
    /// # Errors
    /// Returns [`HeapError::ForeignHandle`] if another arena issued the
    /// handle, or [`HeapError::InvalidHandle`] if the node was extracted.
    pub fn key(&self, handle: NodeHandle) -> Result<&K, HeapError> {
        let key = self.resolve(handle)?;
        Ok(self.store.key(key))
    }

    /// Maps a caller-supplied handle to a live slot of this arena.
    pub(crate) fn resolve(&self, handle: NodeHandle) -> Result<NodeKey, HeapError> {
        if handle.arena() != self.id {
            return Err(HeapError::ForeignHandle { handle });
        }
        let key = handle.node_key();
        if self.store.contains(key) {
            Ok(key)
        } else {
            Err(HeapError::InvalidHandle { handle })
        }
    }

    /// Frees every node of `heap` and returns how many were freed
    ///
    /// Walks the trees with an explicit stack, so deep heaps cannot overflow
    /// the call stack.
    ///
    /// # Panics
    /// Panics if `heap` was created by a different arena.
    pub fn destroy(&mut self, heap: FibonacciHeap) -> usize {
        self.assert_owned(&heap);

        let mut stack: Vec<NodeKey> = Ring::new(&self.store, heap.min).collect();
        let mut freed = 0usize;
        while let Some(handle) = stack.pop() {
            if let Some(node) = self.store.free(handle) {
                // Children are still live: they are freed only after being pushed.
                stack.extend(Ring::new(&self.store, node.child));
                freed += 1;
            }
        }
        debug!(freed, recorded = heap.len, "destroyed heap");
        freed
    }

    pub(crate) fn store(&self) -> &NodeStore<K> {
        &self.store
    }

    pub(crate) fn id(&self) -> ArenaId {
        self.id
    }

    #[cfg(test)]
    pub(crate) fn store_mut_for_tests(&mut self) -> &mut NodeStore<K> {
        &mut self.store
    }

    pub(crate) fn assert_owned(&self, heap: &FibonacciHeap) {
        assert!(
            heap.arena == self.id,
            "FibonacciHeap used with an arena that did not create it"
        );
    }
}

impl<K: Ord> FibonacciArena<K> {
    /// Inserts `key` into `heap` and returns the new node's handle
    ///
    /// The node is added to the root list next to the current minimum.
    ///
    /// # Time Complexity
    /// O(1)
    ///
    /// # Panics
    /// Panics if `heap` was created by a different arena.
    pub fn insert(&mut self, heap: &mut FibonacciHeap, key: K) -> NodeHandle {
        self.assert_owned(heap);

        let node = self.store.allocate(key);
        match heap.min {
            Some(min) => {
                ring::splice_after(&mut self.store, min, node);
                if self.store.key(node) < self.store.key(min) {
                    heap.min = Some(node);
                }
            }
            None => heap.min = Some(node),
        }
        heap.len += 1;
        NodeHandle::new(self.id, node)
    }

    /// Returns the minimum key of `heap` without removing it
    ///
    /// # Time Complexity
    /// O(1)
    ///
    /// # Panics
    /// Panics if `heap` was created by a different arena.
    pub fn find_min(&self, heap: &FibonacciHeap) -> Option<&K> {
        self.assert_owned(heap);
        heap.min.map(|min| self.store.key(min))
    }

    /// Unions two heaps of this arena, consuming both
    ///
    /// `h2`'s root list is spliced to the right of `h1`'s minimum. The result
    /// keeps `h1`'s minimum unless `h2`'s is strictly smaller.
    ///
    /// # Time Complexity
    /// O(1)
    ///
    /// # Panics
    /// Panics if either heap was created by a different arena.
    pub fn union(&mut self, mut h1: FibonacciHeap, h2: FibonacciHeap) -> FibonacciHeap {
        self.merge(&mut h1, h2);
        h1
    }

    /// Moves every node of `other` into `into`
    ///
    /// In-place form of [`union`](Self::union).
    ///
    /// # Panics
    /// Panics if either heap was created by a different arena.
    #[instrument(level = "trace", skip_all, fields(len = into.len + other.len))]
    pub fn merge(&mut self, into: &mut FibonacciHeap, other: FibonacciHeap) {
        self.assert_owned(into);
        self.assert_owned(&other);

        let Some(other_min) = other.min else {
            return;
        };
        let Some(into_min) = into.min else {
            *into = other;
            return;
        };

        ring::splice_after(&mut self.store, into_min, other_min);
        if self.store.key(other_min) < self.store.key(into_min) {
            into.min = Some(other_min);
        }
        into.len += other.len;
    }

    /// Removes and returns the minimum of `heap`
    ///
    /// The minimum's children are promoted to the root list, then the roots
    /// are consolidated so that no two share a degree.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    ///
    /// # Panics
    /// Panics if `heap` was created by a different arena.
    #[instrument(level = "trace", skip_all, fields(len = heap.len))]
    pub fn extract_min(&mut self, heap: &mut FibonacciHeap) -> Option<Extracted<K>> {
        self.assert_owned(heap);
        let min = heap.min?;

        // Promote children to the root list
        let first_child = self.store.node(min).child;
        if let Some(child) = first_child {
            let mut current = child;
            loop {
                let next = self.store.right(current);
                self.store.node_mut(current).parent = None;
                if next == child {
                    break;
                }
                current = next;
            }
            ring::splice_after(&mut self.store, min, child);
            let node = self.store.node_mut(min);
            node.child = None;
            node.degree = 0;
        }

        let right = self.store.right(min);
        let remaining = heap.len - 1;
        heap.min = if ring::unlink(&mut self.store, min) {
            None
        } else {
            consolidate(
                &mut self.store,
                right,
                remaining,
                self.config.equal_key_policy(),
            )
        };
        heap.len = remaining;

        self.store.free(min).map(|node| Extracted {
            handle: NodeHandle::new(self.id, min),
            key: node.key,
        })
    }

    /// Extracts every key of `heap` in ascending order
    ///
    /// # Panics
    /// Panics if `heap` was created by a different arena.
    pub fn drain_sorted(&mut self, mut heap: FibonacciHeap) -> Vec<K> {
        let mut keys = Vec::with_capacity(heap.len);
        while let Some(extracted) = self.extract_min(&mut heap) {
            keys.push(extracted.key);
        }
        keys
    }
}
