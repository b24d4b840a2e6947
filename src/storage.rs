//! Arena storage for Fibonacci heap nodes
//!
//! Nodes live in a [`SlotMap`] and refer to each other through
//! [`NodeHandle`] keys instead of pointers. The root list, every child list and
//! the parent back-references form a cyclic graph that cannot be expressed as
//! tree-shaped ownership; with an arena every relation is a plain handle and
//! relinking is handle reassignment.
//!
//! # Characteristics
//! - Contiguous memory allocation (better cache locality than boxed nodes)
//! - Generational keys detect stale handles after extraction
//! - The store has no heap behaviour of its own; list manipulation and
//!   linking live in the ring and consolidation modules
//!
//! Internally nodes refer to each other by `NodeKey`, a bare slot key. The
//! public [`NodeHandle`] pairs that key with the id of the arena that issued
//! it, so a handle from one arena is never resolved against another.

use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::{new_key_type, SlotMap};

use crate::rank::Degree;

static NEXT_ARENA_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of one arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ArenaId(u64);

impl ArenaId {
    pub(crate) fn next() -> Self {
        ArenaId(NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed))
    }
}

new_key_type! {
    /// Slot key of a node inside one arena's store.
    pub(crate) struct NodeKey;
}

/// Stable handle to a node in a [`FibonacciArena`](crate::FibonacciArena).
///
/// Handles are generational: once the node is extracted the handle stays
/// stale forever, even if its slot is reused. A handle also remembers which
/// arena issued it; every other arena rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    arena: ArenaId,
    key: NodeKey,
}

impl NodeHandle {
    pub(crate) fn new(arena: ArenaId, key: NodeKey) -> Self {
        Self { arena, key }
    }

    pub(crate) fn arena(self) -> ArenaId {
        self.arena
    }

    pub(crate) fn node_key(self) -> NodeKey {
        self.key
    }
}

/// A single heap node.
///
/// `left` and `right` are the node's neighbours in whichever circular list it
/// currently belongs to (the root list or exactly one parent's child list).
/// A freshly created node is a singleton ring and points at itself.
#[derive(Debug, Clone)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) degree: Degree,
    /// Cleared on link; never set since cascading cut is not supported.
    pub(crate) mark: bool,
    pub(crate) parent: Option<NodeKey>,
    /// Entry point into the child ring.
    pub(crate) child: Option<NodeKey>,
    pub(crate) left: NodeKey,
    pub(crate) right: NodeKey,
}

/// Owner of every node record in an arena.
#[derive(Debug, Clone)]
pub(crate) struct NodeStore<K> {
    nodes: SlotMap<NodeKey, Node<K>>,
}

impl<K> Default for NodeStore<K> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }
}

impl<K> NodeStore<K> {
    /// Allocates a singleton node: no parent, no child, linked to itself.
    pub(crate) fn allocate(&mut self, key: K) -> NodeKey {
        self.nodes.insert_with_key(|handle| Node {
            key,
            degree: 0,
            mark: false,
            parent: None,
            child: None,
            left: handle,
            right: handle,
        })
    }

    /// Removes a node record. The caller must already have unlinked it.
    pub(crate) fn free(&mut self, handle: NodeKey) -> Option<Node<K>> {
        self.nodes.remove(handle)
    }

    #[inline]
    pub(crate) fn get(&self, handle: NodeKey) -> Option<&Node<K>> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn contains(&self, handle: NodeKey) -> bool {
        self.nodes.contains_key(handle)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Immutable access to a node known to be live.
    ///
    /// Internal relations only ever hold live handles, so a miss here means
    /// the structure itself is corrupt.
    #[inline]
    pub(crate) fn node(&self, handle: NodeKey) -> &Node<K> {
        &self.nodes[handle]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: NodeKey) -> &mut Node<K> {
        &mut self.nodes[handle]
    }

    #[inline]
    pub(crate) fn key(&self, handle: NodeKey) -> &K {
        &self.node(handle).key
    }

    #[inline]
    pub(crate) fn left(&self, handle: NodeKey) -> NodeKey {
        self.node(handle).left
    }

    #[inline]
    pub(crate) fn right(&self, handle: NodeKey) -> NodeKey {
        self.node(handle).right
    }

    #[inline]
    pub(crate) fn set_left(&mut self, handle: NodeKey, left: NodeKey) {
        self.node_mut(handle).left = left;
    }

    #[inline]
    pub(crate) fn set_right(&mut self, handle: NodeKey, right: NodeKey) {
        self.node_mut(handle).right = right;
    }
}
