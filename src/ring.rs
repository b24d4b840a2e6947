//! Circular doubly-linked list operations over arena handles.
//!
//! The root list and every child list are rings threaded through the
//! `left`/`right` fields of [`Node`](crate::storage::Node):
//! - A single node points to itself (both `left` and `right`)
//! - There is no head or tail; any node can be the entry point
//! - Splicing two rings together is O(1)
//! - Iteration wraps around, so the starting point must be tracked
//!
//! All operations are O(1) except iteration and are expressed as handle
//! reassignments.

use crate::storage::{NodeKey, NodeStore};

/// Makes `node` a ring of one element.
#[inline]
pub(crate) fn make_singleton<K>(store: &mut NodeStore<K>, node: NodeKey) {
    store.set_left(node, node);
    store.set_right(node, node);
}

/// Splices ring `b` into ring `a`, directly to the right of `a`.
///
/// Before:
///   Ring A: ... <-> a <-> a_next <-> ...
///   Ring B: ... <-> b_prev <-> b <-> ...
///
/// After:
///   ... <-> a <-> b <-> ... <-> b_prev <-> a_next <-> ...
///
/// When `b` is a singleton this is an insert-after. Reconnects exactly four
/// sibling handles regardless of ring sizes.
#[inline]
pub(crate) fn splice_after<K>(store: &mut NodeStore<K>, a: NodeKey, b: NodeKey) {
    let a_next = store.right(a);
    let b_prev = store.left(b);

    store.set_right(a, b);
    store.set_left(b, a);
    store.set_right(b_prev, a_next);
    store.set_left(a_next, b_prev);
}

/// Removes `node` from its ring and leaves it as a singleton.
///
/// Returns `true` if the node was the only element (the ring is now empty),
/// `false` if other nodes remain.
#[inline]
pub(crate) fn unlink<K>(store: &mut NodeStore<K>, node: NodeKey) -> bool {
    let right = store.right(node);
    if right == node {
        return true;
    }
    let left = store.left(node);
    store.set_right(left, right);
    store.set_left(right, left);
    make_singleton(store, node);
    false
}

/// Iterator over a ring, starting at a given node and following `right`.
///
/// The ring must not be modified while iterating; callers that relink nodes
/// collect the ring first.
pub(crate) struct Ring<'a, K> {
    store: &'a NodeStore<K>,
    start: NodeKey,
    next: Option<NodeKey>,
}

impl<'a, K> Ring<'a, K> {
    pub(crate) fn new(store: &'a NodeStore<K>, start: Option<NodeKey>) -> Self {
        match start {
            Some(start) => Self {
                store,
                start,
                next: Some(start),
            },
            None => Self {
                store,
                start: NodeKey::default(),
                next: None,
            },
        }
    }
}

impl<K> Iterator for Ring<'_, K> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let current = self.next?;
        let right = self.store.right(current);
        self.next = (right != self.start).then_some(right);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_keys(store: &NodeStore<i64>, start: NodeKey) -> Vec<i64> {
        Ring::new(store, Some(start))
            .map(|h| *store.key(h))
            .collect()
    }

    fn assert_consistent(store: &NodeStore<i64>, start: NodeKey) {
        for h in Ring::new(store, Some(start)) {
            assert_eq!(store.left(store.right(h)), h);
            assert_eq!(store.right(store.left(h)), h);
        }
    }

    #[test]
    fn test_splice_singletons() {
        let mut store = NodeStore::default();
        let a = store.allocate(1);
        let b = store.allocate(2);
        let c = store.allocate(3);

        splice_after(&mut store, a, b);
        splice_after(&mut store, a, c);

        assert_eq!(ring_keys(&store, a), vec![1, 3, 2]);
        assert_consistent(&store, a);
    }

    #[test]
    fn test_splice_two_rings() {
        let mut store = NodeStore::default();
        let a1 = store.allocate(1);
        let a2 = store.allocate(2);
        splice_after(&mut store, a1, a2);

        let b1 = store.allocate(10);
        let b2 = store.allocate(20);
        let b3 = store.allocate(30);
        splice_after(&mut store, b1, b3);
        splice_after(&mut store, b1, b2);
        assert_eq!(ring_keys(&store, b1), vec![10, 20, 30]);

        splice_after(&mut store, a1, b1);
        assert_eq!(ring_keys(&store, a1), vec![1, 10, 20, 30, 2]);
        assert_consistent(&store, a1);
    }

    #[test]
    fn test_unlink() {
        let mut store = NodeStore::default();
        let a = store.allocate(1);
        let b = store.allocate(2);
        let c = store.allocate(3);
        splice_after(&mut store, a, c);
        splice_after(&mut store, a, b);

        assert!(!unlink(&mut store, b));
        assert_eq!(ring_keys(&store, a), vec![1, 3]);
        assert_eq!(ring_keys(&store, b), vec![2]);
        assert_consistent(&store, a);

        assert!(!unlink(&mut store, c));
        assert!(unlink(&mut store, a));
        assert_eq!(ring_keys(&store, a), vec![1]);
    }

    #[test]
    fn test_empty_ring_iterator() {
        let store: NodeStore<i64> = NodeStore::default();
        assert_eq!(Ring::new(&store, None).count(), 0);
    }
}
