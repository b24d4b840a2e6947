//! Link operator and consolidation engine.
//!
//! After extract-min the root list may hold many trees of the same degree.
//! Consolidation walks the roots once, linking equal-degree trees through a
//! degree-indexed table until every surviving root has a distinct degree, then
//! rebuilds the root list from the table and recomputes the minimum.

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::config::EqualKeyPolicy;
use crate::rank::{checked_increment, degree_table_capacity};
use crate::ring::{self, Ring};
use crate::storage::{NodeKey, NodeStore};

/// Degree table; 64 inline slots cover any heap that fits in memory.
type DegreeTable = SmallVec<[Option<NodeKey>; 64]>;

/// Links root `y` as a child of root `x`.
///
/// The caller guarantees `x.key <= y.key`, so heap order holds by
/// construction.
pub(crate) fn link<K>(store: &mut NodeStore<K>, y: NodeKey, x: NodeKey) {
    ring::unlink(store, y);

    let child = store.node_mut(y);
    child.parent = Some(x);
    child.mark = false;

    let first_child = store.node(x).child;
    match first_child {
        Some(first) => ring::splice_after(store, first, y),
        None => store.node_mut(x).child = Some(y),
    }

    let parent = store.node_mut(x);
    parent.degree = checked_increment(parent.degree);
    trace!(degree = parent.degree, "linked root under parent");
}

/// Consolidates the root ring containing `start` and returns the new minimum.
///
/// `remaining` is the number of nodes in the heap once the extracted minimum
/// is gone; it sizes the degree table at `floor(log₂ remaining) + 1` slots.
pub(crate) fn consolidate<K: Ord>(
    store: &mut NodeStore<K>,
    start: NodeKey,
    remaining: usize,
    policy: EqualKeyPolicy,
) -> Option<NodeKey> {
    let capacity = degree_table_capacity(remaining);
    let mut table: DegreeTable = SmallVec::from_elem(None, capacity);
    let mut deferred: SmallVec<[NodeKey; 8]> = SmallVec::new();
    let mut links = 0usize;

    // Links change ring membership mid-walk, so snapshot the roots first.
    let roots: SmallVec<[NodeKey; 32]> = Ring::new(store, Some(start)).collect();
    debug!(roots = roots.len(), remaining, capacity, "consolidating root list");

    for &root in &roots {
        let mut x = root;
        let mut d = usize::from(store.node(x).degree);
        loop {
            if d >= table.len() {
                warn!(
                    degree = d,
                    capacity = table.len(),
                    "degree table overflow, growing"
                );
                table.resize(d + 1, None);
            }
            let Some(y) = table[d] else {
                table[d] = Some(x);
                break;
            };
            if policy == EqualKeyPolicy::Skip && store.key(x) == store.key(y) {
                deferred.push(x);
                break;
            }
            let (parent, child) = if store.key(x) < store.key(y) {
                (x, y)
            } else {
                (y, x)
            };
            link(store, child, parent);
            links += 1;
            table[d] = None;
            x = parent;
            d += 1;
        }
    }

    let deferred_count = deferred.len();
    let mut survivors = 0usize;
    let mut min: Option<NodeKey> = None;
    for root in table.into_iter().flatten().chain(deferred) {
        ring::make_singleton(store, root);
        survivors += 1;
        match min {
            None => min = Some(root),
            Some(current) => {
                ring::splice_after(store, current, root);
                if store.key(root) < store.key(current) {
                    min = Some(root);
                }
            }
        }
    }

    debug!(
        roots = roots.len(),
        survivors,
        links,
        deferred = deferred_count,
        capacity,
        "consolidated root list"
    );
    min
}
