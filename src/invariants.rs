//! Structural invariant checks for a Fibonacci heap.
//!
//! [`check`] walks every list of a heap with an explicit stack and reports the
//! first violation it finds. Property tests call it after each operation so
//! they can assert structural health without reimplementing the traversal.

use slotmap::SparseSecondaryMap;
use thiserror::Error;
use tracing::trace;

use crate::fibonacci::{FibonacciArena, FibonacciHeap};
use crate::rank::{degree_table_capacity, Degree};
use crate::storage::{ArenaId, NodeHandle, NodeKey, NodeStore};

/// Reports an invariant violation surfaced by [`check`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum InvariantViolation {
    /// A list references a node that is not in the arena.
    #[error("node {node:?} is referenced but not live in the arena")]
    DanglingHandle {
        /// The missing node.
        node: NodeHandle,
    },
    /// A neighbour of `node` does not point back at it.
    #[error("ring broken at {node:?}: a neighbour does not point back")]
    BrokenRing {
        /// Node whose `left` or `right` neighbour is inconsistent.
        node: NodeHandle,
    },
    /// A node is reachable through more than one list.
    #[error("node {node:?} is reachable more than once")]
    DuplicateMembership {
        /// Node reached twice.
        node: NodeHandle,
    },
    /// A node's parent back-reference does not match the list it sits in.
    #[error("node {node:?} has parent {found:?}, expected {expected:?}")]
    ParentMismatch {
        /// Offending node.
        node: NodeHandle,
        /// Owner of the list the node was found in (`None` for the root list).
        expected: Option<NodeHandle>,
        /// Recorded parent.
        found: Option<NodeHandle>,
    },
    /// A node's degree disagrees with the length of its child list.
    #[error("node {node:?} records degree {recorded} but has {actual} children")]
    DegreeMismatch {
        /// Offending node.
        node: NodeHandle,
        /// Stored degree.
        recorded: Degree,
        /// Children counted in the child list.
        actual: usize,
    },
    /// A child's key is smaller than its parent's.
    #[error("child {child:?} has a smaller key than its parent {parent:?}")]
    HeapOrder {
        /// Parent node.
        parent: NodeHandle,
        /// Child node with the smaller key.
        child: NodeHandle,
    },
    /// Another root has a smaller key than the recorded minimum.
    #[error("minimum {min:?} is not minimal: root {smaller:?} has a smaller key")]
    MinNotMinimal {
        /// Recorded minimum.
        min: NodeHandle,
        /// Root with a smaller key.
        smaller: NodeHandle,
    },
    /// The recorded node count differs from the reachable node count.
    #[error("heap records {recorded} nodes but {reachable} are reachable")]
    CountMismatch {
        /// Count stored in the heap.
        recorded: usize,
        /// Nodes found by traversal.
        reachable: usize,
    },
    /// A node's degree exceeds `floor(log₂ n) + 1`.
    #[error("node {node:?} has degree {degree}, above the bound {bound}")]
    DegreeBound {
        /// Offending node.
        node: NodeHandle,
        /// Its degree.
        degree: Degree,
        /// Largest allowed degree.
        bound: usize,
    },
}

/// Verifies every structural invariant of `heap`.
///
/// # Errors
/// Returns the first [`InvariantViolation`] encountered.
///
/// # Panics
/// Panics if `heap` was created by a different arena.
pub fn check<K: Ord>(
    arena: &FibonacciArena<K>,
    heap: &FibonacciHeap,
) -> Result<(), InvariantViolation> {
    arena.assert_owned(heap);
    let walker = Walker {
        store: arena.store(),
        arena: arena.id(),
    };

    let Some(min) = heap.min_key() else {
        return match heap.len() {
            0 => Ok(()),
            recorded => Err(InvariantViolation::CountMismatch {
                recorded,
                reachable: 0,
            }),
        };
    };

    let bound = degree_table_capacity(heap.len());
    let mut visited: SparseSecondaryMap<NodeKey, ()> = SparseSecondaryMap::new();
    let mut reachable = 0usize;
    // (entry into a ring, owner of that ring)
    let mut stack: Vec<(NodeKey, Option<NodeKey>)> = vec![(min, None)];

    while let Some((entry, owner)) = stack.pop() {
        let members = walker.walk_ring(entry, owner, &mut visited)?;
        reachable += members.len();

        match owner {
            None => walker.check_min(min, &members)?,
            Some(parent) => walker.check_children(parent, &members)?,
        }

        for &node in &members {
            let record = walker.store.node(node);
            if usize::from(record.degree) > bound {
                return Err(InvariantViolation::DegreeBound {
                    node: walker.handle(node),
                    degree: record.degree,
                    bound,
                });
            }
            match record.child {
                Some(child) => stack.push((child, Some(node))),
                None if record.degree != 0 => {
                    return Err(InvariantViolation::DegreeMismatch {
                        node: walker.handle(node),
                        recorded: record.degree,
                        actual: 0,
                    })
                }
                None => {}
            }
        }
    }

    if reachable != heap.len() {
        return Err(InvariantViolation::CountMismatch {
            recorded: heap.len(),
            reachable,
        });
    }
    trace!(reachable, "heap invariants hold");
    Ok(())
}

/// Store view that reports offending nodes as public handles.
struct Walker<'a, K> {
    store: &'a NodeStore<K>,
    arena: ArenaId,
}

impl<K> Walker<'_, K> {
    fn handle(&self, key: NodeKey) -> NodeHandle {
        NodeHandle::new(self.arena, key)
    }

    /// Collects one ring, checking liveness, back-links, single membership
    /// and parent references along the way.
    fn walk_ring(
        &self,
        entry: NodeKey,
        owner: Option<NodeKey>,
        visited: &mut SparseSecondaryMap<NodeKey, ()>,
    ) -> Result<Vec<NodeKey>, InvariantViolation> {
        let mut members = Vec::new();
        let mut current = entry;
        loop {
            let node = self
                .store
                .get(current)
                .ok_or(InvariantViolation::DanglingHandle {
                    node: self.handle(current),
                })?;
            if visited.insert(current, ()).is_some() {
                return Err(InvariantViolation::DuplicateMembership {
                    node: self.handle(current),
                });
            }
            let right_back = self.store.get(node.right).map(|right| right.left);
            let left_back = self.store.get(node.left).map(|left| left.right);
            if right_back != Some(current) || left_back != Some(current) {
                return Err(InvariantViolation::BrokenRing {
                    node: self.handle(current),
                });
            }
            if node.parent != owner {
                return Err(InvariantViolation::ParentMismatch {
                    node: self.handle(current),
                    expected: owner.map(|key| self.handle(key)),
                    found: node.parent.map(|key| self.handle(key)),
                });
            }
            members.push(current);
            current = node.right;
            if current == entry {
                return Ok(members);
            }
        }
    }
}

impl<K: Ord> Walker<'_, K> {
    fn check_min(&self, min: NodeKey, roots: &[NodeKey]) -> Result<(), InvariantViolation> {
        match roots
            .iter()
            .find(|&&root| self.store.key(root) < self.store.key(min))
        {
            Some(&smaller) => Err(InvariantViolation::MinNotMinimal {
                min: self.handle(min),
                smaller: self.handle(smaller),
            }),
            None => Ok(()),
        }
    }

    fn check_children(
        &self,
        parent: NodeKey,
        children: &[NodeKey],
    ) -> Result<(), InvariantViolation> {
        let recorded = self.store.node(parent).degree;
        if usize::from(recorded) != children.len() {
            return Err(InvariantViolation::DegreeMismatch {
                node: self.handle(parent),
                recorded,
                actual: children.len(),
            });
        }
        match children
            .iter()
            .find(|&&child| self.store.key(child) < self.store.key(parent))
        {
            Some(&child) => Err(InvariantViolation::HeapOrder {
                parent: self.handle(parent),
                child: self.handle(child),
            }),
            None => Ok(()),
        }
    }
}

impl<K: Ord> FibonacciArena<K> {
    /// Verifies every structural invariant of `heap`; see [`check`]
    ///
    /// # Errors
    /// Returns the first [`InvariantViolation`] encountered.
    pub fn check_invariants(&self, heap: &FibonacciHeap) -> Result<(), InvariantViolation> {
        check(self, heap)
    }
}
