//! Read-only traversal of heap structure.
//!
//! Every walk here is iterative: an explicit stack replaces recursion through
//! child lists, so the depth of a heap never bounds the call stack.

use std::fmt;

use smallvec::SmallVec;

use crate::error::HeapError;
use crate::fibonacci::{FibonacciArena, FibonacciHeap};
use crate::rank::Degree;
use crate::ring::Ring;
use crate::storage::{ArenaId, Node, NodeHandle, NodeKey};

/// Read-only view of a single node.
pub struct NodeRef<'a, K> {
    handle: NodeHandle,
    node: &'a Node<K>,
}

impl<'a, K> NodeRef<'a, K> {
    fn new(arena: ArenaId, key: NodeKey, node: &'a Node<K>) -> Self {
        Self {
            handle: NodeHandle::new(arena, key),
            node,
        }
    }

    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    pub fn key(&self) -> &'a K {
        &self.node.key
    }

    /// Number of direct children.
    pub fn degree(&self) -> Degree {
        self.node.degree
    }

    pub fn is_marked(&self) -> bool {
        self.node.mark
    }

    /// Parent handle, `None` for roots.
    pub fn parent(&self) -> Option<NodeHandle> {
        self.node.parent.map(|key| self.handle_for(key))
    }

    /// Entry point into the child list.
    pub fn child(&self) -> Option<NodeHandle> {
        self.node.child.map(|key| self.handle_for(key))
    }

    fn handle_for(&self, key: NodeKey) -> NodeHandle {
        NodeHandle::new(self.handle.arena(), key)
    }
}

impl<K: fmt::Debug> fmt::Debug for NodeRef<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("handle", &self.handle)
            .field("key", &self.node.key)
            .field("degree", &self.node.degree)
            .field("parent", &self.parent())
            .finish()
    }
}

/// Iterator over one root list or child list, yielding public handles.
pub struct Handles<'a, K> {
    ring: Ring<'a, K>,
    arena: ArenaId,
}

impl<K> Iterator for Handles<'_, K> {
    type Item = NodeHandle;

    fn next(&mut self) -> Option<NodeHandle> {
        self.ring.next().map(|key| NodeHandle::new(self.arena, key))
    }
}

/// Pre-order iterator over every node of a heap.
///
/// Roots are visited in root-list order starting at the minimum; each node is
/// followed by its subtree.
pub struct Nodes<'a, K> {
    arena: &'a FibonacciArena<K>,
    stack: Vec<NodeKey>,
}

impl<'a, K> Iterator for Nodes<'a, K> {
    type Item = NodeRef<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.stack.pop()?;
        let node = self.arena.store().node(key);
        push_ring_reversed(&mut self.stack, Ring::new(self.arena.store(), node.child));
        Some(NodeRef::new(self.arena.id(), key, node))
    }
}

fn push_ring_reversed<K>(stack: &mut Vec<NodeKey>, ring: Ring<'_, K>) {
    let members: SmallVec<[NodeKey; 16]> = ring.collect();
    stack.extend(members.into_iter().rev());
}

impl<K> FibonacciArena<K> {
    /// Returns a view of the node at `handle`
    ///
    /// # Errors
    /// Returns [`HeapError::ForeignHandle`] if another arena issued the
    /// handle, or [`HeapError::InvalidHandle`] if the node was extracted.
    pub fn node(&self, handle: NodeHandle) -> Result<NodeRef<'_, K>, HeapError> {
        let key = self.resolve(handle)?;
        Ok(NodeRef {
            handle,
            node: self.store().node(key),
        })
    }

    /// Iterates the root list of `heap`, starting at its minimum
    ///
    /// # Panics
    /// Panics if `heap` was created by a different arena.
    pub fn roots(&self, heap: &FibonacciHeap) -> Handles<'_, K> {
        self.handles(self.root_ring(heap))
    }

    fn root_ring(&self, heap: &FibonacciHeap) -> Ring<'_, K> {
        self.assert_owned(heap);
        Ring::new(self.store(), heap.min_key())
    }

    fn handles<'a>(&self, ring: Ring<'a, K>) -> Handles<'a, K> {
        Handles {
            ring,
            arena: self.id(),
        }
    }

    /// Iterates the root keys of `heap` in root-list order
    ///
    /// # Panics
    /// Panics if `heap` was created by a different arena.
    pub fn root_keys<'a>(&'a self, heap: &FibonacciHeap) -> impl Iterator<Item = &'a K> + 'a {
        let store = self.store();
        self.root_ring(heap).map(move |key| store.key(key))
    }

    /// Iterates the children of `handle`
    ///
    /// # Errors
    /// Returns [`HeapError::ForeignHandle`] if another arena issued the
    /// handle, or [`HeapError::InvalidHandle`] if the node was extracted.
    pub fn children(&self, handle: NodeHandle) -> Result<Handles<'_, K>, HeapError> {
        let key = self.resolve(handle)?;
        Ok(self.handles(Ring::new(self.store(), self.store().node(key).child)))
    }

    /// Walks every node of `heap` in pre-order
    ///
    /// # Panics
    /// Panics if `heap` was created by a different arena.
    pub fn iter(&self, heap: &FibonacciHeap) -> Nodes<'_, K> {
        let mut stack = Vec::with_capacity(heap.len());
        push_ring_reversed(&mut stack, self.root_ring(heap));
        Nodes { arena: self, stack }
    }

    /// Returns a [`Display`](fmt::Display) adapter rendering the trees of `heap`
    ///
    /// Each node's key is followed by its children in parentheses, e.g.
    /// `1 (2 3 (4)) 7`.
    ///
    /// # Panics
    /// Panics if `heap` was created by a different arena.
    pub fn display<'a>(&'a self, heap: &FibonacciHeap) -> HeapDisplay<'a, K> {
        self.assert_owned(heap);
        HeapDisplay {
            arena: self,
            min: heap.min_key(),
        }
    }

    /// Renders the trees of `heap` as a string; see [`display`](Self::display)
    pub fn render(&self, heap: &FibonacciHeap) -> String
    where
        K: fmt::Display,
    {
        self.display(heap).to_string()
    }
}

/// Rendering adapter returned by [`FibonacciArena::display`].
pub struct HeapDisplay<'a, K> {
    arena: &'a FibonacciArena<K>,
    min: Option<NodeKey>,
}

enum Frame {
    Node(NodeKey),
    Close,
}

impl<K: fmt::Display> fmt::Display for HeapDisplay<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.arena.store();
        let roots: SmallVec<[NodeKey; 16]> = Ring::new(store, self.min).collect();
        let mut stack: Vec<Frame> = roots.into_iter().rev().map(Frame::Node).collect();
        let mut separate = false;

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Node(handle) => {
                    if separate {
                        f.write_str(" ")?;
                    }
                    let node = store.node(handle);
                    write!(f, "{}", node.key)?;
                    separate = true;
                    if node.child.is_some() {
                        f.write_str(" (")?;
                        separate = false;
                        stack.push(Frame::Close);
                        let children: SmallVec<[NodeKey; 16]> =
                            Ring::new(store, node.child).collect();
                        stack.extend(children.into_iter().rev().map(Frame::Node));
                    }
                }
                Frame::Close => {
                    f.write_str(")")?;
                    separate = true;
                }
            }
        }
        Ok(())
    }
}
