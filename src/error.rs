//! Error type for heap operations.

use thiserror::Error;

use crate::storage::NodeHandle;

/// Errors surfaced by [`FibonacciArena`](crate::FibonacciArena) handle queries.
///
/// Operations on an empty heap never fail; they return `None`. Only lookups
/// through a caller-supplied [`NodeHandle`] can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The handle's node was extracted or destroyed.
    #[error("handle {handle:?} is no longer valid (node was extracted)")]
    InvalidHandle {
        /// The rejected handle.
        handle: NodeHandle,
    },
    /// The handle was issued by a different arena.
    #[error("handle {handle:?} was issued by another arena")]
    ForeignHandle {
        /// The rejected handle.
        handle: NodeHandle,
    },
}
