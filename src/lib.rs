//! Arena-backed Fibonacci heap for Rust
//!
//! This crate provides a Fibonacci heap whose nodes live in a generational
//! arena instead of behind raw pointers. The root list, the per-node child
//! lists and the parent back-references form a cyclic graph; with an arena
//! every relation is a [`NodeHandle`] and every splice is a handle
//! reassignment.
//!
//! # Features
//!
//! - **Insert**: O(1), new roots land next to the minimum
//! - **Find-min**: O(1)
//! - **Union**: O(1), splices two root lists without visiting any node
//! - **Extract-min**: O(log n) amortized, promotes children then consolidates
//!   the root list so no two roots share a degree
//!
//! Decrease-key and arbitrary deletion are not supported, so the mark bit is
//! carried but never set.
//!
//! # Heaps and arenas
//!
//! A [`FibonacciArena`] hosts the nodes of any number of heaps. Each
//! [`FibonacciHeap`] is a token for one of them, and [`FibonacciArena::union`]
//! consumes both tokens it is given. Heap tokens and node handles both
//! remember the arena that issued them: a foreign heap token is a panic, a
//! foreign node handle is a [`HeapError::ForeignHandle`].
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::FibonacciArena;
//!
//! let mut arena: FibonacciArena<i64> = FibonacciArena::new();
//! let mut heap = arena.create_heap();
//! for key in [5, 3, 8, 1, 9, 2] {
//!     arena.insert(&mut heap, key);
//! }
//! assert_eq!(arena.find_min(&heap), Some(&1));
//! assert_eq!(arena.drain_sorted(heap), vec![1, 2, 3, 5, 8, 9]);
//! ```

pub mod config;
mod consolidate;
pub mod error;
pub mod fibonacci;
pub mod invariants;
pub mod rank;
mod ring;
pub mod storage;
#[cfg(test)]
mod test_support;
pub mod traverse;

pub use config::{EqualKeyPolicy, HeapConfig};
pub use error::HeapError;
pub use fibonacci::{Extracted, FibonacciArena, FibonacciHeap};
pub use invariants::InvariantViolation;
pub use storage::NodeHandle;
pub use traverse::{Handles, HeapDisplay, NodeRef, Nodes};
