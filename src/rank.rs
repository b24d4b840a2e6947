//! Degree type and utilities for Fibonacci heap nodes.
//!
//! # Why u8?
//!
//! The degree of a node is the number of its direct children. Without
//! decrease-key, every tree in the heap is built only by linking two roots of
//! equal degree, so a root of degree `k` always holds exactly `2^k` nodes.
//! Degrees are therefore bounded by `log₂(n)`, and `u8` covers heaps far
//! larger than addressable memory.
//!
//! # Degree table capacity
//!
//! Consolidation allocates one slot per possible degree. With `n` nodes the
//! largest reachable degree is `floor(log₂ n)`, so the table needs
//! `floor(log₂ n) + 1` slots; see [`degree_table_capacity`].

/// Type alias for node degree.
///
/// Using `u8` saves 7 bytes per node compared to `usize` on 64-bit systems.
pub type Degree = u8;

/// Maximum representable degree.
pub const MAX_DEGREE: Degree = u8::MAX;

/// Adds one child to a degree, panicking if `u8` would wrap.
///
/// # Panics
///
/// Panics if `degree == MAX_DEGREE`. Linking only ever joins two trees of
/// equal degree, so reaching degree 255 takes 2^255 live nodes.
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::rank::checked_increment;
///
/// assert_eq!(checked_increment(5), 6);
/// ```
#[inline]
pub fn checked_increment(degree: Degree) -> Degree {
    degree
        .checked_add(1)
        .expect("node degree wrapped past u8::MAX; the child lists are corrupt")
}

/// Number of slots in the consolidation degree table for `n` nodes.
///
/// Returns `floor(log₂ n) + 1`, and `1` for `n == 0` so the table is never
/// empty.
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::rank::degree_table_capacity;
///
/// assert_eq!(degree_table_capacity(1), 1);
/// assert_eq!(degree_table_capacity(8), 4);
/// assert_eq!(degree_table_capacity(9), 4);
/// ```
#[inline]
pub fn degree_table_capacity(n: usize) -> usize {
    match n.checked_ilog2() {
        Some(log) => log as usize + 1,
        None => 1,
    }
}
