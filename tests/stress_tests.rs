//! Stress tests that push the heap through large workloads
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load. Set
//! `RUST_LOG`-style filtering through the installed subscriber to see
//! consolidation logs.

use rust_fibonacci_heap::{EqualKeyPolicy, FibonacciArena, HeapConfig};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_test_writer()
        .try_init();
}

/// Deterministic pseudo-random keys (xorshift) so failures reproduce
fn keys(count: usize, seed: u64) -> Vec<i64> {
    let mut state = seed;
    (0..count)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state % 10_000) as i64
        })
        .collect()
}

#[test]
fn test_massive_operations() {
    init_tracing();
    let mut arena: FibonacciArena<i64> = FibonacciArena::new();
    let mut heap = arena.create_heap();

    for i in 0..10_000 {
        arena.insert(&mut heap, i);
    }
    assert_eq!(heap.len(), 10_000);

    for i in 0..10_000 {
        assert_eq!(arena.extract_min(&mut heap).map(|e| e.key), Some(i));
    }
    assert!(heap.is_empty());
    assert!(arena.is_empty());
}

#[test]
fn test_reverse_order_inserts() {
    init_tracing();
    let mut arena: FibonacciArena<i64> = FibonacciArena::new();
    let mut heap = arena.create_heap();
    for i in (0..5_000).rev() {
        arena.insert(&mut heap, i);
    }
    assert_eq!(arena.drain_sorted(heap), (0..5_000).collect::<Vec<_>>());
}

#[test]
fn test_alternating_ops() {
    init_tracing();
    let mut arena: FibonacciArena<i64> = FibonacciArena::new();
    let mut heap = arena.create_heap();

    for i in 0..2_000 {
        arena.insert(&mut heap, i * 2);
        arena.insert(&mut heap, i * 2 + 1);
        assert!(arena.extract_min(&mut heap).is_some());
        if i % 97 == 0 {
            arena.check_invariants(&heap).unwrap();
        }
    }
    assert_eq!(heap.len(), 2_000);
    let drained = arena.drain_sorted(heap);
    assert!(drained.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_large_merge() {
    init_tracing();
    let mut arena: FibonacciArena<i64> = FibonacciArena::new();
    let mut heap1 = arena.create_heap();
    let mut heap2 = arena.create_heap();

    for i in 0..5_000 {
        arena.insert(&mut heap1, i * 2);
        arena.insert(&mut heap2, i * 2 + 1);
    }
    arena.extract_min(&mut heap1);
    arena.extract_min(&mut heap2);

    let merged = arena.union(heap1, heap2);
    assert_eq!(merged.len(), 9_998);
    arena.check_invariants(&merged).unwrap();
    assert_eq!(arena.drain_sorted(merged), (2..10_000).collect::<Vec<_>>());
}

#[test]
fn test_degree_bound_after_consolidation() {
    init_tracing();
    let mut arena: FibonacciArena<i64> = FibonacciArena::new();
    let mut heap = arena.create_heap();
    for key in keys(4_096, 0x9E37_79B9_7F4A_7C15) {
        arena.insert(&mut heap, key);
    }

    for _ in 0..64 {
        arena.extract_min(&mut heap);
        let n = heap.len();
        let bound = n.ilog2() as usize + 1;
        for root in arena.roots(&heap) {
            let degree = usize::from(arena.node(root).unwrap().degree());
            assert!(degree <= bound, "degree {degree} exceeds {bound} with {n} nodes");
        }
    }
    arena.check_invariants(&heap).unwrap();
}

#[test]
fn test_many_duplicates_under_both_policies() {
    init_tracing();
    for policy in [EqualKeyPolicy::Link, EqualKeyPolicy::Skip] {
        let mut arena =
            FibonacciArena::with_config(HeapConfig::new().with_equal_key_policy(policy));
        let mut heap = arena.create_heap();
        let input: Vec<i64> = keys(3_000, 42).into_iter().map(|k| k % 16).collect();
        for &key in &input {
            arena.insert(&mut heap, key);
        }

        let mut expected = input.clone();
        expected.sort_unstable();
        let mut drained = Vec::with_capacity(expected.len());
        while let Some(extracted) = arena.extract_min(&mut heap) {
            drained.push(extracted.key);
            if drained.len() % 500 == 0 {
                arena.check_invariants(&heap).unwrap();
            }
        }
        assert_eq!(drained, expected, "policy {policy:?}");
    }
}

#[test]
fn test_deep_heap_destroy() {
    init_tracing();
    let mut arena: FibonacciArena<i64> = FibonacciArena::new();
    let mut heap = arena.create_heap();
    for i in 0..(1 << 15) + 1 {
        arena.insert(&mut heap, i);
    }
    // One extraction folds 2^15 roots into a single binomial tree.
    arena.extract_min(&mut heap);
    assert_eq!(arena.roots(&heap).count(), 1);
    assert_eq!(arena.render(&heap).split_whitespace().count(), 1 << 15);
    assert_eq!(arena.destroy(heap), 1 << 15);
    assert!(arena.is_empty());
}
