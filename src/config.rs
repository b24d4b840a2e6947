//! Configuration for [`FibonacciArena`](crate::FibonacciArena).
//!
//! The only tunable is how consolidation treats two roots of equal degree
//! whose keys are also equal.

/// Consolidation behaviour for equal-degree roots with equal keys.
///
/// # Examples
/// ```
/// use rust_fibonacci_heap::EqualKeyPolicy;
///
/// assert_eq!(EqualKeyPolicy::default(), EqualKeyPolicy::Link);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EqualKeyPolicy {
    /// Canonical consolidation: equal keys are linked like any other pair.
    /// The root already waiting in the degree table stays the parent.
    #[default]
    Link,
    /// Equal keys are never linked. The incoming root stops probing and is
    /// kept in the rebuilt root list as-is, so two roots may share a degree
    /// when their keys tie.
    Skip,
}

/// Arena configuration.
///
/// # Examples
/// ```
/// use rust_fibonacci_heap::{EqualKeyPolicy, FibonacciArena, HeapConfig};
///
/// let config = HeapConfig::new().with_equal_key_policy(EqualKeyPolicy::Skip);
/// let arena: FibonacciArena<i64> = FibonacciArena::with_config(config);
/// assert_eq!(arena.config().equal_key_policy(), EqualKeyPolicy::Skip);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeapConfig {
    equal_keys: EqualKeyPolicy,
}

impl HeapConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the equal-key consolidation policy.
    #[must_use]
    pub fn with_equal_key_policy(mut self, policy: EqualKeyPolicy) -> Self {
        self.equal_keys = policy;
        self
    }

    /// Returns the configured equal-key consolidation policy.
    #[must_use]
    pub fn equal_key_policy(&self) -> EqualKeyPolicy {
        self.equal_keys
    }
}
