//! Shared test utilities
//!
//! Builders and integrity checks used across the integration suites.

#![allow(dead_code)]

use corral::{LinkedList, Vector};

// Re-export testing utilities
pub use pretty_assertions::{assert_eq, assert_ne};

/// Build a `LinkedList` from a slice of integers
pub fn int_list(values: &[i64]) -> LinkedList<i64> {
    values.iter().copied().collect()
}

/// Build a `Vector` from a slice of integers
pub fn int_vector(values: &[i64]) -> Vector<i64> {
    Vector::from(values.to_vec())
}

/// Verify list link integrity through the public surface: the cached
/// length matches a forward walk, and the backward walk mirrors it exactly
pub fn assert_list_integrity<T: Clone + PartialEq + std::fmt::Debug>(list: &LinkedList<T>) {
    assert_eq!(list.iter().count(), list.len());
    let forward: Vec<T> = list.iter().cloned().collect();
    let mut backward: Vec<T> = list.iter().rev().cloned().collect();
    backward.reverse();
    assert_eq!(forward, backward);
}
