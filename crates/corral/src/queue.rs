//! Queue collection - FIFO (First-In-First-Out)
//!
//! Backed by `VecDeque` (circular buffer) for O(1) enqueue/dequeue.
//! Iteration runs front to back.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::compare::{compare_sequences, Comparable};
use crate::error::CollectionError;
use crate::fmt::write_preview;
use crate::vector::Vector;

/// FIFO queue with O(1) enqueue/dequeue
#[derive(Clone, PartialEq, Eq)]
pub struct Queue<T> {
    inner: VecDeque<T>,
}

impl<T> Queue<T> {
    /// Create new empty queue
    pub fn new() -> Self {
        Self {
            inner: VecDeque::new(),
        }
    }

    /// Create queue with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: VecDeque::with_capacity(capacity),
        }
    }

    /// Add element to back of queue (FIFO order)
    pub fn enqueue(&mut self, value: T) {
        self.inner.push_back(value);
    }

    /// Remove and return element from front of queue
    ///
    /// Fails with `EmptyCollection` when the queue is empty.
    pub fn dequeue(&mut self) -> Result<T, CollectionError> {
        self.inner
            .pop_front()
            .ok_or(CollectionError::EmptyCollection)
    }

    /// Remove and return element from front of queue, or `None` when empty
    pub fn try_dequeue(&mut self) -> Option<T> {
        self.inner.pop_front()
    }

    /// View front element without removing
    pub fn peek(&self) -> Result<&T, CollectionError> {
        self.inner.front().ok_or(CollectionError::EmptyCollection)
    }

    /// View front element without removing, or `None` when empty
    pub fn try_peek(&self) -> Option<&T> {
        self.inner.front()
    }

    /// Get number of elements in queue
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Remove all elements from queue
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Iterate front to back
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.inner.iter()
    }

    /// Copy into a vector (front of queue first)
    pub fn to_vector(&self) -> Vector<T>
    where
        T: Clone,
    {
        self.inner.iter().cloned().collect()
    }

    /// New queue holding `f` applied to every element, front to back
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Queue<U> {
        Queue {
            inner: self.inner.iter().map(|value| f(value)).collect(),
        }
    }

    /// New queue holding the elements `keep` accepts
    pub fn filter(&self, mut keep: impl FnMut(&T) -> bool) -> Self
    where
        T: Clone,
    {
        Self {
            inner: self
                .inner
                .iter()
                .filter(|value| keep(value))
                .cloned()
                .collect(),
        }
    }

    /// Drop every element `keep` rejects
    pub fn filter_in_place(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.inner.retain(|value| keep(value));
    }

    /// Visit every element front to back
    pub fn each(&self, mut f: impl FnMut(&T)) {
        for value in &self.inner {
            f(value);
        }
    }

    /// Check whether every element satisfies `predicate`
    pub fn all(&self, mut predicate: impl FnMut(&T) -> bool) -> bool {
        self.inner.iter().all(|value| predicate(value))
    }

    /// Check whether any element satisfies `predicate`
    pub fn any(&self, mut predicate: impl FnMut(&T) -> bool) -> bool {
        self.inner.iter().any(|value| predicate(value))
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Debug> fmt::Display for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_preview(f, "Queue", self.len(), self.iter())
    }
}

impl<T: Ord> Comparable for Queue<T> {
    fn compare(&self, other: &Self) -> Result<Ordering, CollectionError> {
        Ok(compare_sequences(self.iter(), other.iter(), |a, b| a.cmp(b)))
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            inner: VecDeque::from_iter(iter),
        }
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}

impl<T: Serialize> Serialize for Queue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Queue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self {
            inner: VecDeque::from(Vec::<T>::deserialize(deserializer)?),
        })
    }
}
