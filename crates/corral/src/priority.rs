//! PriorityQueue - comparator-ordered binary heap
//!
//! A max-heap over the queue's comparator: `pop` returns the element the
//! comparator orders greatest. Push and pop are O(log n) via sift-up /
//! sift-down; heap-internal iteration order is unspecified, so comparison,
//! equality, and packets all use priority order.

use std::cmp::Ordering;
use std::fmt;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::compare::{compare_sequences, Comparable, Comparator};
use crate::error::CollectionError;
use crate::fmt::write_preview;
use crate::vector::Vector;

/// Binary max-heap parameterized by a named comparator
pub struct PriorityQueue<T> {
    heap: Vec<T>,
    comparator: Comparator<T>,
}

impl<T: Ord> PriorityQueue<T> {
    /// Create new empty queue prioritized by `Ord`
    pub fn new() -> Self {
        Self::with_comparator(Comparator::natural())
    }
}

impl<T> PriorityQueue<T> {
    /// Create new empty queue prioritized by `comparator`
    pub fn with_comparator(comparator: Comparator<T>) -> Self {
        Self {
            heap: Vec::new(),
            comparator,
        }
    }

    /// The priority comparator
    pub fn comparator(&self) -> &Comparator<T> {
        &self.comparator
    }

    /// Get number of elements
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Remove all elements
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    fn greater(&self, a: usize, b: usize) -> bool {
        self.comparator.compare(&self.heap[a], &self.heap[b]) == Ordering::Greater
    }

    fn sift_up(&mut self, mut at: usize) {
        while at > 0 {
            let parent = (at - 1) / 2;
            if self.greater(at, parent) {
                self.heap.swap(at, parent);
                at = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut at: usize) {
        loop {
            let left = 2 * at + 1;
            let right = left + 1;
            let mut top = at;
            if left < self.heap.len() && self.greater(left, top) {
                top = left;
            }
            if right < self.heap.len() && self.greater(right, top) {
                top = right;
            }
            if top == at {
                break;
            }
            self.heap.swap(at, top);
            at = top;
        }
    }

    /// Insert an element, O(log n)
    pub fn push(&mut self, value: T) {
        self.heap.push(value);
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the highest-priority element, O(log n)
    ///
    /// Fails with `EmptyCollection` when the queue is empty.
    pub fn pop(&mut self) -> Result<T, CollectionError> {
        self.try_pop().ok_or(CollectionError::EmptyCollection)
    }

    /// Remove and return the highest-priority element, or `None` when empty
    pub fn try_pop(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let value = self.heap.pop();
        self.sift_down(0);
        value
    }

    /// View the highest-priority element without removing
    pub fn peek(&self) -> Result<&T, CollectionError> {
        self.heap.first().ok_or(CollectionError::EmptyCollection)
    }

    /// View the highest-priority element without removing, or `None` when
    /// empty
    pub fn try_peek(&self) -> Option<&T> {
        self.heap.first()
    }

    /// Iterate in heap-internal order (unspecified; use
    /// [`to_sorted_vector`](Self::to_sorted_vector) for priority order)
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.heap.iter()
    }

    fn sorted_items(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut drained = self.clone();
        let mut out = Vec::with_capacity(drained.len());
        while let Some(value) = drained.try_pop() {
            out.push(value);
        }
        out
    }

    /// Copy into a vector in descending priority order
    pub fn to_sorted_vector(&self) -> Vector<T>
    where
        T: Clone,
    {
        Vector::from(self.sorted_items())
    }

    /// Drain into a vector in descending priority order
    pub fn into_sorted_vector(mut self) -> Vector<T> {
        let mut out = Vec::with_capacity(self.len());
        while let Some(value) = self.try_pop() {
            out.push(value);
        }
        Vector::from(out)
    }

    /// Check whether every element satisfies `predicate`
    pub fn all(&self, mut predicate: impl FnMut(&T) -> bool) -> bool {
        self.heap.iter().all(|value| predicate(value))
    }

    /// Check whether any element satisfies `predicate`
    pub fn any(&self, mut predicate: impl FnMut(&T) -> bool) -> bool {
        self.heap.iter().any(|value| predicate(value))
    }

    // ========================================================================
    // Packets
    // ========================================================================

    /// Serialize into a JSON packet recording the comparator name
    pub fn to_packet(&self) -> Result<String, CollectionError>
    where
        T: Serialize + Clone,
    {
        serde_json::to_string(self).map_err(|err| CollectionError::Serialization {
            message: err.to_string(),
        })
    }

    /// Rebuild from a packet, re-attaching a caller-supplied comparator
    pub fn from_packet_with(packet: &str, comparator: Comparator<T>) -> Result<Self, CollectionError>
    where
        T: serde::de::DeserializeOwned,
    {
        let packet: PriorityPacket<T> =
            serde_json::from_str(packet).map_err(|err| CollectionError::Serialization {
                message: err.to_string(),
            })?;
        if packet.comparator != comparator.name() {
            return Err(CollectionError::Serialization {
                message: format!(
                    "packet comparator {:?} does not match {:?}",
                    packet.comparator,
                    comparator.name()
                ),
            });
        }
        let mut queue = PriorityQueue::with_comparator(comparator);
        for item in packet.items {
            queue.push(item);
        }
        Ok(queue)
    }
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for PriorityQueue<T> {
    fn clone(&self) -> Self {
        Self {
            heap: self.heap.clone(),
            comparator: self.comparator,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.heap.iter()).finish()
    }
}

impl<T: fmt::Debug> fmt::Display for PriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_preview(f, "PriorityQueue", self.len(), self.heap.iter())
    }
}

impl<T: Clone> PartialEq for PriorityQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.comparator.name() != other.comparator.name() || self.len() != other.len() {
            return false;
        }
        let a = self.sorted_items();
        let b = other.sorted_items();
        a.iter()
            .zip(b.iter())
            .all(|(x, y)| self.comparator.compare(x, y) == Ordering::Equal)
    }
}

impl<T: Clone> Comparable for PriorityQueue<T> {
    fn compare(&self, other: &Self) -> Result<Ordering, CollectionError> {
        if self.comparator.name() != other.comparator.name() {
            return Err(CollectionError::NotComparable {
                reason: format!(
                    "comparators {:?} and {:?} differ",
                    self.comparator.name(),
                    other.comparator.name()
                ),
            });
        }
        let a = self.sorted_items();
        let b = other.sorted_items();
        Ok(compare_sequences(a.iter(), b.iter(), |x, y| {
            self.comparator.compare(x, y)
        }))
    }
}

impl<T: Ord> FromIterator<T> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        for item in iter {
            queue.push(item);
        }
        queue
    }
}

impl<T> Extend<T> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T: Serialize + Clone> Serialize for PriorityQueue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut packet = serializer.serialize_struct("PriorityQueue", 2)?;
        packet.serialize_field("comparator", self.comparator.name())?;
        packet.serialize_field("items", &self.sorted_items())?;
        packet.end()
    }
}

#[derive(serde::Deserialize)]
struct PriorityPacket<T> {
    comparator: String,
    items: Vec<T>,
}

impl<'de, T> Deserialize<'de> for PriorityQueue<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let packet = PriorityPacket::<T>::deserialize(deserializer)?;
        let comparator = Comparator::natural();
        if packet.comparator != comparator.name() {
            return Err(serde::de::Error::custom(format!(
                "packet comparator {:?} requires from_packet_with",
                packet.comparator
            )));
        }
        let mut queue = PriorityQueue::with_comparator(comparator);
        for item in packet.items {
            queue.push(item);
        }
        Ok(queue)
    }
}
