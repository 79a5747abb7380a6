//! Set - ordered collection of unique elements
//!
//! Elements live in a `Vector` kept strictly ascending by the comparator,
//! with no duplicates. Insertion splices at the binary search insertion
//! point. Set algebra requires both operands to share a comparator name.

use std::cmp::Ordering;
use std::fmt;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::compare::{binary_search_by, compare_sequences, Comparable, Comparator, SearchOutcome};
use crate::error::CollectionError;
use crate::fmt::write_preview;
use crate::vector::Vector;

/// Ordered set with comparator-defined element order
#[derive(Clone)]
pub struct Set<T> {
    items: Vector<T>,
    comparator: Comparator<T>,
}

impl<T: Ord> Set<T> {
    /// Create new empty set ordered by `Ord`
    pub fn new() -> Self {
        Self::with_comparator(Comparator::natural())
    }
}

impl<T> Set<T> {
    /// Create new empty set ordered by `comparator`
    pub fn with_comparator(comparator: Comparator<T>) -> Self {
        Self {
            items: Vector::new(),
            comparator,
        }
    }

    /// The element comparator
    pub fn comparator(&self) -> &Comparator<T> {
        &self.comparator
    }

    /// Get number of elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove all elements
    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn search(&self, target: &T) -> SearchOutcome {
        binary_search_by(self.items.as_slice(), 0, None, |item| {
            self.comparator.compare(item, target)
        })
    }

    fn check_compatible(&self, other: &Self, operation: &str) -> Result<(), CollectionError> {
        if self.comparator.name() != other.comparator.name() {
            return Err(CollectionError::IncompatibleCollection {
                reason: format!(
                    "{} across comparators {:?} and {:?}",
                    operation,
                    self.comparator.name(),
                    other.comparator.name()
                ),
            });
        }
        Ok(())
    }

    /// Strict insertion; fails with `DuplicateKey` when an equal element
    /// exists
    pub fn add(&mut self, value: T) -> Result<(), CollectionError>
    where
        T: fmt::Debug,
    {
        let outcome = self.search(&value);
        if outcome.found.is_some() {
            return Err(CollectionError::duplicate_key(&value));
        }
        self.items.insert_at(outcome.insertion, value);
        Ok(())
    }

    /// Insertion that reports whether the element was new
    pub fn try_add(&mut self, value: T) -> bool {
        let outcome = self.search(&value);
        if outcome.found.is_some() {
            return false;
        }
        self.items.insert_at(outcome.insertion, value);
        true
    }

    /// Check whether an equal element is present
    pub fn contains(&self, target: &T) -> bool {
        self.search(target).found.is_some()
    }

    /// Remove the element equal to `target`, returning it
    pub fn remove(&mut self, target: &T) -> Result<T, CollectionError>
    where
        T: fmt::Debug,
    {
        self.try_remove(target)
            .ok_or_else(|| CollectionError::unknown_key(target))
    }

    /// Remove the element equal to `target`, or `None` when absent
    pub fn try_remove(&mut self, target: &T) -> Option<T> {
        let at = self.search(target).found?;
        Some(self.items.remove_at(at))
    }

    // ========================================================================
    // Set algebra
    // ========================================================================

    /// Elements of either operand
    pub fn union(&self, other: &Self) -> Result<Self, CollectionError>
    where
        T: Clone,
    {
        self.check_compatible(other, "union")?;
        let mut out = self.clone();
        for item in other.iter() {
            out.try_add(item.clone());
        }
        Ok(out)
    }

    /// Alias of `union` for the merge-style call sites
    pub fn merge(&self, other: &Self) -> Result<Self, CollectionError>
    where
        T: Clone,
    {
        self.union(other)
    }

    /// Elements present in both operands
    pub fn intersect(&self, other: &Self) -> Result<Self, CollectionError>
    where
        T: Clone,
    {
        self.check_compatible(other, "intersect")?;
        Ok(Self {
            items: self.items.filter(|item| other.contains(item)),
            comparator: self.comparator,
        })
    }

    /// Elements of `self` absent from `other`
    pub fn diff(&self, other: &Self) -> Result<Self, CollectionError>
    where
        T: Clone,
    {
        self.check_compatible(other, "diff")?;
        Ok(Self {
            items: self.items.filter(|item| !other.contains(item)),
            comparator: self.comparator,
        })
    }

    /// Elements of exactly one operand
    pub fn symmetric_diff(&self, other: &Self) -> Result<Self, CollectionError>
    where
        T: Clone,
    {
        self.check_compatible(other, "symmetric_diff")?;
        let mut out = self.diff(other)?;
        for item in other.iter() {
            if !self.contains(item) {
                out.try_add(item.clone());
            }
        }
        Ok(out)
    }

    /// Check whether every element of `self` is in `other`
    pub fn is_subset(&self, other: &Self) -> Result<bool, CollectionError> {
        self.check_compatible(other, "is_subset")?;
        Ok(self.iter().all(|item| other.contains(item)))
    }

    /// Check whether every element of `other` is in `self`
    pub fn is_superset(&self, other: &Self) -> Result<bool, CollectionError> {
        self.check_compatible(other, "is_superset")?;
        other.is_subset(self)
    }

    // ========================================================================
    // Transforms
    // ========================================================================

    /// New naturally-ordered set holding `f` applied to every element;
    /// collapsing results deduplicate
    pub fn map<U: Ord>(&self, mut f: impl FnMut(&T) -> U) -> Set<U> {
        let mut out = Set::new();
        for item in self.iter() {
            out.try_add(f(item));
        }
        out
    }

    /// New set holding the elements `keep` accepts
    pub fn filter(&self, keep: impl FnMut(&T) -> bool) -> Self
    where
        T: Clone,
    {
        // filtering a sorted unique sequence preserves both properties
        Self {
            items: self.items.filter(keep),
            comparator: self.comparator,
        }
    }

    /// Drop every element `keep` rejects
    pub fn filter_in_place(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.filter_in_place(keep);
    }

    /// Visit every element in ascending order
    pub fn each(&self, f: impl FnMut(&T)) {
        self.items.each(f);
    }

    /// Check whether every element satisfies `predicate`
    pub fn all(&self, predicate: impl FnMut(&T) -> bool) -> bool {
        self.items.all(predicate)
    }

    /// Check whether any element satisfies `predicate`
    pub fn any(&self, predicate: impl FnMut(&T) -> bool) -> bool {
        self.items.any(predicate)
    }

    /// Iterate in ascending order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Copy the elements into a plain `Vec` in ascending order
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.to_vec()
    }

    // ========================================================================
    // Packets
    // ========================================================================

    /// Serialize into a JSON packet recording the comparator name
    pub fn to_packet(&self) -> Result<String, CollectionError>
    where
        T: Serialize,
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
        let packet: SetPacket<T> =
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
        let mut set = Set::with_comparator(comparator);
        for item in packet.items {
            set.try_add(item);
        }
        Ok(set)
    }
}

impl<T: Ord> Default for Set<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Debug> fmt::Display for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_preview(f, "Set", self.len(), self.iter())
    }
}

impl<T: PartialEq> PartialEq for Set<T> {
    fn eq(&self, other: &Self) -> bool {
        self.comparator.name() == other.comparator.name() && self.items == other.items
    }
}

impl<T: Eq> Eq for Set<T> {}

impl<T> Comparable for Set<T> {
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
        Ok(compare_sequences(self.iter(), other.iter(), |a, b| {
            self.comparator.compare(a, b)
        }))
    }
}

impl<T: Ord> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for item in iter {
            set.try_add(item);
        }
        set
    }
}

impl<T> Extend<T> for Set<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.try_add(item);
        }
    }
}

impl<T: Serialize> Serialize for Set<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut packet = serializer.serialize_struct("Set", 2)?;
        packet.serialize_field("comparator", self.comparator.name())?;
        packet.serialize_field("items", self.items.as_slice())?;
        packet.end()
    }
}

#[derive(serde::Deserialize)]
struct SetPacket<T> {
    comparator: String,
    items: Vec<T>,
}

impl<'de, T> Deserialize<'de> for Set<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let packet = SetPacket::<T>::deserialize(deserializer)?;
        let comparator = Comparator::natural();
        if packet.comparator != comparator.name() {
            return Err(serde::de::Error::custom(format!(
                "packet comparator {:?} requires from_packet_with",
                packet.comparator
            )));
        }
        let mut set = Set::with_comparator(comparator);
        for item in packet.items {
            set.try_add(item);
        }
        Ok(set)
    }
}
