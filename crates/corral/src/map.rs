//! Map - ordered key-value collection
//!
//! Entries live in a `Vector` kept strictly ascending by the key
//! comparator, with no duplicate keys. Insertion splices at the binary
//! search insertion point; membership uses the found index. Iteration is
//! ascending key order.

use std::cmp::Ordering;
use std::fmt;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::compare::{binary_search_by, compare_sequences, Comparable, Comparator, SearchOutcome};
use crate::error::CollectionError;
use crate::fmt::write_entry_preview;
use crate::vector::Vector;

/// Ordered map with comparator-defined key order
///
/// `set` upserts; `add` is strict and fails on a duplicate key. `move_key`
/// relocates a key and silently overwrites the destination, while
/// `rename_key` is strict - the asymmetry is deliberate (move is
/// relocate-or-merge, rename refuses to clobber).
#[derive(Clone)]
pub struct Map<K, V> {
    entries: Vector<(K, V)>,
    comparator: Comparator<K>,
}

impl<K: Ord, V> Map<K, V> {
    /// Create new empty map ordered by `Ord`
    pub fn new() -> Self {
        Self::with_comparator(Comparator::natural())
    }
}

impl<K, V> Map<K, V> {
    /// Create new empty map ordered by `comparator`
    pub fn with_comparator(comparator: Comparator<K>) -> Self {
        Self {
            entries: Vector::new(),
            comparator,
        }
    }

    /// The key comparator
    pub fn comparator(&self) -> &Comparator<K> {
        &self.comparator
    }

    /// Get number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn search(&self, key: &K) -> SearchOutcome {
        binary_search_by(self.entries.as_slice(), 0, None, |entry| {
            self.comparator.compare(&entry.0, key)
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

    // ========================================================================
    // Entry access
    // ========================================================================

    /// Insert or overwrite, returning the displaced value if the key existed
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let outcome = self.search(&key);
        match outcome.found {
            Some(at) => {
                let entry = &mut self.entries.as_mut_slice()[at];
                Some(std::mem::replace(&mut entry.1, value))
            }
            None => {
                self.entries.insert_at(outcome.insertion, (key, value));
                None
            }
        }
    }

    /// Strict insertion; fails with `DuplicateKey` when the key exists
    pub fn add(&mut self, key: K, value: V) -> Result<(), CollectionError>
    where
        K: fmt::Debug,
    {
        let outcome = self.search(&key);
        if outcome.found.is_some() {
            return Err(CollectionError::duplicate_key(&key));
        }
        self.entries.insert_at(outcome.insertion, (key, value));
        Ok(())
    }

    /// Strict insertion, reporting success instead of failing
    pub fn try_add(&mut self, key: K, value: V) -> bool {
        let outcome = self.search(&key);
        if outcome.found.is_some() {
            return false;
        }
        self.entries.insert_at(outcome.insertion, (key, value));
        true
    }

    /// Value under `key`; fails with `UnknownKey` when absent
    pub fn get(&self, key: &K) -> Result<&V, CollectionError>
    where
        K: fmt::Debug,
    {
        self.try_get(key)
            .ok_or_else(|| CollectionError::unknown_key(key))
    }

    /// Value under `key`, or `None` when absent
    pub fn try_get(&self, key: &K) -> Option<&V> {
        let at = self.search(key).found?;
        Some(&self.entries.as_slice()[at].1)
    }

    /// Mutable value under `key`
    pub fn get_mut(&mut self, key: &K) -> Result<&mut V, CollectionError>
    where
        K: fmt::Debug,
    {
        match self.search(key).found {
            Some(at) => Ok(&mut self.entries.as_mut_slice()[at].1),
            None => Err(CollectionError::unknown_key(key)),
        }
    }

    /// Remove the entry under `key`, returning its value
    pub fn remove(&mut self, key: &K) -> Result<V, CollectionError>
    where
        K: fmt::Debug,
    {
        self.try_remove(key)
            .ok_or_else(|| CollectionError::unknown_key(key))
    }

    /// Remove the entry under `key`, or `None` when absent
    pub fn try_remove(&mut self, key: &K) -> Option<V> {
        let at = self.search(key).found?;
        Some(self.entries.remove_at(at).1)
    }

    /// Check whether `key` is present
    pub fn has_key(&self, key: &K) -> bool {
        self.search(key).found.is_some()
    }

    /// Entry with the smallest key
    pub fn first(&self) -> Result<(&K, &V), CollectionError> {
        let entry = self.entries.front()?;
        Ok((&entry.0, &entry.1))
    }

    /// Entry with the largest key
    pub fn last(&self) -> Result<(&K, &V), CollectionError> {
        let entry = self.entries.back()?;
        Ok((&entry.0, &entry.1))
    }

    // ========================================================================
    // Key relocation
    // ========================================================================

    /// Relocate the value under `src` to `dst`, silently overwriting any
    /// existing destination entry
    ///
    /// Fails only with `UnknownKey` when `src` is absent.
    pub fn move_key(&mut self, src: &K, dst: K) -> Result<(), CollectionError>
    where
        K: fmt::Debug,
    {
        let value = self
            .try_remove(src)
            .ok_or_else(|| CollectionError::unknown_key(src))?;
        self.set(dst, value);
        Ok(())
    }

    /// Strictly rename `src` to `dst`
    ///
    /// Fails with `UnknownKey` when `src` is absent and with `DuplicateKey`
    /// when `dst` already exists; nothing moves on failure.
    pub fn rename_key(&mut self, src: &K, dst: K) -> Result<(), CollectionError>
    where
        K: fmt::Debug,
    {
        if !self.has_key(src) {
            return Err(CollectionError::unknown_key(src));
        }
        if self.has_key(&dst) {
            return Err(CollectionError::duplicate_key(&dst));
        }
        let value = match self.try_remove(src) {
            Some(value) => value,
            None => return Err(CollectionError::unknown_key(src)),
        };
        self.set(dst, value);
        Ok(())
    }

    /// Relocate a key, reporting success instead of failing
    pub fn try_move_key(&mut self, src: &K, dst: K) -> bool {
        match self.try_remove(src) {
            Some(value) => {
                self.set(dst, value);
                true
            }
            None => false,
        }
    }

    /// Strictly rename a key, reporting success instead of failing
    pub fn try_rename_key(&mut self, src: &K, dst: K) -> bool {
        if !self.has_key(src) || self.has_key(&dst) {
            return false;
        }
        match self.try_remove(src) {
            Some(value) => {
                self.set(dst, value);
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Bulk operations
    // ========================================================================

    /// Copying merge; entries of `other` overwrite shared keys
    ///
    /// Fails with `IncompatibleCollection` when the comparators differ.
    pub fn merge(&self, other: &Self) -> Result<Self, CollectionError>
    where
        K: Clone,
        V: Clone,
    {
        self.check_compatible(other, "merge")?;
        let mut out = self.clone();
        for (key, value) in other.iter() {
            out.set(key.clone(), value.clone());
        }
        Ok(out)
    }

    /// New map with `f` applied to every value; keys and order are kept
    pub fn map_values<U>(&self, mut f: impl FnMut(&K, &V) -> U) -> Map<K, U>
    where
        K: Clone,
    {
        Map {
            entries: self
                .entries
                .map(|entry| (entry.0.clone(), f(&entry.0, &entry.1))),
            comparator: self.comparator,
        }
    }

    /// New map holding the entries `keep` accepts
    pub fn filter(&self, mut keep: impl FnMut(&K, &V) -> bool) -> Self
    where
        K: Clone,
        V: Clone,
    {
        Self {
            entries: self.entries.filter(|entry| keep(&entry.0, &entry.1)),
            comparator: self.comparator,
        }
    }

    /// Drop every entry `keep` rejects
    pub fn filter_in_place(&mut self, mut keep: impl FnMut(&K, &V) -> bool) {
        self.entries
            .filter_in_place(|entry| keep(&entry.0, &entry.1));
    }

    /// Visit every entry in ascending key order
    pub fn each(&self, mut f: impl FnMut(&K, &V)) {
        for (key, value) in self.iter() {
            f(key, value);
        }
    }

    /// Check whether every entry satisfies `predicate`
    pub fn all(&self, mut predicate: impl FnMut(&K, &V) -> bool) -> bool {
        self.iter().all(|(key, value)| predicate(key, value))
    }

    /// Check whether any entry satisfies `predicate`
    pub fn any(&self, mut predicate: impl FnMut(&K, &V) -> bool) -> bool {
        self.iter().any(|(key, value)| predicate(key, value))
    }

    /// Iterate entries in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter().map(|entry| (&entry.0, &entry.1))
    }

    /// All keys in ascending order
    pub fn keys(&self) -> Vector<K>
    where
        K: Clone,
    {
        self.entries.iter().map(|entry| entry.0.clone()).collect()
    }

    /// All values in ascending key order
    pub fn values(&self) -> Vector<V>
    where
        V: Clone,
    {
        self.entries.iter().map(|entry| entry.1.clone()).collect()
    }

    // ========================================================================
    // Packets
    // ========================================================================

    /// Serialize into a JSON packet recording the comparator name
    pub fn to_packet(&self) -> Result<String, CollectionError>
    where
        K: Serialize,
        V: Serialize,
    {
        serde_json::to_string(self).map_err(|err| CollectionError::Serialization {
            message: err.to_string(),
        })
    }

    /// Rebuild from a packet, re-attaching a caller-supplied comparator
    ///
    /// Fails with `Serialization` when the packet was recorded under a
    /// different comparator name.
    pub fn from_packet_with(packet: &str, comparator: Comparator<K>) -> Result<Self, CollectionError>
    where
        K: serde::de::DeserializeOwned,
        V: serde::de::DeserializeOwned,
    {
        let packet: MapPacket<K, V> =
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
        let mut map = Map::with_comparator(comparator);
        for (key, value) in packet.entries {
            map.set(key, value);
        }
        Ok(map)
    }
}

impl<K: Ord, V> Default for Map<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Map<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Display for Map<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_entry_preview(f, "Map", self.len(), self.iter())
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for Map<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.comparator.name() == other.comparator.name() && self.entries == other.entries
    }
}

impl<K: Eq, V: Eq> Eq for Map<K, V> {}

impl<K, V: Ord> Comparable for Map<K, V> {
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
            self.comparator
                .compare(a.0, b.0)
                .then_with(|| a.1.cmp(b.1))
        }))
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Map<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

impl<K, V> Extend<(K, V)> for Map<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K: Serialize, V: Serialize> Serialize for Map<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut packet = serializer.serialize_struct("Map", 2)?;
        packet.serialize_field("comparator", self.comparator.name())?;
        packet.serialize_field("entries", self.entries.as_slice())?;
        packet.end()
    }
}

#[derive(serde::Deserialize)]
struct MapPacket<K, V> {
    comparator: String,
    entries: Vec<(K, V)>,
}

impl<'de, K, V> Deserialize<'de> for Map<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let packet = MapPacket::<K, V>::deserialize(deserializer)?;
        let comparator = Comparator::natural();
        if packet.comparator != comparator.name() {
            return Err(serde::de::Error::custom(format!(
                "packet comparator {:?} requires from_packet_with",
                packet.comparator
            )));
        }
        let mut map = Map::with_comparator(comparator);
        for (key, value) in packet.entries {
            map.set(key, value);
        }
        Ok(map)
    }
}
