//! HashMap - key-value collection with O(1) average operations
//!
//! Keys are resolved through the canonical [`KeyOf`](crate::hash::KeyOf)
//! mapping into tagged hash keys. Iteration is insertion order, which is
//! deliberately not the sorted order of the ordered `Map`; removal keeps
//! the remaining entries in their original insertion order.

use std::cmp::Ordering;
use std::collections::HashMap as StdHashMap;
use std::fmt;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::compare::{compare_sequences, Comparable};
use crate::error::CollectionError;
use crate::fmt::write_entry_preview;
use crate::hash::{HashKey, KeyOf};
use crate::vector::Vector;

/// Hash-keyed map preserving insertion order
///
/// Every element type has exactly one canonical `KeyOf` mapping, so two
/// `HashMap`s of the same type always share a hash discipline; the
/// compatibility check the ordered variants perform at runtime is
/// discharged statically here.
#[derive(Clone)]
pub struct HashMap<K, V> {
    index: StdHashMap<HashKey, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> HashMap<K, V> {
    /// Create new empty HashMap
    pub fn new() -> Self {
        Self {
            index: StdHashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Create HashMap with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: StdHashMap::with_capacity(capacity),
            entries: Vec::with_capacity(capacity),
        }
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
        self.index.clear();
        self.entries.clear();
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter().map(|entry| (&entry.0, &entry.1))
    }
}

impl<K: KeyOf, V> HashMap<K, V> {
    // ========================================================================
    // Entry access
    // ========================================================================

    /// Insert or overwrite, returning the displaced value if the key existed
    ///
    /// Overwriting keeps the key's original insertion position.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let hashed = key.key_of();
        match self.index.get(&hashed) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, value)),
            None => {
                self.index.insert(hashed, self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Strict insertion; fails with `DuplicateKey` when the key exists
    pub fn add(&mut self, key: K, value: V) -> Result<(), CollectionError>
    where
        K: fmt::Debug,
    {
        let hashed = key.key_of();
        if self.index.contains_key(&hashed) {
            return Err(CollectionError::duplicate_key(&key));
        }
        self.index.insert(hashed, self.entries.len());
        self.entries.push((key, value));
        Ok(())
    }

    /// Strict insertion, reporting success instead of failing
    pub fn try_add(&mut self, key: K, value: V) -> bool {
        let hashed = key.key_of();
        if self.index.contains_key(&hashed) {
            return false;
        }
        self.index.insert(hashed, self.entries.len());
        self.entries.push((key, value));
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
        let slot = *self.index.get(&key.key_of())?;
        Some(&self.entries[slot].1)
    }

    /// Mutable value under `key`
    pub fn get_mut(&mut self, key: &K) -> Result<&mut V, CollectionError>
    where
        K: fmt::Debug,
    {
        match self.index.get(&key.key_of()) {
            Some(&slot) => Ok(&mut self.entries[slot].1),
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
    ///
    /// The remaining entries keep their insertion order.
    pub fn try_remove(&mut self, key: &K) -> Option<V> {
        let slot = self.index.remove(&key.key_of())?;
        let (_, value) = self.entries.remove(slot);
        for other in self.index.values_mut() {
            if *other > slot {
                *other -= 1;
            }
        }
        Some(value)
    }

    /// Check whether `key` is present
    pub fn has_key(&self, key: &K) -> bool {
        self.index.contains_key(&key.key_of())
    }

    // ========================================================================
    // Key relocation
    // ========================================================================

    /// Relocate the value under `src` to `dst`, silently overwriting any
    /// existing destination entry
    ///
    /// A relocated key re-enters at the back of the insertion order. Fails
    /// only with `UnknownKey` when `src` is absent.
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
    /// Infallible: same-typed hash maps always share the canonical hash
    /// discipline.
    pub fn merge(&self, other: &Self) -> Self
    where
        K: Clone,
        V: Clone,
    {
        let mut out = self.clone();
        for (key, value) in other.iter() {
            out.set(key.clone(), value.clone());
        }
        out
    }

    /// New map with `f` applied to every value; keys keep their insertion
    /// order
    pub fn map_values<U>(&self, mut f: impl FnMut(&K, &V) -> U) -> HashMap<K, U>
    where
        K: Clone,
    {
        HashMap {
            index: self.index.clone(),
            entries: self
                .entries
                .iter()
                .map(|entry| (entry.0.clone(), f(&entry.0, &entry.1)))
                .collect(),
        }
    }

    /// New map holding the entries `keep` accepts, in insertion order
    pub fn filter(&self, mut keep: impl FnMut(&K, &V) -> bool) -> Self
    where
        K: Clone,
        V: Clone,
    {
        let mut out = Self::new();
        for (key, value) in self.iter() {
            if keep(key, value) {
                out.set(key.clone(), value.clone());
            }
        }
        out
    }

    /// Drop every entry `keep` rejects
    pub fn filter_in_place(&mut self, mut keep: impl FnMut(&K, &V) -> bool) {
        self.entries.retain(|entry| keep(&entry.0, &entry.1));
        self.index.clear();
        for (slot, entry) in self.entries.iter().enumerate() {
            self.index.insert(entry.0.key_of(), slot);
        }
    }

    /// Visit every entry in insertion order
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

    /// All keys in insertion order
    pub fn keys(&self) -> Vector<K>
    where
        K: Clone,
    {
        self.entries.iter().map(|entry| entry.0.clone()).collect()
    }

    /// All values in insertion order
    pub fn values(&self) -> Vector<V>
    where
        V: Clone,
    {
        self.entries.iter().map(|entry| entry.1.clone()).collect()
    }
}

impl<K, V> Default for HashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for HashMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Display for HashMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_entry_preview(f, "HashMap", self.len(), self.iter())
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for HashMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq, V: Eq> Eq for HashMap<K, V> {}

impl<K: Ord, V: Ord> Comparable for HashMap<K, V> {
    fn compare(&self, other: &Self) -> Result<Ordering, CollectionError> {
        Ok(compare_sequences(self.iter(), other.iter(), |a, b| {
            a.0.cmp(b.0).then_with(|| a.1.cmp(b.1))
        }))
    }
}

impl<K: KeyOf, V> FromIterator<(K, V)> for HashMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

impl<K: KeyOf, V> Extend<(K, V)> for HashMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K: Serialize, V: Serialize> Serialize for HashMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, K, V> Deserialize<'de> for HashMap<K, V>
where
    K: Deserialize<'de> + KeyOf,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Vec::<(K, V)>::deserialize(deserializer)?
            .into_iter()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HashMap<i64, i64> {
        let mut map = HashMap::new();
        for (k, v) in [(10, 1), (20, 2), (30, 3), (40, 4), (50, 5)] {
            map.set(k, v);
        }
        map
    }

    #[test]
    fn test_iteration_is_insertion_order_not_sorted() {
        let mut map = HashMap::new();
        map.set(30, "c");
        map.set(10, "a");
        map.set(20, "b");
        let keys: Vec<i64> = map.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![30, 10, 20]);
    }

    #[test]
    fn test_overwrite_keeps_insertion_position() {
        let mut map = HashMap::new();
        map.set("a", 1);
        map.set("b", 2);
        assert_eq!(map.set("a", 10), Some(1));
        let keys: Vec<&str> = map.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_removal_preserves_remaining_order() {
        let mut map = sample();
        assert_eq!(map.remove(&30), Ok(3));
        let keys: Vec<i64> = map.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![10, 20, 40, 50]);
        // index stays consistent after the shift
        assert_eq!(map.try_get(&50), Some(&5));
        map.set(60, 6);
        assert_eq!(map.try_get(&60), Some(&6));
    }

    #[test]
    fn test_move_key_overwrites_destination() {
        let mut map = sample();
        map.move_key(&20, 40).unwrap();
        assert_eq!(map.try_get(&20), None);
        assert_eq!(map.try_get(&40), Some(&2));
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_rename_key_is_strict() {
        let mut map = sample();
        assert_eq!(
            map.rename_key(&10, 20),
            Err(CollectionError::DuplicateKey {
                key: "20".to_string()
            })
        );
        assert_eq!(map.try_get(&10), Some(&1));
        assert!(map.rename_key(&10, 15).is_ok());
        assert_eq!(map.try_get(&15), Some(&1));
    }

    #[test]
    fn test_mixed_kind_keys_never_collide() {
        let mut map: HashMap<HashKey, &str> = HashMap::new();
        map.set(1i64.key_of(), "int");
        map.set("1".key_of(), "string");
        map.set(true.key_of(), "bool");
        map.set(().key_of(), "unit");
        assert_eq!(map.len(), 4);
        assert_eq!(map.try_get(&1i64.key_of()), Some(&"int"));
    }

    #[test]
    fn test_filter_in_place_rebuilds_index() {
        let mut map = sample();
        map.filter_in_place(|_, v| v % 2 == 1);
        let keys: Vec<i64> = map.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![10, 30, 50]);
        assert_eq!(map.try_get(&50), Some(&5));
        assert_eq!(map.try_get(&20), None);
    }

    #[test]
    fn test_merge_is_infallible_for_same_type() {
        let left = sample();
        let mut right = HashMap::new();
        right.set(20, 200);
        right.set(60, 600);
        let merged = left.merge(&right);
        assert_eq!(merged.try_get(&20), Some(&200));
        assert_eq!(merged.len(), 6);
    }
}
