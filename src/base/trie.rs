//! Prefix-searchable ordered map.
//!
//! Every tree level (and every enum leaf) keeps its children in a
//! `TrieIndex` keyed by sanitized name. Prefix queries walk the ordered key
//! space starting at the prefix itself, so they cost `O(log n + k)` for `k`
//! results and always come back in ascending key order.

use std::collections::BTreeMap;
use std::ops::Bound;

use smol_str::SmolStr;

/// Sorted map from sanitized keys to `V` supporting prefix sub-map queries.
#[derive(Clone, Debug)]
pub struct TrieIndex<V> {
    entries: BTreeMap<SmolStr, V>,
}

impl<V> Default for TrieIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TrieIndex<V> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert or overwrite an entry, returning the previous value.
    pub fn insert(&mut self, key: impl Into<SmolStr>, value: V) -> Option<V> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.entries.remove(key)
    }

    /// All entries whose key starts with `prefix`, in ascending key order.
    ///
    /// An empty prefix yields every entry.
    pub fn prefix_map<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a V)> + 'a {
        self.entries
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Values of [`prefix_map`](Self::prefix_map), in key order.
    pub fn prefix_values<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a V> + 'a {
        self.prefix_map(prefix).map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(SmolStr::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Into<SmolStr>, V> FromIterator<(K, V)> for TrieIndex<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
