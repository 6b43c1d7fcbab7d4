//! Data types passed between pipeline stages.

use std::collections::HashMap;

use crate::key::Numeric;
use crate::stats::GroupStats;

/// Insertion-ordered map from a numeric key to a value.
///
/// Iteration follows first-insertion order; re-inserting a key replaces its
/// value in place without moving it.
#[derive(Debug, Clone)]
pub struct KeyedList<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<u64, usize>,
}

impl<K: Numeric, V> KeyedList<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn get(&self, key: K) -> Option<&V> {
        self.index.get(&key.identity()).map(|&i| &self.entries[i].1)
    }

    /// Returns the value for `key`, inserting `default()` at the end if absent.
    pub fn entry_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        let next = self.entries.len();
        let i = *self.index.entry(key.identity()).or_insert(next);
        if i == next {
            self.entries.push((key, default()));
        }
        &mut self.entries[i].1
    }

    /// Sets `key` to `value`, keeping the original position of an existing key.
    pub fn insert(&mut self, key: K, value: V) {
        match self.index.get(&key.identity()) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(key.identity(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Entries sorted by ascending key.
    pub fn sorted_by_key(&self) -> Vec<(K, &V)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
        sorted
    }
}

impl<K: Numeric, V> Default for KeyedList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Values bucketed by key, in first-occurrence order.
pub type Group<K> = KeyedList<K, Vec<K>>;

/// Per-key statistics, in the key order of the source [`Group`].
pub type Aggregate<K> = KeyedList<K, GroupStats>;

/// Per-key throughput; the last line for a key wins.
pub type ThroughputMap<K> = KeyedList<K, K>;

/// `(throughput, median_latency)` rows in ascending key order.
pub type JoinedOutput = Vec<(f64, f64)>;
