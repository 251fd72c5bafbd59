//! Ordered frequency counters with default-zero semantics.
//!
//! Degree bookkeeping for the de Bruijn graph reads absent keys as zero and
//! never goes negative, so the counter exposes exactly that contract instead
//! of leaving callers to sprinkle `entry(..).or_insert(0)` everywhere.

use std::borrow::Borrow;
use std::collections::BTreeMap;

/// An ordered counter: absent keys read as zero, decrements saturate at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counter<K: Ord> {
    counts: BTreeMap<K, usize>,
}

impl<K: Ord> Counter<K> {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    /// Current count for `key`; zero when the key has never been incremented.
    pub fn get<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Increase the count for `key` by one.
    pub fn increment(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Decrease the count for `key` by one, saturating at zero.
    pub fn decrement<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if let Some(count) = self.counts.get_mut(key) {
            *count = count.saturating_sub(1);
        }
    }

    /// Iterate over tracked keys and their counts in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.counts.iter().map(|(key, &count)| (key, count))
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}
