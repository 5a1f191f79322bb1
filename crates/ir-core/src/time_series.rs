//! Ordered time-series container.
//!
//! `TimeSeries<K, V>` is an ordered map used for historical fixings: index
//! fixings keyed by fixing date, or FX fixings keyed by FX fixing date. The
//! fixing resolution only ever queries it point-wise, so the container stays
//! a thin layer over a `BTreeMap`.

use crate::errors::{Error, Result};
use std::collections::BTreeMap;

/// A key-ordered container backed by a `BTreeMap`.
///
/// Missing keys return `None`; there is no null sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<K: Ord + Clone, V: Clone> {
    data: BTreeMap<K, V>,
}

impl<K: Ord + Clone, V: Clone> Default for TimeSeries<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, V: Clone> std::iter::FromIterator<(K, V)> for TimeSeries<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<K: Ord + Clone, V: Clone> TimeSeries<K, V> {
    // ── Constructors ─────────────────────────────────────────────────────

    /// Create an empty time series.
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    /// Build from parallel slices of keys and values.
    ///
    /// # Errors
    /// Returns [`Error::LengthMismatch`] if the slices differ in length.
    pub fn from_key_values(keys: &[K], values: &[V]) -> Result<Self> {
        if keys.len() != values.len() {
            return Err(Error::LengthMismatch {
                first: "keys",
                first_len: keys.len(),
                second: "values",
                second_len: values.len(),
            });
        }
        Ok(keys.iter().cloned().zip(values.iter().cloned()).collect())
    }

    /// Return a copy of the series with `(key, value)` added or replaced.
    pub fn with(mut self, key: K, value: V) -> Self {
        self.data.insert(key, value);
        self
    }

    // ── Inspectors ───────────────────────────────────────────────────────

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The earliest key, or `None` if empty.
    pub fn first_key(&self) -> Option<&K> {
        self.data.keys().next()
    }

    /// The latest key, or `None` if empty.
    pub fn last_key(&self) -> Option<&K> {
        self.data.keys().next_back()
    }

    // ── Element access ───────────────────────────────────────────────────

    /// Look up a value by key.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.data.get(key)
    }

    /// Insert or overwrite a value.
    pub fn insert(&mut self, key: K, value: V) {
        self.data.insert(key, value);
    }

    /// Whether a key is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.data.contains_key(key)
    }

    /// Iterate over `(&K, &V)` in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.data.iter()
    }

    /// Entries with keys in `[from, to]`, ascending.
    pub fn between<'a>(&'a self, from: &K, to: &K) -> impl Iterator<Item = (&'a K, &'a V)> {
        self.data.range(from.clone()..=to.clone())
    }
}

impl<K: Ord + Clone + std::fmt::Debug, V: Clone + std::fmt::Display> std::fmt::Display
    for TimeSeries<K, V>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (k, v) in &self.data {
            writeln!(f, "{k:?} => {v}")?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_construction() {
        let ts: TimeSeries<i32, f64> = TimeSeries::new();
        assert!(ts.is_empty());
        assert!(ts.first_key().is_none());
        assert!(ts.get(&1).is_none());
    }

    #[test]
    fn from_key_values_sorts_keys() {
        let ts = TimeSeries::from_key_values(&[3, 1, 2], &[0.03, 0.01, 0.02]).unwrap();
        assert_eq!(ts.len(), 3);
        assert_eq!(ts.first_key(), Some(&1));
        assert_eq!(ts.last_key(), Some(&3));
        assert_eq!(ts.get(&2), Some(&0.02));
    }

    #[test]
    fn from_key_values_rejects_ragged_input() {
        let err = TimeSeries::<i32, f64>::from_key_values(&[1, 2], &[0.01]).unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                first_len: 2,
                second_len: 1,
                ..
            }
        ));
    }

    #[test]
    fn with_and_insert_overwrite() {
        let mut ts = TimeSeries::new().with(10, 0.01).with(20, 0.02);
        ts.insert(10, 0.015);
        assert_eq!(ts.get(&10), Some(&0.015));
        assert!(ts.contains_key(&20));
        assert!(!ts.contains_key(&15));
    }

    #[test]
    fn between_is_inclusive() {
        let ts: TimeSeries<i32, f64> = (1..=5).map(|k| (k, k as f64)).collect();
        let keys: Vec<i32> = ts.between(&2, &4).map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![2, 3, 4]);
    }

    proptest::proptest! {
        #[test]
        fn iteration_is_sorted_and_deduplicated(keys in proptest::collection::vec(-500i32..500, 0..60)) {
            let ts: TimeSeries<i32, f64> = keys.iter().map(|k| (*k, *k as f64)).collect();
            let collected: Vec<i32> = ts.iter().map(|(k, _)| *k).collect();
            proptest::prop_assert!(collected.windows(2).all(|w| w[0] < w[1]));
            let mut expected = keys.clone();
            expected.sort_unstable();
            expected.dedup();
            proptest::prop_assert_eq!(collected, expected);
        }
    }
}
