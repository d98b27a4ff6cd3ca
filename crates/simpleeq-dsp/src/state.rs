//! Persistable processor state.

use std::collections::BTreeMap;

/// Flat map of parameter string ID to plain value.
///
/// This is what a processor exports and imports. Serialization lives in
/// `simpleeq-config`; this type only carries the values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSnapshot {
    values: BTreeMap<String, f32>,
}

impl StateSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: f32) -> Option<f32> {
        self.values.insert(key.into(), value)
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<f32> {
        self.values.get(key).copied()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the snapshot holds no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Underlying map.
    pub fn as_map(&self) -> &BTreeMap<String, f32> {
        &self.values
    }
}

impl From<BTreeMap<String, f32>> for StateSnapshot {
    fn from(values: BTreeMap<String, f32>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>> FromIterator<(K, f32)> for StateSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, f32)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
