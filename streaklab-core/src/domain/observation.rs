//! Observation: one labeled point of an ordered series.

use serde::{Deserialize, Serialize};

/// A `(key, label)` pair.
///
/// The key only stamps streak boundaries; the scanner never compares keys,
/// so callers are responsible for handing observations over in key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation<K, L> {
    pub key: K,
    pub label: L,
}

impl<K, L> Observation<K, L> {
    pub fn new(key: K, label: L) -> Self {
        Self { key, label }
    }
}

impl<K, L> From<(K, L)> for Observation<K, L> {
    fn from((key, label): (K, L)) -> Self {
        Self { key, label }
    }
}
