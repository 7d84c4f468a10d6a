//! Label transition counts, derived from a streak list.
//!
//! A streak of length `n` is `n - 1` self transitions; every boundary between
//! two adjacent streaks is one cross transition. Counting from streaks gives
//! the same matrix as walking consecutive observation pairs.
//!
//! [`TransitionMatrix::from_streaks_where`] counts a pair only when both of
//! its labels pass a filter. Excluded labels are never bridged: in
//! `Fear, ?, Fear` the two `Fear` days are not a `Fear -> Fear` transition.

use std::collections::BTreeMap;

use crate::domain::StreakList;

/// Counts of `from -> to` label transitions between consecutive observations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionMatrix<L: Ord> {
    counts: BTreeMap<L, BTreeMap<L, usize>>,
}

impl<L: Ord + Clone> TransitionMatrix<L> {
    pub fn from_streaks<K>(streaks: &StreakList<K, L>) -> Self {
        Self::from_streaks_where(streaks, |_| true)
    }

    /// Count only pairs whose labels both satisfy `keep`.
    pub fn from_streaks_where<K, F>(streaks: &StreakList<K, L>, mut keep: F) -> Self
    where
        F: FnMut(&L) -> bool,
    {
        let mut counts: BTreeMap<L, BTreeMap<L, usize>> = BTreeMap::new();
        let slice = streaks.as_slice();

        for s in slice {
            if s.length() > 1 && keep(s.label()) {
                *counts
                    .entry(s.label().clone())
                    .or_default()
                    .entry(s.label().clone())
                    .or_insert(0) += s.length() - 1;
            }
        }
        for pair in slice.windows(2) {
            if !(keep(pair[0].label()) && keep(pair[1].label())) {
                continue;
            }
            *counts
                .entry(pair[0].label().clone())
                .or_default()
                .entry(pair[1].label().clone())
                .or_insert(0) += 1;
        }

        Self { counts }
    }

    pub fn count(&self, from: &L, to: &L) -> usize {
        self.counts
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(0)
    }

    /// Outgoing transitions from `from`.
    pub fn row_total(&self, from: &L) -> usize {
        self.counts.get(from).map(|row| row.values().sum()).unwrap_or(0)
    }

    /// Total transitions (observation count minus one, for non-empty input).
    pub fn total(&self) -> usize {
        self.counts.values().flat_map(|row| row.values()).sum()
    }

    /// Row-normalized probability of moving `from -> to`.
    ///
    /// `None` when `from` has no outgoing transitions.
    pub fn probability(&self, from: &L, to: &L) -> Option<f64> {
        let total = self.row_total(from);
        if total == 0 {
            return None;
        }
        Some(self.count(from, to) as f64 / total as f64)
    }

    /// Probability of staying on `label` for the next observation.
    pub fn persistence(&self, label: &L) -> Option<f64> {
        self.probability(label, label)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
