//! Streak reports: the scanner's output plus derived queries, flattened
//! into a serializable, display-ready form.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use streaklab_core::{scan, LabelSet, LabelSummary, Streak, StreakList, TransitionMatrix};
use tracing::info;

use crate::data_loader::Loaded;

/// Current report schema version. Imports reject anything newer.
pub const SCHEMA_VERSION: u32 = 1;

/// One streak with its keys rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRow {
    pub label: String,
    pub start: String,
    pub end: String,
    pub length: usize,
}

impl StreakRow {
    pub fn from_streak<K: Display, L: Display>(s: &Streak<K, L>) -> Self {
        Self {
            label: s.label().to_string(),
            start: s.start().to_string(),
            end: s.end().to_string(),
            length: s.length(),
        }
    }
}

/// Per-label section. `summary` and `longest` are `None` when the label
/// never occurs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRow {
    pub label: String,
    pub summary: Option<LabelSummary>,
    pub longest: Option<StreakRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRow {
    pub from: String,
    pub to: String,
    pub count: usize,
    pub probability: Option<f64>,
}

/// Full streak analysis of one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakReport {
    pub schema_version: u32,
    /// Dataset kind, e.g. `sentiment` or `trades`.
    pub dataset: String,
    pub source: String,
    pub dataset_hash: String,
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub rows_dropped: usize,
    pub observations: usize,
    pub min_length: usize,
    pub labels: Vec<LabelRow>,
    /// Streaks with `length >= min_length`, longest first.
    pub extreme_streaks: Vec<StreakRow>,
    pub length_distribution: BTreeMap<usize, usize>,
    pub transitions: Vec<TransitionRow>,
    /// Every streak, in input order.
    pub streaks: Vec<StreakRow>,
}

impl StreakReport {
    /// Scan `loaded` and derive every report section from the streak list.
    pub fn build<K, L>(dataset: &str, loaded: &Loaded<K, L>, min_length: usize) -> Self
    where
        K: Clone + Display,
        L: LabelSet,
    {
        let streaks = scan(loaded.observations.iter().cloned());
        info!(
            dataset,
            observations = loaded.observations.len(),
            streaks = streaks.len(),
            "scanned streaks"
        );
        Self::from_streaks(dataset, loaded, &streaks, min_length)
    }

    fn from_streaks<K, L>(
        dataset: &str,
        loaded: &Loaded<K, L>,
        streaks: &StreakList<K, L>,
        min_length: usize,
    ) -> Self
    where
        K: Display,
        L: LabelSet,
    {
        let labels = L::ALL
            .iter()
            .map(|label| LabelRow {
                label: label.to_string(),
                summary: streaks.label_summary(label),
                longest: streaks.longest(label).map(StreakRow::from_streak),
            })
            .collect();

        let matrix = TransitionMatrix::from_streaks_where(streaks, L::in_transitions);
        let mut transitions = Vec::new();
        for from in L::ALL.iter().filter(|l| matrix.row_total(l) > 0) {
            for to in L::ALL.iter().filter(|l| l.in_transitions()) {
                transitions.push(TransitionRow {
                    from: from.to_string(),
                    to: to.to_string(),
                    count: matrix.count(from, to),
                    probability: matrix.probability(from, to),
                });
            }
        }

        Self {
            schema_version: SCHEMA_VERSION,
            dataset: dataset.to_string(),
            source: loaded.source_name.clone(),
            dataset_hash: loaded.dataset_hash.clone(),
            rows_read: loaded.rows_read,
            rows_skipped: loaded.rows_skipped,
            rows_dropped: loaded.rows_dropped,
            observations: streaks.total_observations(),
            min_length,
            labels,
            extreme_streaks: streaks
                .at_least(min_length)
                .into_iter()
                .map(StreakRow::from_streak)
                .collect(),
            length_distribution: streaks.length_distribution(),
            transitions,
            streaks: streaks.iter().map(StreakRow::from_streak).collect(),
        }
    }

    pub fn label(&self, label: &str) -> Option<&LabelRow> {
        self.labels.iter().find(|row| row.label == label)
    }

    /// Longest streak length for `label`; `None` if it never occurs.
    pub fn longest_length(&self, label: &str) -> Option<usize> {
        self.label(label)
            .and_then(|row| row.longest.as_ref())
            .map(|s| s.length)
    }

    pub fn streak_count(&self) -> usize {
        self.streaks.len()
    }
}
