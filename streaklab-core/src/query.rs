//! Streak queries: pure functions over scanner output.
//!
//! Every query takes a slice of streaks and returns a fresh value. "No data"
//! is reported as `None`, never as a zero.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::Streak;

/// Per-label digest of a streak list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelSummary {
    pub streak_count: usize,
    pub longest: usize,
    pub total_observations: usize,
    pub mean_length: f64,
}

/// Longest streak with a matching label. Ties go to the earliest streak.
pub fn longest_streak<'a, K, L: PartialEq>(
    streaks: &'a [Streak<K, L>],
    label: &L,
) -> Option<&'a Streak<K, L>> {
    let mut best: Option<&Streak<K, L>> = None;
    for s in streaks.iter().filter(|s| s.label() == label) {
        match best {
            Some(b) if b.length() >= s.length() => {}
            _ => best = Some(s),
        }
    }
    best
}

/// Streaks with `length >= min_length`, ordered by descending length.
///
/// The sort is stable: equal lengths keep input order.
pub fn streaks_at_least<K, L>(streaks: &[Streak<K, L>], min_length: usize) -> Vec<&Streak<K, L>> {
    let mut out: Vec<&Streak<K, L>> = streaks
        .iter()
        .filter(|s| s.length() >= min_length)
        .collect();
    out.sort_by(|a, b| b.length().cmp(&a.length()));
    out
}

/// Number of streaks per length.
pub fn length_distribution<K, L>(streaks: &[Streak<K, L>]) -> BTreeMap<usize, usize> {
    let mut dist = BTreeMap::new();
    for s in streaks {
        *dist.entry(s.length()).or_insert(0) += 1;
    }
    dist
}

/// Summary for one label, or `None` if the label never occurs.
pub fn label_summary<K, L: PartialEq>(streaks: &[Streak<K, L>], label: &L) -> Option<LabelSummary> {
    let mut count = 0;
    let mut longest = 0;
    let mut total = 0;

    for s in streaks.iter().filter(|s| s.label() == label) {
        count += 1;
        total += s.length();
        longest = longest.max(s.length());
    }

    if count == 0 {
        return None;
    }
    Some(LabelSummary {
        streak_count: count,
        longest,
        total_observations: total,
        mean_length: total as f64 / count as f64,
    })
}
