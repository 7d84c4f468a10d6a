//! Streak scanner: one linear pass over an ordered, labeled series.
//!
//! The scanner keeps a single open streak. Each observation either extends
//! it (same label) or closes it and opens a new one. There is no lookahead,
//! no sorting, and no validation of key order: the caller owns ordering.

use crate::domain::{Observation, Streak, StreakList};

/// Scan with `PartialEq` label equality.
///
/// Empty input yields an empty list.
pub fn scan<K, L, I>(observations: I) -> StreakList<K, L>
where
    K: Clone,
    L: PartialEq,
    I: IntoIterator<Item = Observation<K, L>>,
{
    scan_by(observations, |a, b| a == b)
}

/// Scan with caller-supplied label equality.
///
/// `same_label(open, next)` is called with the open streak's label first.
/// A streak keeps the label of the observation that opened it, so with a
/// looser equality (e.g. case-insensitive) the first spelling wins.
pub fn scan_by<K, L, I, F>(observations: I, mut same_label: F) -> StreakList<K, L>
where
    K: Clone,
    I: IntoIterator<Item = Observation<K, L>>,
    F: FnMut(&L, &L) -> bool,
{
    let mut iter = observations.into_iter();
    let Some(first) = iter.next() else {
        return StreakList::empty();
    };

    let mut closed = Vec::new();
    let mut open = Streak::open(first.key, first.label);

    for obs in iter {
        if same_label(open.label(), &obs.label) {
            open.extend(obs.key);
        } else {
            closed.push(std::mem::replace(
                &mut open,
                Streak::open(obs.key, obs.label),
            ));
        }
    }
    closed.push(open);

    StreakList::new(closed)
}
