//! Streak: a maximal run of consecutive observations sharing one label.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::query::{self, LabelSummary};

/// One run of equal labels.
///
/// Invariants (upheld by the scanner, the only constructor):
/// - `length >= 1`
/// - `length` is the number of observations from `start` to `end` inclusive
/// - `start` precedes or equals `end` in input order
///
/// Deserialization rejects `length == 0`; key order is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Streak<K, L> {
    label: L,
    start: K,
    end: K,
    length: usize,
}

impl<K: Clone, L> Streak<K, L> {
    /// Open a streak of length 1 at `key`.
    pub(crate) fn open(key: K, label: L) -> Self {
        Self {
            label,
            start: key.clone(),
            end: key,
            length: 1,
        }
    }
}

impl<K, L> Streak<K, L> {
    pub(crate) fn extend(&mut self, key: K) {
        self.length += 1;
        self.end = key;
    }

    pub fn label(&self) -> &L {
        &self.label
    }

    pub fn start(&self) -> &K {
        &self.start
    }

    pub fn end(&self) -> &K {
        &self.end
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

#[derive(Deserialize)]
struct RawStreak<K, L> {
    label: L,
    start: K,
    end: K,
    length: usize,
}

impl<'de, K, L> Deserialize<'de> for Streak<K, L>
where
    K: Deserialize<'de>,
    L: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawStreak::<K, L>::deserialize(deserializer)?;
        if raw.length == 0 {
            return Err(de::Error::custom("streak length must be at least 1"));
        }
        Ok(Self {
            label: raw.label,
            start: raw.start,
            end: raw.end,
            length: raw.length,
        })
    }
}

/// Ordered, read-only output of one scanner invocation.
///
/// Covers the input with no gaps and no overlaps. Adjacent streaks never
/// share a label under the equality the scan used. Deserialization checks
/// adjacency with `PartialEq`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StreakList<K, L> {
    streaks: Vec<Streak<K, L>>,
}

impl<K, L> StreakList<K, L> {
    pub(crate) fn new(streaks: Vec<Streak<K, L>>) -> Self {
        Self { streaks }
    }

    pub fn empty() -> Self {
        Self {
            streaks: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.streaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streaks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Streak<K, L>> {
        self.streaks.iter()
    }

    pub fn as_slice(&self) -> &[Streak<K, L>] {
        &self.streaks
    }

    /// Number of observations the list covers (sum of lengths).
    pub fn total_observations(&self) -> usize {
        self.streaks.iter().map(Streak::length).sum()
    }

    /// Streaks with `length >= min_length`, longest first.
    pub fn at_least(&self, min_length: usize) -> Vec<&Streak<K, L>> {
        query::streaks_at_least(&self.streaks, min_length)
    }

    /// Streak count per length.
    pub fn length_distribution(&self) -> BTreeMap<usize, usize> {
        query::length_distribution(&self.streaks)
    }
}

impl<K, L: PartialEq> StreakList<K, L> {
    /// Longest streak carrying `label`, or `None` if there is none.
    pub fn longest(&self, label: &L) -> Option<&Streak<K, L>> {
        query::longest_streak(&self.streaks, label)
    }

    pub fn longest_length(&self, label: &L) -> Option<usize> {
        self.longest(label).map(Streak::length)
    }

    pub fn label_summary(&self, label: &L) -> Option<LabelSummary> {
        query::label_summary(&self.streaks, label)
    }
}

impl<'de, K, L> Deserialize<'de> for StreakList<K, L>
where
    K: Deserialize<'de>,
    L: Deserialize<'de> + PartialEq,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let streaks = Vec::<Streak<K, L>>::deserialize(deserializer)?;
        if let Some(i) = streaks
            .windows(2)
            .position(|pair| pair[0].label == pair[1].label)
        {
            return Err(de::Error::custom(format_args!(
                "streaks {} and {} share a label and would be one streak",
                i,
                i + 1
            )));
        }
        Ok(Self::new(streaks))
    }
}

impl<L: PartialEq> StreakList<usize, L> {
    /// Scan a bare label sequence, keyed by zero-based position.
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
    {
        crate::scanner::scan(
            labels
                .into_iter()
                .enumerate()
                .map(|(i, label)| crate::domain::Observation::new(i, label)),
        )
    }
}

impl<'a, K, L> IntoIterator for &'a StreakList<K, L> {
    type Item = &'a Streak<K, L>;
    type IntoIter = std::slice::Iter<'a, Streak<K, L>>;

    fn into_iter(self) -> Self::IntoIter {
        self.streaks.iter()
    }
}

impl<K, L> IntoIterator for StreakList<K, L> {
    type Item = Streak<K, L>;
    type IntoIter = std::vec::IntoIter<Streak<K, L>>;

    fn into_iter(self) -> Self::IntoIter {
        self.streaks.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TradeOutcome;

    #[test]
    fn open_then_extend() {
        let mut s = Streak::open(3usize, TradeOutcome::Win);
        assert_eq!((s.start(), s.end(), s.length()), (&3, &3, 1));
        s.extend(4);
        s.extend(5);
        assert_eq!((s.start(), s.end(), s.length()), (&3, &5, 3));
        assert_eq!(s.label(), &TradeOutcome::Win);
    }

    #[test]
    fn from_labels_uses_positions_as_keys() {
        use TradeOutcome::*;
        let list = StreakList::from_labels([Win, Win, Loss, Win]);
        let bounds: Vec<_> = list.iter().map(|s| (*s.start(), *s.end())).collect();
        assert_eq!(bounds, vec![(0, 1), (2, 2), (3, 3)]);
        assert_eq!(list.total_observations(), 4);
    }

    #[test]
    fn empty_list() {
        let list: StreakList<usize, TradeOutcome> = StreakList::empty();
        assert!(list.is_empty());
        assert_eq!(list.total_observations(), 0);
        assert_eq!(list.longest(&TradeOutcome::Win), None);
        assert!(list.at_least(1).is_empty());
    }

    #[test]
    fn streak_list_serializes_as_array() {
        use TradeOutcome::*;
        let list = StreakList::from_labels([Loss, Loss]);
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"[{"label":"Loss","start":0,"end":1,"length":2}]"#);
        let deser: StreakList<usize, TradeOutcome> = serde_json::from_str(&json).unwrap();
        assert_eq!(deser, list);
    }

    #[test]
    fn zero_length_streak_is_rejected() {
        let json = r#"{"label":"Win","start":5,"end":1,"length":0}"#;
        let err = serde_json::from_str::<Streak<usize, TradeOutcome>>(json).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn adjacent_equal_labels_are_rejected() {
        let json = r#"[
            {"label":"Win","start":0,"end":0,"length":1},
            {"label":"Win","start":1,"end":1,"length":1}
        ]"#;
        let err = serde_json::from_str::<StreakList<usize, TradeOutcome>>(json).unwrap_err();
        assert!(err.to_string().contains("share a label"));
    }

    #[test]
    fn alternating_labels_deserialize() {
        use TradeOutcome::*;
        let json = r#"[
            {"label":"Win","start":0,"end":2,"length":3},
            {"label":"Loss","start":3,"end":3,"length":1},
            {"label":"Win","start":4,"end":4,"length":1}
        ]"#;
        let list: StreakList<usize, TradeOutcome> = serde_json::from_str(json).unwrap();
        assert_eq!(list, StreakList::from_labels([Win, Win, Win, Loss, Win]));
    }
}
