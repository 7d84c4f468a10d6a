//! Property tests for scanner invariants.
//!
//! Uses proptest to verify, for arbitrary label sequences:
//! 1. Coverage: streak lengths sum to the input length
//! 2. No gap / no overlap: each streak starts right after the previous ends
//! 3. Label partition: adjacent streaks never share a label
//! 4. Idempotence: expanding and re-scanning reproduces the same streaks

use proptest::prelude::*;
use streaklab_core::{Sentiment, StreakList, TradeOutcome, TransitionMatrix};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_sentiment() -> impl Strategy<Value = Sentiment> {
    prop_oneof![
        Just(Sentiment::Fear),
        Just(Sentiment::Neutral),
        Just(Sentiment::Greed),
        Just(Sentiment::Unclassified),
    ]
}

fn arb_outcome() -> impl Strategy<Value = TradeOutcome> {
    prop_oneof![Just(TradeOutcome::Win), Just(TradeOutcome::Loss)]
}

fn arb_series() -> impl Strategy<Value = Vec<Sentiment>> {
    prop::collection::vec(arb_sentiment(), 0..200)
}

fn expand<L: Clone>(streaks: &StreakList<usize, L>) -> Vec<L> {
    streaks
        .iter()
        .flat_map(|s| std::iter::repeat(s.label().clone()).take(s.length()))
        .collect()
}

proptest! {
    #[test]
    fn coverage(labels in arb_series()) {
        let list = StreakList::from_labels(labels.clone());
        prop_assert_eq!(list.total_observations(), labels.len());
        prop_assert!(list.iter().all(|s| s.length() >= 1));
        prop_assert_eq!(list.is_empty(), labels.is_empty());
    }

    #[test]
    fn no_gap_no_overlap(labels in arb_series()) {
        let list = StreakList::from_labels(labels.clone());
        if let Some(first) = list.as_slice().first() {
            prop_assert_eq!(*first.start(), 0);
        }
        if let Some(last) = list.as_slice().last() {
            prop_assert_eq!(*last.end(), labels.len() - 1);
        }
        for s in list.iter() {
            prop_assert_eq!(s.end() - s.start() + 1, s.length());
        }
        for pair in list.as_slice().windows(2) {
            prop_assert_eq!(*pair[0].end() + 1, *pair[1].start());
        }
    }

    #[test]
    fn label_partition(labels in arb_series()) {
        let list = StreakList::from_labels(labels.clone());
        for pair in list.as_slice().windows(2) {
            prop_assert_ne!(pair[0].label(), pair[1].label());
        }
        for s in list.iter() {
            for i in *s.start()..=*s.end() {
                prop_assert_eq!(&labels[i], s.label());
            }
        }
    }

    #[test]
    fn idempotent_rescan(labels in prop::collection::vec(arb_outcome(), 0..200)) {
        let list = StreakList::from_labels(labels.clone());
        let expanded = expand(&list);
        prop_assert_eq!(&expanded, &labels);
        prop_assert_eq!(StreakList::from_labels(expanded), list);
    }

    #[test]
    fn longest_is_max_over_label(labels in arb_series()) {
        let list = StreakList::from_labels(labels.clone());
        for label in [Sentiment::Fear, Sentiment::Neutral, Sentiment::Greed] {
            let expected = list
                .iter()
                .filter(|s| s.label() == &label)
                .map(|s| s.length())
                .max();
            prop_assert_eq!(list.longest_length(&label), expected);
            prop_assert_eq!(expected.is_some(), labels.contains(&label));
        }
    }

    #[test]
    fn threshold_filter_is_sorted_subset(labels in arb_series(), k in 0usize..8) {
        let list = StreakList::from_labels(labels);
        let hits = list.at_least(k);
        prop_assert!(hits.iter().all(|s| s.length() >= k));
        prop_assert!(hits.windows(2).all(|w| w[0].length() >= w[1].length()));
        prop_assert_eq!(
            hits.len(),
            list.iter().filter(|s| s.length() >= k).count()
        );
    }

    #[test]
    fn transitions_total_one_less_than_input(labels in arb_series()) {
        let list = StreakList::from_labels(labels.clone());
        let m = TransitionMatrix::from_streaks(&list);
        prop_assert_eq!(m.total(), labels.len().saturating_sub(1));
    }
}
