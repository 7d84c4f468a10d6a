//! StreakLab Core: observations, the streak scanner, and derived streak queries.
//!
//! This crate contains the one stateful algorithm of the workspace:
//! - Domain types (observations, streaks, label alphabets)
//! - A single-pass streak scanner, generic over key and label equality
//! - Pure queries over scanner output (longest streak, threshold filter,
//!   length distribution, per-label summary)
//! - Label transition counts derived from a streak list
//!
//! Nothing here does I/O. Loading, normalization, and reporting live in
//! `streaklab-runner`.

pub mod domain;
pub mod query;
pub mod scanner;
pub mod transition;

pub use domain::{
    LabelError, LabelSet, Observation, SentimentObservation, Sentiment, Streak, StreakList,
    TradeObservation, TradeOutcome,
};
pub use query::LabelSummary;
pub use scanner::{scan, scan_by};
pub use transition::TransitionMatrix;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    /// Compile-time check: core types can be handed to worker threads.
    ///
    /// Independent datasets are scanned independently; nothing in here may
    /// hold a non-thread-safe handle.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<SentimentObservation>();
        require_sync::<TradeObservation>();
        require_send::<Streak<NaiveDate, Sentiment>>();
        require_sync::<Streak<NaiveDate, Sentiment>>();
        require_send::<StreakList<NaiveDateTime, TradeOutcome>>();
        require_sync::<StreakList<NaiveDateTime, TradeOutcome>>();
        require_send::<TransitionMatrix<Sentiment>>();
        require_sync::<TransitionMatrix<Sentiment>>();
        require_send::<LabelSummary>();
        require_sync::<LabelSummary>();
        require_send::<LabelError>();
        require_sync::<LabelError>();
    }

    #[test]
    fn sentiment_and_trade_sequences_share_one_scanner() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        let sentiment = scan(vec![
            Observation::new(day(1), Sentiment::Fear),
            Observation::new(day(2), Sentiment::Fear),
            Observation::new(day(3), Sentiment::Greed),
        ]);
        let trades = scan(vec![
            Observation::new(0usize, TradeOutcome::Win),
            Observation::new(1, TradeOutcome::Loss),
            Observation::new(2, TradeOutcome::Loss),
        ]);

        assert_eq!(sentiment.len(), 2);
        assert_eq!(trades.len(), 2);
        assert_eq!(sentiment.longest_length(&Sentiment::Fear), Some(2));
        assert_eq!(trades.longest_length(&TradeOutcome::Loss), Some(2));
    }
}
