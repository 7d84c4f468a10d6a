//! Domain types for StreakLab

pub mod label;
pub mod observation;
pub mod streak;

pub use label::{LabelError, LabelSet, Sentiment, TradeOutcome};
pub use observation::Observation;
pub use streak::{Streak, StreakList};

/// A daily Fear & Greed classification.
pub type SentimentObservation = Observation<chrono::NaiveDate, Sentiment>;

/// A closed trade fill, keyed by its execution timestamp.
pub type TradeObservation = Observation<chrono::NaiveDateTime, TradeOutcome>;
