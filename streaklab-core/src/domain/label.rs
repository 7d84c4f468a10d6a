//! Label alphabets: market sentiment and trade outcome.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors from parsing a label out of free text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelError {
    #[error("unknown sentiment label '{0}' (expected fear, neutral, greed or unclassified)")]
    UnknownSentiment(String),

    #[error("unknown trade outcome '{0}' (expected win or loss)")]
    UnknownOutcome(String),
}

/// A finite label alphabet with a fixed display order.
///
/// Reports iterate `ALL` so that labels with no streaks still get a row.
pub trait LabelSet: Copy + Ord + fmt::Display + Send + Sync + 'static {
    const ALL: &'static [Self];

    /// Whether day-to-day transitions into or out of this label are counted.
    fn in_transitions(&self) -> bool {
        true
    }
}

/// Simplified Fear & Greed classification.
///
/// The five index classes collapse to three; anything that does not map
/// (blank cells, typos, new classes) becomes `Unclassified` rather than being
/// dropped, so it still breaks a streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Fear,
    Neutral,
    Greed,
    Unclassified,
}

impl Sentiment {
    /// Map a raw index classification onto the simplified alphabet.
    ///
    /// Case and surrounding whitespace are ignored. Never fails.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "extreme fear" | "fear" => Sentiment::Fear,
            "extreme greed" | "greed" => Sentiment::Greed,
            "neutral" => Sentiment::Neutral,
            _ => Sentiment::Unclassified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Fear => "Fear",
            Sentiment::Neutral => "Neutral",
            Sentiment::Greed => "Greed",
            Sentiment::Unclassified => "Unclassified",
        }
    }

    pub fn is_classified(&self) -> bool {
        !matches!(self, Sentiment::Unclassified)
    }
}

impl LabelSet for Sentiment {
    const ALL: &'static [Self] = &[
        Sentiment::Fear,
        Sentiment::Neutral,
        Sentiment::Greed,
        Sentiment::Unclassified,
    ];

    fn in_transitions(&self) -> bool {
        self.is_classified()
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse of a simplified label name (case-insensitive).
///
/// Unlike [`Sentiment::normalize`], unknown text is an error.
impl FromStr for Sentiment {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fear" => Ok(Sentiment::Fear),
            "neutral" => Ok(Sentiment::Neutral),
            "greed" => Ok(Sentiment::Greed),
            "unclassified" => Ok(Sentiment::Unclassified),
            _ => Err(LabelError::UnknownSentiment(s.to_string())),
        }
    }
}

/// Win/loss outcome of a closed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TradeOutcome {
    Win,
    Loss,
}

impl TradeOutcome {
    /// A trade wins only with strictly positive closed PnL.
    ///
    /// Zero, negative, NaN and missing PnL are all losses.
    pub fn from_pnl(pnl: Option<f64>) -> Self {
        match pnl {
            Some(p) if p > 0.0 => TradeOutcome::Win,
            _ => TradeOutcome::Loss,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeOutcome::Win => "Win",
            TradeOutcome::Loss => "Loss",
        }
    }

}

impl LabelSet for TradeOutcome {
    const ALL: &'static [Self] = &[TradeOutcome::Win, TradeOutcome::Loss];
}

impl fmt::Display for TradeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeOutcome {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" => Ok(TradeOutcome::Win),
            "loss" => Ok(TradeOutcome::Loss),
            _ => Err(LabelError::UnknownOutcome(s.to_string())),
        }
    }
}
