//! Dataset runs: load, scan, and report, one dataset at a time.
//!
//! The two datasets share nothing: each run loads its own file, scans its
//! own series, and yields its own report. A config run tolerates one
//! dataset failing and only errors when nothing could be analyzed.

use thiserror::Error;
use tracing::{error, info};

use crate::config::{ReportConfig, SentimentSource, StreakLabConfig, TradeSource};
use crate::data_loader::{load_sentiment, load_trades, LoadError};
use crate::report::StreakReport;

pub const SENTIMENT_DATASET: &str = "sentiment";
pub const TRADES_DATASET: &str = "trades";

#[derive(Debug, Error)]
pub enum RunError {
    #[error("no dataset could be analyzed: {}", .failures.join("; "))]
    NothingAnalyzed { failures: Vec<String> },
}

/// Reports from a config run, plus the datasets that failed.
#[derive(Debug)]
pub struct RunOutcome {
    pub reports: Vec<StreakReport>,
    pub failures: Vec<(String, LoadError)>,
}

pub fn analyze_sentiment(
    source: &SentimentSource,
    report: &ReportConfig,
) -> Result<StreakReport, LoadError> {
    let loaded = load_sentiment(source)?;
    Ok(StreakReport::build(SENTIMENT_DATASET, &loaded, report.min_length))
}

pub fn analyze_trades(
    source: &TradeSource,
    report: &ReportConfig,
) -> Result<StreakReport, LoadError> {
    let loaded = load_trades(source)?;
    Ok(StreakReport::build(TRADES_DATASET, &loaded, report.min_length))
}

/// Analyze both datasets named in `config`.
pub fn run_config(config: &StreakLabConfig) -> Result<RunOutcome, RunError> {
    let mut reports = Vec::new();
    let mut failures = Vec::new();

    match analyze_sentiment(&config.sentiment, &config.report) {
        Ok(r) => reports.push(r),
        Err(e) => {
            error!(dataset = SENTIMENT_DATASET, error = %e, "dataset failed");
            failures.push((SENTIMENT_DATASET.to_string(), e));
        }
    }
    match analyze_trades(&config.trades, &config.report) {
        Ok(r) => reports.push(r),
        Err(e) => {
            error!(dataset = TRADES_DATASET, error = %e, "dataset failed");
            failures.push((TRADES_DATASET.to_string(), e));
        }
    }

    if reports.is_empty() {
        return Err(RunError::NothingAnalyzed {
            failures: failures
                .iter()
                .map(|(name, e)| format!("{name}: {e}"))
                .collect(),
        });
    }

    info!(
        analyzed = reports.len(),
        failed = failures.len(),
        "config run complete"
    );
    Ok(RunOutcome { reports, failures })
}
