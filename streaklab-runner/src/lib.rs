//! StreakLab Runner: dataset loading, reports, and export.
//!
//! This crate builds on `streaklab-core` to provide:
//! - TOML run configuration
//! - CSV loading for the Fear & Greed index and trade history, with label
//!   normalization applied once before scanning
//! - Per-dataset streak reports (longest per label, extreme streaks,
//!   length distribution, transitions)
//! - JSON / CSV / Markdown export and artifact bundles

pub mod config;
pub mod data_loader;
pub mod export;
pub mod report;
pub mod runner;

pub use config::{ConfigError, ReportConfig, SentimentSource, StreakLabConfig, TradeSource};
pub use data_loader::{load_sentiment, load_trades, LoadError, Loaded};
pub use export::{
    export_json, export_streaks_csv, import_json, render_markdown, render_summary, save_artifacts,
};
pub use report::{LabelRow, StreakReport, StreakRow, TransitionRow, SCHEMA_VERSION};
pub use runner::{analyze_sentiment, analyze_trades, run_config, RunError, RunOutcome};
