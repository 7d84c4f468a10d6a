//! Dataset loading and label normalization.
//!
//! Turns the two source CSVs into ordered observation series ready for the
//! scanner:
//! 1. Header names are trimmed (and lowercased for the sentiment file)
//! 2. Keys are parsed; rows whose key does not parse are skipped and counted
//! 3. Labels are normalized exactly once, here
//! 4. Observations are stably sorted by key
//!
//! The scanner downstream trusts this order and does no normalization itself.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use std::fmt::Display;
use std::io::Read;
use std::path::Path;
use streaklab_core::{Observation, Sentiment, SentimentObservation, TradeObservation, TradeOutcome};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{SentimentSource, TradeSource};

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open '{source_name}': {error}")]
    Open {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    #[error("CSV error in '{source_name}': {error}")]
    Csv {
        source_name: String,
        #[source]
        error: csv::Error,
    },

    #[error("'{source_name}' has no '{column}' column")]
    MissingColumn { source_name: String, column: String },
}

/// An ordered observation series plus provenance.
#[derive(Debug, Clone)]
pub struct Loaded<K, L> {
    /// File name (or caller-supplied label for in-memory readers).
    pub source_name: String,
    /// Observations sorted by key.
    pub observations: Vec<Observation<K, L>>,
    /// Data rows read from the file, before any skipping.
    pub rows_read: usize,
    /// Rows skipped because their key did not parse.
    pub rows_skipped: usize,
    /// Rows removed by `drop_unclassified` (sentiment only).
    pub rows_dropped: usize,
    /// BLAKE3 over the final observation series.
    pub dataset_hash: String,
}

// ─── Sentiment ──────────────────────────────────────────────────────

/// Load the Fear & Greed index file named in `source`.
pub fn load_sentiment(
    source: &SentimentSource,
) -> Result<Loaded<NaiveDate, Sentiment>, LoadError> {
    let source_name = source.path.display().to_string();
    let file = open(&source.path)?;
    read_sentiment(file, &source_name, source.drop_unclassified)
}

/// Read a Fear & Greed CSV from any reader.
///
/// Required columns (case-insensitive): `date`, `classification`.
pub fn read_sentiment<R: Read>(
    reader: R,
    source_name: &str,
    drop_unclassified: bool,
) -> Result<Loaded<NaiveDate, Sentiment>, LoadError> {
    let mut rdr = csv_reader(reader);
    let headers = headers(&mut rdr, source_name)?;
    let date_idx = find_column(&headers, "date", source_name)?;
    let class_idx = find_column(&headers, "classification", source_name)?;

    let mut observations: Vec<SentimentObservation> = Vec::new();
    let mut rows_read = 0;
    let mut rows_skipped = 0;
    let mut rows_dropped = 0;

    for record in rdr.records() {
        let record = record.map_err(|error| csv_error(source_name, error))?;
        rows_read += 1;

        let raw_date = record.get(date_idx).unwrap_or("");
        let Some(date) = parse_date(raw_date) else {
            debug!(source = source_name, row = rows_read, value = raw_date, "unparseable date");
            rows_skipped += 1;
            continue;
        };

        let label = Sentiment::normalize(record.get(class_idx).unwrap_or(""));
        if drop_unclassified && !label.is_classified() {
            rows_dropped += 1;
            continue;
        }
        observations.push(Observation::new(date, label));
    }

    if rows_skipped > 0 {
        warn!(source = source_name, rows_skipped, "skipped sentiment rows with unparseable dates");
    }

    observations.sort_by_key(|o| o.key);
    let dataset_hash = dataset_hash(&observations);
    info!(
        source = source_name,
        rows_read,
        observations = observations.len(),
        rows_dropped,
        "loaded sentiment series"
    );

    Ok(Loaded {
        source_name: source_name.to_string(),
        observations,
        rows_read,
        rows_skipped,
        rows_dropped,
        dataset_hash,
    })
}

/// Parse `YYYY-MM-DD`, tolerating a trailing time part.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

// ─── Trades ─────────────────────────────────────────────────────────

/// Load the trade history file named in `source`.
pub fn load_trades(
    source: &TradeSource,
) -> Result<Loaded<NaiveDateTime, TradeOutcome>, LoadError> {
    let source_name = source.path.display().to_string();
    let file = open(&source.path)?;
    read_trades(file, &source_name, source)
}

/// Read a trade history CSV from any reader.
///
/// Column names and the timestamp format come from `source`; its `path` is
/// ignored. A missing or unparseable PnL is a loss.
///
/// Rows whose timestamp does not parse are skipped and counted in
/// `rows_skipped`. A skipped row no longer separates its neighbours, so a
/// win on either side of a skipped loss joins one win streak.
pub fn read_trades<R: Read>(
    reader: R,
    source_name: &str,
    source: &TradeSource,
) -> Result<Loaded<NaiveDateTime, TradeOutcome>, LoadError> {
    let mut rdr = csv_reader(reader);
    let headers = headers(&mut rdr, source_name)?;
    let ts_idx = find_column(&headers, &source.timestamp_column, source_name)?;
    let pnl_idx = find_column(&headers, &source.pnl_column, source_name)?;

    let mut observations: Vec<TradeObservation> = Vec::new();
    let mut rows_read = 0;
    let mut rows_skipped = 0;

    for record in rdr.records() {
        let record = record.map_err(|error| csv_error(source_name, error))?;
        rows_read += 1;

        let raw_ts = record.get(ts_idx).unwrap_or("");
        let Some(ts) = parse_timestamp(raw_ts, &source.timestamp_format) else {
            debug!(source = source_name, row = rows_read, value = raw_ts, "unparseable timestamp");
            rows_skipped += 1;
            continue;
        };

        let pnl = record.get(pnl_idx).and_then(parse_number);
        observations.push(Observation::new(ts, TradeOutcome::from_pnl(pnl)));
    }

    if rows_skipped > 0 {
        warn!(source = source_name, rows_skipped, "skipped trade rows with unparseable timestamps");
    }

    // stable: fills sharing a timestamp keep file order
    observations.sort_by_key(|o| o.key);
    let dataset_hash = dataset_hash(&observations);
    info!(
        source = source_name,
        rows_read,
        observations = observations.len(),
        "loaded trade history"
    );

    Ok(Loaded {
        source_name: source_name.to_string(),
        observations,
        rows_read,
        rows_skipped,
        rows_dropped: 0,
        dataset_hash,
    })
}

/// Parse a trade timestamp.
///
/// Tries `format` first, then `%Y-%m-%d %H:%M:%S`, RFC 3339, and finally a
/// bare integer as epoch milliseconds.
pub fn parse_timestamp(raw: &str, format: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
        return Some(ts);
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(ts);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }
    raw.parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.naive_utc())
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

// ─── Helpers ────────────────────────────────────────────────────────

fn open(path: &Path) -> Result<std::fs::File, LoadError> {
    std::fs::File::open(path).map_err(|error| LoadError::Open {
        source_name: path.display().to_string(),
        error,
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

fn headers<R: Read>(rdr: &mut csv::Reader<R>, source_name: &str) -> Result<StringRecord, LoadError> {
    rdr.headers()
        .cloned()
        .map_err(|error| csv_error(source_name, error))
}

fn csv_error(source_name: &str, error: csv::Error) -> LoadError {
    LoadError::Csv {
        source_name: source_name.to_string(),
        error,
    }
}

/// Exact (trimmed) match first, then case-insensitive.
fn find_column(headers: &StringRecord, column: &str, source_name: &str) -> Result<usize, LoadError> {
    let wanted = column.trim();
    headers
        .iter()
        .position(|h| h.trim() == wanted)
        .or_else(|| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(wanted))
        })
        .ok_or_else(|| LoadError::MissingColumn {
            source_name: source_name.to_string(),
            column: wanted.to_string(),
        })
}

/// Deterministic BLAKE3 hash over the ordered observation series.
fn dataset_hash<K: Display, L: Display>(observations: &[Observation<K, L>]) -> String {
    let mut hasher = blake3::Hasher::new();
    for obs in observations {
        hasher.update(obs.key.to_string().as_bytes());
        hasher.update(b"\x1f");
        hasher.update(obs.label.to_string().as_bytes());
        hasher.update(b"\n");
    }
    hasher.finalize().to_hex().to_string()
}
