//! Reporting and export: JSON, CSV, Markdown, and plain-text rendering.
//!
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: the streak tape (`label,start,end,length`)
//! - **Markdown**: human-readable single-dataset report
//! - **Text**: compact terminal summary for the CLI
//!
//! Unknown (newer) schema versions are rejected on load.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::report::{StreakReport, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `StreakReport` to pretty JSON.
pub fn export_json(report: &StreakReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize StreakReport to JSON")
}

/// Deserialize a `StreakReport` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<StreakReport> {
    let report: StreakReport =
        serde_json::from_str(json).context("failed to deserialize StreakReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export every streak, in input order.
pub fn export_streaks_csv(report: &StreakReport) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["label", "start", "end", "length"])?;
    for s in &report.streaks {
        wtr.write_record([&s.label, &s.start, &s.end, &s.length.to_string()])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Markdown ───────────────────────────────────────────────────────

pub fn render_markdown(report: &StreakReport) -> String {
    let mut md = format!(
        "# StreakLab Report: {}\n\n\
Source: `{}`\n\n\
Dataset hash: `{}`\n\n\
## Summary\n\
- Observations: {}\n\
- Rows skipped: {}\n\
- Rows dropped: {}\n\
- Streaks: {}\n",
        report.dataset,
        report.source,
        report.dataset_hash,
        report.observations,
        report.rows_skipped,
        report.rows_dropped,
        report.streak_count(),
    );

    md.push_str("\n## Longest Streaks\n\n");
    md.push_str("| Label | Longest | Start | End | Streaks | Mean Length |\n");
    md.push_str("|-------|---------|-------|-----|---------|-------------|\n");
    for row in &report.labels {
        match (&row.longest, &row.summary) {
            (Some(longest), Some(summary)) => {
                let _ = writeln!(
                    md,
                    "| {} | {} | {} | {} | {} | {:.2} |",
                    row.label,
                    longest.length,
                    longest.start,
                    longest.end,
                    summary.streak_count,
                    summary.mean_length
                );
            }
            _ => {
                let _ = writeln!(md, "| {} | none | - | - | 0 | - |", row.label);
            }
        }
    }

    let _ = write!(
        md,
        "\n## Extreme Streaks (>= {} observations)\n\n",
        report.min_length
    );
    if report.extreme_streaks.is_empty() {
        md.push_str("_None._\n");
    } else {
        md.push_str("| Label | Start | End | Length |\n");
        md.push_str("|-------|-------|-----|--------|\n");
        for s in &report.extreme_streaks {
            let _ = writeln!(md, "| {} | {} | {} | {} |", s.label, s.start, s.end, s.length);
        }
    }

    if !report.transitions.is_empty() {
        md.push_str("\n## Transitions\n\n");
        md.push_str("| From | To | Count | Probability |\n");
        md.push_str("|------|----|-------|-------------|\n");
        for t in &report.transitions {
            let _ = writeln!(
                md,
                "| {} | {} | {} | {} |",
                t.from,
                t.to,
                t.count,
                fmt_probability(t.probability)
            );
        }
    }

    if !report.length_distribution.is_empty() {
        md.push_str("\n## Streak Length Distribution\n\n");
        md.push_str("| Length | Streaks |\n");
        md.push_str("|--------|---------|\n");
        for (length, count) in &report.length_distribution {
            let _ = writeln!(md, "| {length} | {count} |");
        }
    }

    md
}

// ─── Text ───────────────────────────────────────────────────────────

/// Compact summary for terminal output.
pub fn render_summary(report: &StreakReport) -> String {
    let mut out = format!(
        "{} ({}): {} observations, {} streaks\n",
        report.dataset,
        report.source,
        report.observations,
        report.streak_count()
    );
    for row in &report.labels {
        match &row.longest {
            Some(s) => {
                let _ = writeln!(
                    out,
                    "  Longest {:<13} {:>5}  ({} .. {})",
                    row.label, s.length, s.start, s.end
                );
            }
            None => {
                let _ = writeln!(out, "  Longest {:<13}  none", row.label);
            }
        }
    }
    let _ = writeln!(
        out,
        "  Streaks >= {}: {}",
        report.min_length,
        report.extreme_streaks.len()
    );
    for s in report.extreme_streaks.iter().take(10) {
        let _ = writeln!(
            out,
            "    {:<13} {:>5}  ({} .. {})",
            s.label, s.length, s.start, s.end
        );
    }
    if report.extreme_streaks.len() > 10 {
        let _ = writeln!(out, "    ... {} more", report.extreme_streaks.len() - 10);
    }
    out
}

fn fmt_probability(p: Option<f64>) -> String {
    p.map(|p| format!("{p:.2}")).unwrap_or_else(|| "-".into())
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for one report.
///
/// Creates `{dataset}_{timestamp}/` under `output_dir` containing
/// `report.json`, `streaks.csv`, and `report.md`. Returns the directory.
pub fn save_artifacts(report: &StreakReport, output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!(
        "{}_{}",
        report.dataset,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    std::fs::write(run_dir.join("report.json"), export_json(report)?)?;
    std::fs::write(run_dir.join("streaks.csv"), export_streaks_csv(report)?)?;
    std::fs::write(run_dir.join("report.md"), render_markdown(report))?;

    Ok(run_dir)
}
