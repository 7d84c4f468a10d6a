//! StreakLab CLI: streak analysis of sentiment and trade datasets.
//!
//! Commands:
//! - `sentiment`: streaks of Fear / Neutral / Greed days in a Fear & Greed CSV
//! - `trades`: win/loss streaks in a trade history CSV
//! - `run`: analyze both datasets from a TOML config file
//! - `init-config`: write a default config file

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use streaklab_runner::{
    analyze_sentiment, analyze_trades, export_json, render_markdown, render_summary, run_config,
    save_artifacts, ReportConfig, SentimentSource, StreakLabConfig, StreakReport, TradeSource,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "streaklab",
    about = "StreakLab CLI: streak detection over sentiment and trade history"
)]
struct Cli {
    /// Log at debug level (overrides STREAKLAB_LOG).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Markdown,
}

#[derive(Subcommand)]
enum Commands {
    /// Streaks of Fear / Neutral / Greed days.
    Sentiment {
        /// Fear & Greed index CSV (columns: date, classification).
        #[arg(long, default_value = "fear_greed_index.csv")]
        input: PathBuf,

        /// Report streaks at least this long.
        #[arg(long, default_value_t = 5)]
        min_length: usize,

        /// Drop rows whose classification is not Fear, Neutral or Greed.
        #[arg(long, default_value_t = false)]
        drop_unclassified: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Also write report.json, streaks.csv and report.md here.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Win/loss streaks in a trade history.
    Trades {
        /// Trade history CSV.
        #[arg(long, default_value = "historical_data.csv")]
        input: PathBuf,

        /// Report streaks at least this long.
        #[arg(long, default_value_t = 5)]
        min_length: usize,

        /// Timestamp column name.
        #[arg(long, default_value = "Timestamp IST")]
        timestamp_column: String,

        /// Closed PnL column name.
        #[arg(long, default_value = "Closed PnL")]
        pnl_column: String,

        /// chrono format of the timestamp column.
        #[arg(long, default_value = "%d-%m-%Y %H:%M")]
        timestamp_format: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Also write report.json, streaks.csv and report.md here.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Analyze both datasets from a TOML config file.
    Run {
        #[arg(long, default_value = "streaklab.toml")]
        config: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Write the default config file.
    InitConfig {
        #[arg(long, default_value = "streaklab.toml")]
        path: PathBuf,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Sentiment {
            input,
            min_length,
            drop_unclassified,
            format,
            output_dir,
        } => {
            let source = SentimentSource {
                path: input,
                drop_unclassified,
            };
            let report = analyze_sentiment(&source, &report_config(min_length)?)?;
            emit(&[report], format, output_dir.as_deref())
        }
        Commands::Trades {
            input,
            min_length,
            timestamp_column,
            pnl_column,
            timestamp_format,
            format,
            output_dir,
        } => {
            let source = TradeSource {
                path: input,
                timestamp_column,
                pnl_column,
                timestamp_format,
            };
            let report = analyze_trades(&source, &report_config(min_length)?)?;
            emit(&[report], format, output_dir.as_deref())
        }
        Commands::Run {
            config,
            format,
            output_dir,
        } => run_config_cmd(&config, format, output_dir.as_deref()),
        Commands::InitConfig { path, force } => run_init_config(&path, force),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("STREAKLAB_LOG").unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn report_config(min_length: usize) -> Result<ReportConfig> {
    if min_length == 0 {
        bail!("--min-length must be at least 1");
    }
    Ok(ReportConfig { min_length })
}

fn run_config_cmd(path: &Path, format: OutputFormat, output_dir: Option<&Path>) -> Result<()> {
    let config = StreakLabConfig::from_file(path)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    let outcome = run_config(&config)?;
    for (dataset, err) in &outcome.failures {
        eprintln!("Skipped {dataset}: {err}");
    }
    emit(&outcome.reports, format, output_dir)
}

fn run_init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    let text = StreakLabConfig::default().to_toml()?;
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn emit(reports: &[StreakReport], format: OutputFormat, output_dir: Option<&Path>) -> Result<()> {
    match format {
        OutputFormat::Table => {
            for report in reports {
                println!("{}", render_summary(report));
            }
        }
        OutputFormat::Json => {
            let json = if let [single] = reports {
                export_json(single)?
            } else {
                serde_json::to_string_pretty(reports)
                    .context("failed to serialize reports to JSON")?
            };
            println!("{json}");
        }
        OutputFormat::Markdown => {
            for report in reports {
                println!("{}", render_markdown(report));
            }
        }
    }

    if let Some(dir) = output_dir {
        for report in reports {
            let run_dir = save_artifacts(report, dir)?;
            tracing::info!(dataset = %report.dataset, dir = %run_dir.display(), "saved artifacts");
        }
    }
    Ok(())
}
