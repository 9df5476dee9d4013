//! # tally-report
//!
//! Command-line front end for `tally-core`: reads a sales export, resolves
//! the reporting window from layered configuration, and prints a
//! [`SalesReport`].
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  report.toml ─┐                                                         │
//! │  TALLY_* env ─┼──► ReportConfig ──► validate                            │
//! │  CLI flags ───┘         │                                               │
//! │                         ▼                                               │
//! │  sales.json ──► load_sales ──► enforce_limit ──► (strict) validate_sales│
//! │                                                      │                  │
//! │                                                      ▼                  │
//! │                          generate_report / report_for_period            │
//! │                                                      │                  │
//! │                                                      ▼                  │
//! │                                              render (json | text)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod output;

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::Parser;
use tally_core::period::CUSTOM_PERIOD_LABEL;
use tally_core::validation::validate_sales;
use tally_core::{generate_report, report_for_period, ReportPeriod, Sale, SalesReport};
use tracing::{debug, info};

pub use config::{OutputFormat, ReportConfig, ReportWindow};
pub use error::{ReportError, ReportResult};

// =============================================================================
// Command Line
// =============================================================================

/// Summarize a sales export over a reporting window.
#[derive(Debug, Parser)]
#[command(name = "tally-report", version, about)]
pub struct Cli {
    /// Sales export (JSON, amounts in integer cents). Use `-` for stdin.
    pub input: PathBuf,

    /// Config file (defaults to the platform config dir's tally/report.toml).
    #[arg(long, env = "TALLY_CONFIG")]
    pub config: Option<PathBuf>,

    /// First day of an explicit window (YYYY-MM-DD).
    #[arg(long, requires = "end", conflicts_with = "period")]
    pub start: Option<String>,

    /// Last day of an explicit window (YYYY-MM-DD).
    #[arg(long, requires = "start")]
    pub end: Option<String>,

    /// Dashboard period: 1, 7, 30 or 90 days ending today.
    #[arg(long)]
    pub period: Option<ReportPeriod>,

    /// Treat this date as today when resolving a period.
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Output format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Single-line JSON.
    #[arg(long)]
    pub compact: bool,

    /// Validate every sale before aggregating.
    #[arg(long)]
    pub strict: bool,

    /// More log output (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Applies command-line flags on top of `config`.
    pub fn apply_to(&self, config: &mut ReportConfig) {
        if let Some(period) = self.period {
            config.report.period = period;
            config.report.start_date = None;
            config.report.end_date = None;
        }

        if let (Some(start), Some(end)) = (&self.start, &self.end) {
            config.report.start_date = Some(start.clone());
            config.report.end_date = Some(end.clone());
        }

        if let Some(format) = self.format {
            config.output.format = format;
        }

        if self.compact {
            config.output.pretty = false;
        }

        if self.strict {
            config.report.strict_validation = true;
        }
    }
}

// =============================================================================
// Entry Points
// =============================================================================

/// Runs the CLI and returns the rendered report.
pub fn run(cli: &Cli) -> ReportResult<String> {
    let mut config = ReportConfig::load(cli.config.clone())?;
    cli.apply_to(&mut config);
    config.validate()?;
    debug!(?config, "Resolved configuration");

    let sales = input::load_sales(&cli.input)?;
    let today = cli.today.unwrap_or_else(|| Utc::now().date_naive());

    let report = build_report(&config, &sales, today)?;
    output::render(&report, config.output.format, config.output.pretty)
}

/// Builds the report `config` asks for.
///
/// `today` anchors period windows; explicit windows ignore it.
pub fn build_report(
    config: &ReportConfig,
    sales: &[Sale],
    today: NaiveDate,
) -> ReportResult<SalesReport> {
    input::enforce_limit(sales, config.report.max_transactions)?;

    if config.report.strict_validation {
        validate_sales(sales)?;
        debug!(count = sales.len(), "All sales passed validation");
    }

    let report = match config.window() {
        ReportWindow::Explicit { start, end } => {
            generate_report(sales, &start, &end, CUSTOM_PERIOD_LABEL)?
        }
        ReportWindow::Period(period) => report_for_period(sales, period, today),
    };

    info!(
        period = %report.period_label,
        start = %report.start_date,
        end = %report.end_date,
        transactions = report.summary.total_transactions,
        total_sales = %report.summary.total_sales,
        "Report generated"
    );

    Ok(report)
}
