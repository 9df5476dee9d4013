//! # Report Configuration
//!
//! Configuration management for the reporting CLI.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --period 7, --start/--end, --format text, --strict                 │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     TALLY_PERIOD=7                                                     │
//! │     TALLY_MAX_TRANSACTIONS=50000                                       │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/tally/report.toml (Linux)                                │
//! │     ~/Library/Application Support/com.tally.tally/report.toml (macOS)  │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     Last 30 days, JSON output, 100,000 transaction cap                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # report.toml
//! [report]
//! period = "30"             # 1 | 7 | 30 | 90
//! # start_date = "2024-01-01"  # explicit window, overrides period
//! # end_date = "2024-01-31"
//! strict_validation = false
//! max_transactions = 100000
//!
//! [output]
//! format = "json"           # json | text
//! pretty = true
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tally_core::validation::validate_date;
use tally_core::ReportPeriod;
use tracing::{debug, info, warn};

use crate::error::{ReportError, ReportResult};

// =============================================================================
// Output Format
// =============================================================================

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// The `SalesReport` as JSON.
    #[default]
    Json,

    /// A short plain-text summary.
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" | "plain" => Ok(OutputFormat::Text),
            other => Err(ReportError::InvalidConfig(format!(
                "Unknown output format: '{}'. Valid options: json, text",
                other
            ))),
        }
    }
}

// =============================================================================
// Report Settings
// =============================================================================

/// Which sales to summarize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Dashboard period used when no explicit window is set.
    #[serde(default)]
    pub period: ReportPeriod,

    /// First day of an explicit window (`YYYY-MM-DD`).
    #[serde(default)]
    pub start_date: Option<String>,

    /// Last day of an explicit window (`YYYY-MM-DD`).
    #[serde(default)]
    pub end_date: Option<String>,

    /// Validate every sale before aggregating.
    #[serde(default)]
    pub strict_validation: bool,

    /// Refuse exports with more transactions than this.
    #[serde(default = "default_max_transactions")]
    pub max_transactions: usize,
}

fn default_max_transactions() -> usize {
    100_000
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            period: ReportPeriod::default(),
            start_date: None,
            end_date: None,
            strict_validation: false,
            max_transactions: default_max_transactions(),
        }
    }
}

// =============================================================================
// Output Settings
// =============================================================================

/// How to write the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,

    /// Indent JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            format: OutputFormat::default(),
            pretty: true,
        }
    }
}

// =============================================================================
// Report Window
// =============================================================================

/// The window a report covers, resolved from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportWindow {
    /// Both bounds given explicitly.
    Explicit { start: String, end: String },

    /// A dashboard period ending today.
    Period(ReportPeriod),
}

// =============================================================================
// Main Report Configuration
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub report: ReportSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

impl ReportConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (report.toml)
    /// 3. Environment variables
    ///
    /// Command-line flags are applied afterwards by the caller, which then
    /// calls [`ReportConfig::validate`].
    pub fn load(config_path: Option<PathBuf>) -> ReportResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading report config from file");
                let contents = std::fs::read_to_string(&path).map_err(|source| {
                    ReportError::ReadFailed {
                        path: path.clone(),
                        source,
                    }
                })?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());

        Ok(config)
    }

    /// Parses a TOML document.
    pub fn from_toml_str(contents: &str) -> ReportResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ReportResult<()> {
        if self.report.max_transactions == 0 {
            return Err(ReportError::InvalidConfig(
                "max_transactions must be greater than 0".into(),
            ));
        }

        match (&self.report.start_date, &self.report.end_date) {
            (Some(start), Some(end)) => {
                validate_date(start)?;
                validate_date(end)?;
            }
            (None, None) => {}
            _ => {
                return Err(ReportError::InvalidConfig(
                    "start_date and end_date must be set together".into(),
                ));
            }
        }

        Ok(())
    }

    /// Applies `TALLY_*` overrides, reading variables through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(period) = lookup("TALLY_PERIOD") {
            match period.parse() {
                Ok(parsed) => {
                    debug!(period = %period, "Overriding period from environment");
                    self.report.period = parsed;
                }
                Err(e) => warn!(period = %period, error = %e, "Ignoring TALLY_PERIOD"),
            }
        }

        if let Some(start) = lookup("TALLY_START_DATE") {
            self.report.start_date = Some(start);
        }

        if let Some(end) = lookup("TALLY_END_DATE") {
            self.report.end_date = Some(end);
        }

        if let Some(strict) = lookup("TALLY_STRICT_VALIDATION") {
            match strict.parse::<bool>() {
                Ok(flag) => self.report.strict_validation = flag,
                Err(_) => warn!(value = %strict, "Ignoring TALLY_STRICT_VALIDATION"),
            }
        }

        if let Some(max) = lookup("TALLY_MAX_TRANSACTIONS") {
            match max.parse::<usize>() {
                Ok(parsed) => {
                    debug!(max = parsed, "Overriding transaction cap from environment");
                    self.report.max_transactions = parsed;
                }
                Err(_) => warn!(value = %max, "Ignoring TALLY_MAX_TRANSACTIONS"),
            }
        }

        if let Some(format) = lookup("TALLY_OUTPUT_FORMAT") {
            match format.parse() {
                Ok(parsed) => self.output.format = parsed,
                Err(e) => warn!(format = %format, error = %e, "Ignoring TALLY_OUTPUT_FORMAT"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tally", "tally")
            .map(|dirs| dirs.config_dir().join("report.toml"))
    }

    /// The window this configuration selects.
    ///
    /// An explicit start/end pair wins over the period.
    pub fn window(&self) -> ReportWindow {
        match (&self.report.start_date, &self.report.end_date) {
            (Some(start), Some(end)) => ReportWindow::Explicit {
                start: start.clone(),
                end: end.clone(),
            },
            _ => ReportWindow::Period(self.report.period),
        }
    }
}
