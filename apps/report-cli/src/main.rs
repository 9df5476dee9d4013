//! # tally-report binary
//!
//! ```text
//! tally-report sales.json                      # last 30 days, JSON
//! tally-report sales.json --period 7 --format text
//! tally-report - --start 2024-01-01 --end 2024-01-31 < sales.json
//! ```
//!
//! The export carries amounts in integer cents (`"total": 1999`).

use anyhow::Context;
use clap::Parser;
use tally_report::{run, Cli};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let rendered = run(&cli)
        .with_context(|| format!("Failed to build report from {}", cli.input.display()))?;
    println!("{}", rendered);

    Ok(())
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so stdout carries only the report. `RUST_LOG` wins
/// over `-v`.
fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn,tally_report=info",
        1 => "info,tally_report=debug",
        _ => "debug",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
