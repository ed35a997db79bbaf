#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a lane defence scenario headlessly.

mod runner;
mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::scenario::Scenario;

/// Runs a lane defence scenario and prints the resulting statistics as JSON.
#[derive(Debug, Parser)]
#[command(name = "lane-defence")]
#[command(about = "Headless lane defence simulation")]
struct Args {
    /// Scenario file to load; the built-in scenario is used when omitted.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Overrides the number of ticks to simulate.
    #[arg(long)]
    ticks: Option<u32>,

    /// Overrides the tick length in milliseconds.
    #[arg(long)]
    dt_ms: Option<u64>,

    /// Enables debug logging when RUST_LOG is not set.
    #[arg(long, short)]
    verbose: bool,
}

/// Entry point for the lane defence command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut scenario = match &args.scenario {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("failed to load scenario from {}", path.display()))?,
        None => Scenario::builtin(),
    };
    if let Some(ticks) = args.ticks {
        scenario.ticks = ticks;
    }
    if let Some(dt_ms) = args.dt_ms {
        anyhow::ensure!(dt_ms > 0, "--dt-ms must be greater than zero");
        scenario.dt_ms = dt_ms;
    }

    let summary = runner::run(&scenario);
    let json = serde_json::to_string_pretty(&summary).context("failed to encode summary")?;
    println!("{json}");
    Ok(())
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}
