//! Command-line interface for the perfdash aggregator.
//!
//! One invocation reads a source directory of per-revision Criterion
//! reports and writes one dashboard JSON document. There are no
//! subcommands and no optional flags; exit status is the only contract.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Aggregate Criterion benchmark history into a dashboard JSON document.
#[derive(Parser, Debug)]
#[command(name = "perfdash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output file to be written in JSON format.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Input directory with per-revision Criterion reports.
    #[arg(short, long)]
    pub source: PathBuf,
}

/// Parse arguments and run the aggregation pipeline.
///
/// # Errors
///
/// Returns the first pipeline failure; clap itself handles argument
/// errors by printing usage and exiting non-zero.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let report = perfdash_core::generate(&cli.source, &cli.output)
        .with_context(|| format!("aggregating {}", cli.source.display()))?;

    println!(
        "Aggregated {} groups across {} revisions into {}",
        report.perf_groups.len(),
        report.commit_metadata.len(),
        cli.output.display()
    );

    Ok(())
}
