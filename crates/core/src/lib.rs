//! Benchmark history aggregation for the perfdash dashboard.
//!
//! This crate turns a directory of per-revision Criterion reports into
//! a single JSON document the dashboard front end renders directly. The
//! pipeline is a linear, single-threaded batch transform:
//!
//! 1. [`revision`] scans `<source>/*/commit.json` for commit metadata.
//! 2. [`estimates`] scans `<source>/commit-<short8>/**` for per-benchmark
//!    medians and recovers (group, chart, line) from the path layout.
//! 3. [`units`] picks one display unit per chart from the pointset.
//! 4. [`report`] reshapes everything into the transport format and the
//!    document is written out in one buffered write.
//!
//! Any IO or parse failure aborts the run; the tool is meant to be
//! re-invoked by its caller (typically a CI job) on failure.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! let report = perfdash_core::generate(Path::new("data"), Path::new("perf.json"))?;
//! println!("{} groups aggregated", report.perf_groups.len());
//! # Ok::<(), perfdash_core::PerfdashError>(())
//! ```

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod error;
pub mod estimates;
mod io;
pub mod report;
pub mod revision;
pub mod units;

pub use error::PerfdashError;
pub use report::Report;

use std::path::Path;

use tracing::info;

/// Run the whole pipeline: load revisions and estimates from `source`,
/// build the dashboard document, and write it to `output`.
///
/// # Errors
///
/// Returns the first loader, parse, or write failure; nothing is
/// skipped or retried.
pub fn generate(source: &Path, output: &Path) -> Result<Report, PerfdashError> {
    let revisions = revision::load_revisions(source)?;
    info!(revisions = revisions.len(), "loaded commit metadata");

    let estimates = estimates::load_estimates(source, &revisions)?;
    if estimates.is_empty() {
        info!("no estimates found under {}", source.display());
    }

    let report = Report::build(&revisions, &estimates);
    io::write_json(output, &report)?;
    info!(
        groups = report.perf_groups.len(),
        path = %output.display(),
        "wrote dashboard document"
    );
    Ok(report)
}
