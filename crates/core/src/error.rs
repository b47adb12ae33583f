//! Error types for the aggregation pipeline.
//!
//! Every failure aborts the run; the tool is re-run by its caller on
//! failure, so there is no skip-and-continue path anywhere.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading inputs or writing the dashboard document.
#[derive(Debug, Error)]
pub enum PerfdashError {
    /// A commit or estimate file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A file held malformed JSON or was missing a required field.
    #[error("malformed JSON in {path}: {source}")]
    Json {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// An estimate file sat at a path that does not match the expected
    /// `[group/]chart/line/new/estimates.json` layout.
    #[error("estimate path {path} does not match [group/]chart/line/new/estimates.json")]
    PathPattern {
        /// Path relative to the revision's base directory.
        path: PathBuf,
    },

    /// A scan pattern could not be compiled.
    #[error("invalid scan pattern {pattern}: {source}")]
    Pattern {
        /// The offending glob pattern.
        pattern: String,
        /// Underlying pattern error.
        #[source]
        source: glob::PatternError,
    },

    /// A directory entry could not be enumerated during a scan.
    #[error("failed to scan {pattern}: {source}")]
    Scan {
        /// The glob pattern being expanded.
        pattern: String,
        /// Underlying glob error.
        #[source]
        source: glob::GlobError,
    },

    /// The output document could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Path of the output file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}
