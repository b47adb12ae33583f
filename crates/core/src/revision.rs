//! Revision metadata discovery.
//!
//! Each revision that has benchmark data also carries a `commit.json`
//! file one directory level below the source root. Loading them up
//! front gives the pipeline the full set of revisions to scan for
//! estimates and the timestamps needed to order chart points.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::PerfdashError;
use crate::io::{read_json, scan};

/// Commit author as recorded in `commit.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    /// Author display name.
    pub name: String,
}

/// One source-control revision, read from `<source>/<dir>/commit.json`.
///
/// Immutable once loaded. All four fields are required; a file missing
/// any of them fails the run.
#[derive(Debug, Clone, Deserialize)]
pub struct Revision {
    /// Full commit hash.
    pub id: String,
    /// Commit time, seconds since the epoch.
    pub timestamp: i64,
    /// Commit message.
    pub message: String,
    /// Commit author.
    pub author: Author,
}

impl Revision {
    /// First 8 characters of the hash, used both for the estimate
    /// directory name and as the label in the output document.
    pub fn short_id(&self) -> &str {
        &self.id[..self.id.len().min(8)]
    }
}

/// Revisions keyed by full hash.
pub type RevisionMap = BTreeMap<String, Revision>;

/// Scan exactly one directory level of `source` for `commit.json` files
/// and build the revision map. Duplicate ids overwrite silently.
pub fn load_revisions(source: &Path) -> Result<RevisionMap, PerfdashError> {
    let pattern = source.join("*").join("commit.json");
    let mut revisions = RevisionMap::new();
    for path in scan(&pattern)? {
        let revision: Revision = read_json(&path)?;
        debug!(id = %revision.id, path = %path.display(), "loaded commit metadata");
        revisions.insert(revision.id.clone(), revision);
    }
    Ok(revisions)
}
