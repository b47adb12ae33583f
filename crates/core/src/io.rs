//! Filesystem helpers shared by the loaders and the report writer.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::PerfdashError;

/// Read and deserialize one JSON file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, PerfdashError> {
    let content = fs::read_to_string(path).map_err(|source| PerfdashError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| PerfdashError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Expand a glob pattern into concrete file paths.
pub(crate) fn scan(pattern: &Path) -> Result<Vec<PathBuf>, PerfdashError> {
    let pattern = pattern.to_string_lossy().into_owned();
    let entries = glob::glob(&pattern).map_err(|source| PerfdashError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;
    entries
        .map(|entry| {
            entry.map_err(|source| PerfdashError::Scan {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

/// Serialize `document` and write it to `path` in one buffered write.
pub(crate) fn write_json<T: Serialize>(path: &Path, document: &T) -> Result<(), PerfdashError> {
    let json = serde_json::to_string(document).map_err(|source| PerfdashError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| PerfdashError::Write {
        path: path.to_path_buf(),
        source,
    })
}
