//! Estimate discovery and the three-level estimate table.
//!
//! Criterion writes one `estimates.json` per benchmark run under
//! `[<group>/]<chart>/<line>/new/`. The path segments carry the
//! coordinates; the file itself only contributes the median.

use std::collections::BTreeMap;
use std::path::{Component, Path};

use serde::Deserialize;
use tracing::debug;

use crate::error::PerfdashError;
use crate::io::{read_json, scan};
use crate::revision::RevisionMap;

/// Group key for charts discovered without a leading group segment.
/// The empty string sorts before every named group.
pub const UNGROUPED: &str = "";

/// Per-revision medians for one line, nanoseconds, keyed by full hash.
pub type LineSeries = BTreeMap<String, f64>;

/// Lines of one chart, keyed by line name.
pub type LineMap = BTreeMap<String, LineSeries>;

/// Charts of one group, keyed by chart name.
pub type ChartMap = BTreeMap<String, LineMap>;

/// The (group, chart, line) coordinates recovered from an estimate path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchCoords {
    /// Thematic grouping, [`UNGROUPED`] when the path had no group segment.
    pub group: String,
    /// The chart the measurement belongs to.
    pub chart: String,
    /// The time series within that chart.
    pub line: String,
}

/// Three-level estimate table: group → chart → line → per-revision medians.
///
/// At most one measurement exists per (group, chart, line, revision); a
/// later insert for the same quadruple overwrites the earlier one.
#[derive(Debug, Default)]
pub struct EstimateTable {
    groups: BTreeMap<String, ChartMap>,
}

impl EstimateTable {
    /// Record one median for the given coordinates and revision.
    pub fn insert(&mut self, coords: &BenchCoords, revision_id: &str, median: f64) {
        self.groups
            .entry(coords.group.clone())
            .or_default()
            .entry(coords.chart.clone())
            .or_default()
            .entry(coords.line.clone())
            .or_default()
            .insert(revision_id.to_string(), median);
    }

    /// Iterate groups in lexicographic order, [`UNGROUPED`] first.
    pub fn groups(&self) -> impl Iterator<Item = (&String, &ChartMap)> {
        self.groups.iter()
    }

    /// True when no estimate was discovered.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Split an estimate path, relative to a revision's base directory, into
/// its coordinates.
///
/// After stripping the fixed `new/estimates.json` suffix the segment
/// count is decisive: two segments are (chart, line) with no group,
/// three are (group, chart, line). Anything else does not match the
/// expected layout and fails the run.
pub fn parse_estimate_path(relative: &Path) -> Result<BenchCoords, PerfdashError> {
    let segments: Vec<&str> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => segment.to_str(),
            _ => None,
        })
        .collect();

    let mismatch = || PerfdashError::PathPattern {
        path: relative.to_path_buf(),
    };

    let coords = segments
        .strip_suffix(["new", "estimates.json"].as_slice())
        .ok_or_else(mismatch)?;

    match coords {
        [chart, line] => Ok(BenchCoords {
            group: UNGROUPED.to_string(),
            chart: (*chart).to_string(),
            line: (*line).to_string(),
        }),
        [group, chart, line] => Ok(BenchCoords {
            group: (*group).to_string(),
            chart: (*chart).to_string(),
            line: (*line).to_string(),
        }),
        _ => Err(mismatch()),
    }
}

#[derive(Debug, Deserialize)]
struct EstimateFile {
    median: Estimate,
}

#[derive(Debug, Deserialize)]
struct Estimate {
    point_estimate: f64,
}

/// For each known revision, recursively scan `<source>/commit-<short8>`
/// for `new/estimates.json` files and record one median per quadruple.
pub fn load_estimates(
    source: &Path,
    revisions: &RevisionMap,
) -> Result<EstimateTable, PerfdashError> {
    let mut table = EstimateTable::default();
    for revision in revisions.values() {
        let base = source.join(format!("commit-{}", revision.short_id()));
        let pattern = base.join("**").join("new").join("estimates.json");
        for path in scan(&pattern)? {
            let relative = path.strip_prefix(&base).map_err(|_| PerfdashError::PathPattern {
                path: path.clone(),
            })?;
            let coords = parse_estimate_path(relative)?;
            let estimate: EstimateFile = read_json(&path)?;
            debug!(
                group = %coords.group,
                chart = %coords.chart,
                line = %coords.line,
                revision = %revision.short_id(),
                median = estimate.median.point_estimate,
                "loaded estimate"
            );
            table.insert(&coords, &revision.id, estimate.median.point_estimate);
        }
    }
    Ok(table)
}
