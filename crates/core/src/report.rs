//! Reshapes loaded revisions and estimates into the dashboard transport
//! format.
//!
//! The output trades a little redundancy for a shape the front end can
//! render without further joins: per chart, a sorted legend (`sets`)
//! whose order defines the index positions of every per-revision value
//! array, and per revision one `points` entry holding the scaled values
//! of the lines that measured it.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;

use crate::estimates::{EstimateTable, LineMap};
use crate::revision::{Revision, RevisionMap};
use crate::units::normalized_unit;

/// One line's legend entry; its index aligns with [`ChartPoint::data`].
#[derive(Debug, Serialize)]
pub struct ChartSet {
    /// Line name.
    pub label: String,
}

/// Scaled measurements of one revision for one chart.
///
/// `data` holds values in legend order but only for the lines that have
/// a measurement for this revision, so it may be shorter than `sets`.
#[derive(Debug, Serialize)]
pub struct ChartPoint {
    /// 8-character short revision id.
    pub label: String,
    /// Measurements divided by the chart's unit divisor.
    pub data: Vec<f64>,
}

/// One graph: a legend plus time-ordered points in a single unit.
#[derive(Debug, Serialize)]
pub struct Chart {
    /// Chart name.
    pub name: String,
    /// Display label of the unit shared by all values in the chart.
    pub units: String,
    /// Legend entries in lexicographic line order.
    pub sets: Vec<ChartSet>,
    /// Points in ascending timestamp order; revisions without any
    /// measurement for this chart are skipped, not padded.
    pub points: Vec<ChartPoint>,
}

/// Charts sharing a thematic grouping.
#[derive(Debug, Serialize)]
pub struct PerfGroup {
    /// Group name, empty for ungrouped charts.
    pub name: String,
    /// Charts in lexicographic name order.
    pub charts: Vec<Chart>,
}

/// Commit details shown alongside a chart point.
#[derive(Debug, Serialize)]
pub struct CommitMetadata {
    /// Commit message.
    pub message: String,
    /// Commit time, seconds since the epoch.
    pub timestamp: i64,
    /// Author display name.
    pub author: String,
}

/// The complete dashboard document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Wall-clock time of this aggregation run, seconds since the epoch.
    pub last_update: i64,
    /// Groups in lexicographic name order, the unnamed group first.
    pub perf_groups: Vec<PerfGroup>,
    /// Commit details keyed by 8-character short id.
    pub commit_metadata: BTreeMap<String, CommitMetadata>,
}

impl Report {
    /// Assemble the document from loaded inputs.
    ///
    /// `lastUpdate` is taken from the wall clock here; everything else
    /// is a pure function of the inputs, ordered deterministically.
    pub fn build(revisions: &RevisionMap, estimates: &EstimateTable) -> Report {
        // Global revision order: ascending timestamp, ties broken by id.
        let mut time_sorted: Vec<&Revision> = revisions.values().collect();
        time_sorted.sort_by(|a, b| (a.timestamp, &a.id).cmp(&(b.timestamp, &b.id)));

        let perf_groups = estimates
            .groups()
            .map(|(name, charts)| PerfGroup {
                name: name.clone(),
                charts: charts
                    .iter()
                    .map(|(name, lines)| build_chart(name, lines, &time_sorted))
                    .collect(),
            })
            .collect();

        let commit_metadata = time_sorted
            .iter()
            .map(|revision| {
                (
                    revision.short_id().to_string(),
                    CommitMetadata {
                        message: revision.message.clone(),
                        timestamp: revision.timestamp,
                        author: revision.author.name.clone(),
                    },
                )
            })
            .collect();

        Report {
            last_update: Utc::now().timestamp(),
            perf_groups,
            commit_metadata,
        }
    }
}

fn build_chart(name: &str, lines: &LineMap, time_sorted: &[&Revision]) -> Chart {
    let sets = lines
        .keys()
        .map(|line| ChartSet { label: line.clone() })
        .collect();

    // Per-revision value vectors in legend order. A line without data
    // for a revision contributes nothing, leaving a partial row.
    let mut pointset: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for series in lines.values() {
        for (revision_id, &median) in series {
            pointset.entry(revision_id.as_str()).or_default().push(median);
        }
    }

    let unit = normalized_unit(pointset.values().flatten().copied());

    let points = time_sorted
        .iter()
        .filter_map(|revision| {
            let values = pointset.get(revision.id.as_str())?;
            if values.is_empty() {
                return None;
            }
            Some(ChartPoint {
                label: revision.short_id().to_string(),
                data: values.iter().map(|value| value / unit.divisor).collect(),
            })
        })
        .collect();

    Chart {
        name: name.to_string(),
        units: unit.label.to_string(),
        sets,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimates::{BenchCoords, UNGROUPED};

    fn revision(id: &str, timestamp: i64) -> Revision {
        serde_json::from_str(&format!(
            r#"{{"id": "{id}", "timestamp": {timestamp}, "message": "m {id}", "author": {{"name": "dev"}}}}"#
        ))
        .unwrap()
    }

    fn revision_map(revisions: &[(&str, i64)]) -> RevisionMap {
        revisions
            .iter()
            .map(|&(id, ts)| (id.to_string(), revision(id, ts)))
            .collect()
    }

    fn insert(table: &mut EstimateTable, group: &str, chart: &str, line: &str, rev: &str, ns: f64) {
        table.insert(
            &BenchCoords {
                group: group.to_string(),
                chart: chart.to_string(),
                line: line.to_string(),
            },
            rev,
            ns,
        );
    }

    #[test]
    fn two_revision_round_trip() {
        let revisions = revision_map(&[("aaaaaaaa1111", 100), ("bbbbbbbb2222", 200)]);
        let mut estimates = EstimateTable::default();
        insert(&mut estimates, UNGROUPED, "bench", "x", "aaaaaaaa1111", 2e9);
        insert(&mut estimates, UNGROUPED, "bench", "x", "bbbbbbbb2222", 1.5e9);
        insert(&mut estimates, UNGROUPED, "bench", "y", "bbbbbbbb2222", 1e9);

        let report = Report::build(&revisions, &estimates);

        assert_eq!(report.perf_groups.len(), 1);
        assert_eq!(report.perf_groups[0].name, "");
        let chart = &report.perf_groups[0].charts[0];
        assert_eq!(chart.name, "bench");
        // min is 1e9, which the seconds divisor does not strictly
        // undercut, so the chart lands on millis.
        assert_eq!(chart.units, "millis (ms)");

        let set_labels: Vec<&str> = chart.sets.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(set_labels, ["x", "y"]);

        assert_eq!(chart.points.len(), 2);
        assert_eq!(chart.points[0].label, "aaaaaaaa");
        assert_eq!(chart.points[0].data, [2000.0]);
        assert_eq!(chart.points[1].label, "bbbbbbbb");
        assert_eq!(chart.points[1].data, [1500.0, 1000.0]);
    }

    #[test]
    fn seconds_selected_when_minimum_exceeds_divisor() {
        let revisions = revision_map(&[("aaaaaaaa1111", 100), ("bbbbbbbb2222", 200)]);
        let mut estimates = EstimateTable::default();
        insert(&mut estimates, UNGROUPED, "bench", "x", "aaaaaaaa1111", 5e9);
        insert(&mut estimates, UNGROUPED, "bench", "x", "bbbbbbbb2222", 3e9);

        let report = Report::build(&revisions, &estimates);
        let chart = &report.perf_groups[0].charts[0];
        assert_eq!(chart.units, "seconds (s)");
        assert_eq!(chart.points[0].data, [5.0]);
        assert_eq!(chart.points[1].data, [3.0]);
    }

    #[test]
    fn points_follow_timestamp_order_not_id_order() {
        let revisions = revision_map(&[("aaaaaaaa1111", 200), ("bbbbbbbb2222", 100)]);
        let mut estimates = EstimateTable::default();
        insert(&mut estimates, UNGROUPED, "bench", "x", "aaaaaaaa1111", 2e6);
        insert(&mut estimates, UNGROUPED, "bench", "x", "bbbbbbbb2222", 3e6);

        let report = Report::build(&revisions, &estimates);
        let labels: Vec<&str> = report.perf_groups[0].charts[0]
            .points
            .iter()
            .map(|p| p.label.as_str())
            .collect();
        assert_eq!(labels, ["bbbbbbbb", "aaaaaaaa"]);
    }

    #[test]
    fn equal_timestamps_tie_break_by_id() {
        let revisions = revision_map(&[("bbbbbbbb2222", 100), ("aaaaaaaa1111", 100)]);
        let mut estimates = EstimateTable::default();
        insert(&mut estimates, UNGROUPED, "bench", "x", "aaaaaaaa1111", 2e6);
        insert(&mut estimates, UNGROUPED, "bench", "x", "bbbbbbbb2222", 3e6);

        let report = Report::build(&revisions, &estimates);
        let labels: Vec<&str> = report.perf_groups[0].charts[0]
            .points
            .iter()
            .map(|p| p.label.as_str())
            .collect();
        assert_eq!(labels, ["aaaaaaaa", "bbbbbbbb"]);
    }

    #[test]
    fn revisions_without_measurements_are_skipped() {
        let revisions = revision_map(&[("aaaaaaaa1111", 100), ("bbbbbbbb2222", 200)]);
        let mut estimates = EstimateTable::default();
        insert(&mut estimates, UNGROUPED, "bench", "x", "bbbbbbbb2222", 2e6);

        let report = Report::build(&revisions, &estimates);
        let chart = &report.perf_groups[0].charts[0];
        assert_eq!(chart.points.len(), 1);
        assert_eq!(chart.points[0].label, "bbbbbbbb");
        // The skipped revision still appears in the metadata table.
        assert_eq!(report.commit_metadata.len(), 2);
    }

    #[test]
    fn ungrouped_sorts_before_named_groups() {
        let revisions = revision_map(&[("aaaaaaaa1111", 100)]);
        let mut estimates = EstimateTable::default();
        insert(&mut estimates, "codecs", "decode", "x", "aaaaaaaa1111", 2e6);
        insert(&mut estimates, UNGROUPED, "startup", "x", "aaaaaaaa1111", 2e6);

        let report = Report::build(&revisions, &estimates);
        let names: Vec<&str> = report.perf_groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["", "codecs"]);
    }

    #[test]
    fn metadata_keyed_by_short_id() {
        let revisions = revision_map(&[("aaaaaaaa1111", 100)]);
        let report = Report::build(&revisions, &EstimateTable::default());

        let meta = &report.commit_metadata["aaaaaaaa"];
        assert_eq!(meta.message, "m aaaaaaaa1111");
        assert_eq!(meta.timestamp, 100);
        assert_eq!(meta.author, "dev");
    }

    #[test]
    fn document_uses_camel_case_keys() {
        let revisions = revision_map(&[("aaaaaaaa1111", 100)]);
        let report = Report::build(&revisions, &EstimateTable::default());
        let value = serde_json::to_value(&report).unwrap();

        assert!(value.get("lastUpdate").is_some());
        assert!(value.get("perfGroups").is_some());
        assert!(value.get("commitMetadata").is_some());
    }
}
