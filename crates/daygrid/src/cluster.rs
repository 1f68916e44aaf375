//! Day-view clustering and first-fit column assignment.
//!
//! Segments are walked in start order. A cluster stays open while each new
//! segment starts before the latest end seen since the cluster opened; inside
//! a cluster every segment goes into the first column whose last segment it
//! does not overlap. The packing is greedy and order-dependent: it does not
//! minimize the column count, and callers rely on exactly this placement.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::event::Segment;

/// A maximal run of connected overlapping segments, already split into columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    /// Columns left to right; segments within a column are in start order and
    /// never overlap.
    pub columns: Vec<Vec<Segment>>,
}

impl Cluster {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Total number of segments across all columns.
    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }
}

/// Sort segments by `(start, end)` keeping input order for ties.
pub fn sort_segments(segments: &[Segment]) -> Vec<&Segment> {
    let mut sorted: Vec<&Segment> = segments.iter().collect();
    // `sort_by_key` is stable, which preserves input order for equal keys.
    sorted.sort_by_key(|s| (s.start, s.end));
    sorted
}

/// Partition single-day segments into clusters with first-fit columns.
///
/// A cluster closes when a segment starts at or after the maximum `end` of
/// every segment placed since the cluster opened.
pub fn cluster(segments: &[Segment]) -> Vec<Cluster> {
    let mut clusters = Vec::new();
    let mut columns: Vec<Vec<Segment>> = Vec::new();
    let mut last_end: Option<DateTime<Utc>> = None;

    for segment in sort_segments(segments) {
        if let Some(end) = last_end {
            if segment.start >= end {
                clusters.push(Cluster {
                    columns: std::mem::take(&mut columns),
                });
                last_end = None;
            }
        }

        place_first_fit(&mut columns, segment);

        last_end = Some(match last_end {
            Some(end) => end.max(segment.end),
            None => segment.end,
        });
    }

    if !columns.is_empty() {
        clusters.push(Cluster { columns });
    }

    clusters
}

/// Put `segment` into the first column whose last segment it does not overlap,
/// opening a new column when none accepts it.
fn place_first_fit(columns: &mut Vec<Vec<Segment>>, segment: &Segment) {
    for column in columns.iter_mut() {
        if column.last().is_none_or(|last| !last.overlaps(segment)) {
            column.push(segment.clone());
            return;
        }
    }
    columns.push(vec![segment.clone()]);
}
