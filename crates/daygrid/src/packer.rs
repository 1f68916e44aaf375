//! Horizontal and vertical geometry for clustered day-view segments.

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::event::{duration_hours, hours_since_midnight, Segment};

/// Rendered rectangle of one segment, in the same units as the viewport width
/// and track height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutRect {
    pub top: f64,
    pub height: f64,
    pub left: f64,
    pub width: f64,
}

/// A segment annotated with its day-view placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedSegment {
    #[serde(flatten)]
    pub segment: Segment,
    pub rect: LayoutRect,
    /// 0-based column within the cluster.
    pub column: usize,
    /// Number of columns in the cluster.
    pub columns: usize,
    /// Adjacent columns this segment may cover, starting at `column`.
    pub col_span: usize,
}

/// How many adjacent columns the segment at `column_index` may span.
///
/// Starts at 1 and walks the later columns in order. The first column holding
/// any segment that overlaps `segment` ends the walk; every collision-free
/// column before it widens the span by one.
pub fn column_span(columns: &[Vec<Segment>], column_index: usize, segment: &Segment) -> usize {
    let mut span = 1;
    for column in columns.iter().skip(column_index + 1) {
        if column.iter().any(|other| other.overlaps(segment)) {
            return span;
        }
        span += 1;
    }
    span
}

/// Lay out one cluster's columns inside a viewport of `viewport_width`.
///
/// Output is column-major: all of column 0 in start order, then column 1, and
/// so on. Callers validate `viewport_width` and `config` beforehand.
pub fn pack(
    columns: &[Vec<Segment>],
    viewport_width: f64,
    config: &LayoutConfig,
) -> Vec<PositionedSegment> {
    let column_count = columns.len();
    let available = viewport_width - config.left_margin;
    let px_per_hour = config.px_per_hour();

    let mut positioned = Vec::with_capacity(columns.iter().map(Vec::len).sum());
    for (index, column) in columns.iter().enumerate() {
        for segment in column {
            let col_span = column_span(columns, index, segment);
            let rect = LayoutRect {
                top: hours_since_midnight(segment.start) * px_per_hour,
                height: duration_hours(segment.duration()) * px_per_hour,
                left: config.left_margin + (index as f64 / column_count as f64) * available,
                width: (available * col_span as f64 / column_count as f64 - config.gutter)
                    .max(0.0),
            };
            positioned.push(PositionedSegment {
                segment: segment.clone(),
                rect,
                column: index,
                columns: column_count,
                col_span,
            });
        }
    }
    positioned
}
