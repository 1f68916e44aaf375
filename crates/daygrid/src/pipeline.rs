//! End-to-end layout: validation, interval policy, splitting, then either
//! clustering + packing (day view) or day/chain grouping (month view).
//!
//! Every call builds its output from scratch. Inputs are borrowed immutably
//! and nothing is cached between calls, so identical inputs always produce
//! identical layouts.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cluster::cluster;
use crate::config::{IntervalPolicy, LayoutConfig};
use crate::error::Result;
use crate::event::{Event, Segment};
use crate::month::{group_by_day, DayGroup};
use crate::packer::{pack, PositionedSegment};
use crate::segmenter::split_multi_day;

/// An input event excluded because `start >= end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub reason: String,
}

/// Day-view result: positioned segments, cluster by cluster in time order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DayLayout {
    pub segments: Vec<PositionedSegment>,
    pub rejected: Vec<Rejection>,
}

/// Month-view result: one group per calendar day that has segments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthLayout {
    pub days: Vec<DayGroup>,
    pub rejected: Vec<Rejection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    #[default]
    Day,
    Month,
}

/// Split-only result: single-day segments in input order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SplitLayout {
    pub segments: Vec<Segment>,
    pub rejected: Vec<Rejection>,
}

/// Everything besides the events that selects and parameterizes a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    #[serde(default)]
    pub view: ViewMode,
    /// Required for day view; ignored by month view.
    #[serde(default)]
    pub viewport_width: f64,
    /// Restrict a day view to this calendar date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub config: LayoutConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum Layout {
    Day(DayLayout),
    Month(MonthLayout),
}

/// Run the layout selected by `request.view`.
pub fn layout(events: &[Event], request: &LayoutRequest) -> Result<Layout> {
    match request.view {
        ViewMode::Day => {
            let day = match request.date {
                Some(date) => {
                    layout_day_on(events, date, request.viewport_width, &request.config)?
                }
                None => layout_day(events, request.viewport_width, &request.config)?,
            };
            Ok(Layout::Day(day))
        }
        ViewMode::Month => Ok(Layout::Month(layout_month(events, &request.config)?)),
    }
}

/// Lay out every segment of `events` as day-grid columns.
///
/// # Errors
/// `LayoutError::InvalidViewport` when `viewport_width` is not finite or not
/// wider than `config.left_margin`; `LayoutError::InvalidConfig` for a bad
/// config. Malformed events never fail the call; see [`IntervalPolicy`].
pub fn layout_day(
    events: &[Event],
    viewport_width: f64,
    config: &LayoutConfig,
) -> Result<DayLayout> {
    config.validate()?;
    config.validate_viewport(viewport_width)?;

    let (accepted, rejected) = screen_intervals(events, config.interval_policy);
    let segments = split_multi_day(&accepted);
    Ok(DayLayout {
        segments: position_segments(&segments, viewport_width, config),
        rejected,
    })
}

/// Like [`layout_day`], restricted to the segments drawn on `date`.
///
/// A multi-day event contributes only the segment that falls on `date`.
pub fn layout_day_on(
    events: &[Event],
    date: NaiveDate,
    viewport_width: f64,
    config: &LayoutConfig,
) -> Result<DayLayout> {
    config.validate()?;
    config.validate_viewport(viewport_width)?;

    let (accepted, rejected) = screen_intervals(events, config.interval_policy);
    let mut segments = split_multi_day(&accepted);
    segments.retain(|segment| segment.day() == date);
    Ok(DayLayout {
        segments: position_segments(&segments, viewport_width, config),
        rejected,
    })
}

/// Group every segment of `events` by day and overlap chain.
pub fn layout_month(events: &[Event], config: &LayoutConfig) -> Result<MonthLayout> {
    config.validate()?;

    let (accepted, rejected) = screen_intervals(events, config.interval_policy);
    let segments = split_multi_day(&accepted);
    let days = group_by_day(&segments);
    debug!(
        events = events.len(),
        segments = segments.len(),
        days = days.len(),
        "month layout computed"
    );
    Ok(MonthLayout { days, rejected })
}

/// Split `events` into single-day segments after screening malformed ones.
pub fn layout_split(events: &[Event], config: &LayoutConfig) -> Result<SplitLayout> {
    config.validate()?;

    let (accepted, rejected) = screen_intervals(events, config.interval_policy);
    Ok(SplitLayout {
        segments: split_multi_day(&accepted),
        rejected,
    })
}

fn position_segments(
    segments: &[Segment],
    viewport_width: f64,
    config: &LayoutConfig,
) -> Vec<PositionedSegment> {
    let clusters = cluster(segments);
    let widest = clusters.iter().map(|c| c.column_count()).max().unwrap_or(0);
    debug!(
        segments = segments.len(),
        clusters = clusters.len(),
        widest_cluster = widest,
        "day layout computed"
    );
    clusters
        .iter()
        .flat_map(|c| pack(&c.columns, viewport_width, config))
        .collect()
}

/// Apply `policy` to every event with `start >= end`.
///
/// Returns the events to lay out (in input order) and the rejected ones.
pub fn screen_intervals(
    events: &[Event],
    policy: IntervalPolicy,
) -> (Vec<Event>, Vec<Rejection>) {
    let mut accepted = Vec::with_capacity(events.len());
    let mut rejected = Vec::new();

    for event in events {
        if event.is_well_formed() {
            accepted.push(event.clone());
            continue;
        }
        match policy {
            IntervalPolicy::Reject => {
                warn!(
                    id = event.id,
                    start = %event.start,
                    end = %event.end,
                    "rejecting event with start >= end"
                );
                rejected.push(Rejection {
                    id: event.id,
                    start: event.start,
                    end: event.end,
                    reason: "start must be before end".to_string(),
                });
            }
            IntervalPolicy::ZeroDuration => {
                accepted.push(Event {
                    end: event.start,
                    ..event.clone()
                });
            }
        }
    }

    (accepted, rejected)
}
