//! Month-view grouping -- segments by calendar day, then by overlap chain.
//!
//! Month cells stack chains vertically instead of laying segments side by
//! side, so no column geometry is computed here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Segment;

/// A run of segments within one day where each segment starts inside
/// `[start, end)` of the segments before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapChain {
    /// Start of the first segment in the chain.
    pub start: DateTime<Utc>,
    /// Latest end among the chain's segments.
    pub end: DateTime<Utc>,
    pub segments: Vec<Segment>,
}

impl OverlapChain {
    fn open(segment: Segment) -> Self {
        Self {
            start: segment.start,
            end: segment.end,
            segments: vec![segment],
        }
    }

    /// `true` if `segment` starts within `[start, end)`.
    pub fn accepts(&self, segment: &Segment) -> bool {
        segment.start >= self.start && segment.start < self.end
    }

    fn extend(&mut self, segment: Segment) {
        self.end = self.end.max(segment.end);
        self.segments.push(segment);
    }
}

/// All chains for one calendar day, in start order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub chains: Vec<OverlapChain>,
}

impl DayGroup {
    /// Every segment of the day in chronological order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.chains.iter().flat_map(|chain| chain.segments.iter())
    }
}

/// Group single-day segments by the calendar day of their `start`, and within
/// each day into overlap chains.
///
/// Days are returned in chronological order; only days holding at least one
/// segment appear.
pub fn group_by_day(segments: &[Segment]) -> Vec<DayGroup> {
    let mut days: Vec<DayGroup> = Vec::new();
    let mut current: Vec<Segment> = Vec::new();
    let mut day_marker: Option<NaiveDate> = None;

    let mut sorted: Vec<&Segment> = segments.iter().collect();
    sorted.sort_by_key(|s| s.start);

    for segment in sorted {
        let day = segment.day();
        if let Some(marker) = day_marker {
            if marker != day {
                days.push(DayGroup {
                    date: marker,
                    chains: build_chains(std::mem::take(&mut current)),
                });
            }
        }
        day_marker = Some(day);
        current.push(segment.clone());
    }

    if let Some(marker) = day_marker {
        days.push(DayGroup {
            date: marker,
            chains: build_chains(current),
        });
    }

    days
}

/// Split one day's start-ordered segments into overlap chains.
pub fn build_chains(day_segments: Vec<Segment>) -> Vec<OverlapChain> {
    let mut chains: Vec<OverlapChain> = Vec::new();
    for segment in day_segments {
        match chains.last_mut() {
            Some(chain) if chain.accepts(&segment) => chain.extend(segment),
            _ => chains.push(OverlapChain::open(segment)),
        }
    }
    chains
}
