//! Input events and the single-day segments derived from them.
//!
//! All instants are `DateTime<Utc>`; UTC is the reference timezone, so a
//! "calendar day" is always the UTC date of an instant.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A time-bounded calendar event as supplied by the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    #[serde(deserialize_with = "instant::deserialize")]
    pub start: DateTime<Utc>,
    #[serde(deserialize_with = "instant::deserialize")]
    pub end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Event {
    /// Create an event with no title or color.
    pub fn new(
        id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            id,
            start,
            end,
            title: None,
            summary: summary.into(),
            color: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// `true` when `start < end`.
    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }

    /// Parse a JSON array of events.
    ///
    /// Instants accept RFC 3339 (`2026-03-02T09:00:00Z`) or a naive
    /// `2026-03-02T09:00:00`, which is read as UTC.
    pub fn list_from_json(json: &str) -> Result<Vec<Event>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A portion of an [`Event`] that lies within a single calendar day.
///
/// `end` may be the midnight that closes the day. When the source event spans
/// several days, every segment cut from it has `multiple_days` set and carries
/// the original bounds in `starts_from` / `ends_on`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub multiple_days: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_on: Option<DateTime<Utc>>,
}

impl Segment {
    /// Copy an event's fields into a segment without multi-day markers.
    pub fn from_event(event: &Event) -> Self {
        Self {
            id: event.id,
            start: event.start,
            end: event.end,
            title: event.title.clone(),
            summary: event.summary.clone(),
            color: event.color.clone(),
            multiple_days: false,
            starts_from: None,
            ends_on: None,
        }
    }

    /// Half-open interval overlap: `[a.start, a.end)` intersects `[b.start, b.end)`.
    ///
    /// Adjacent segments (one ends exactly when the other starts) do not overlap.
    pub fn overlaps(&self, other: &Segment) -> bool {
        self.end > other.start && self.start < other.end
    }

    /// The calendar day this segment is drawn on.
    pub fn day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

/// Midnight at the beginning of `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// The midnight that closes the calendar day containing `instant`.
///
/// Returns `None` only at the very end of chrono's representable range.
pub fn next_midnight(instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
    instant
        .date_naive()
        .succ_opt()
        .map(start_of_day)
}

/// Hours elapsed between the midnight opening `instant`'s day and `instant`.
pub fn hours_since_midnight(instant: DateTime<Utc>) -> f64 {
    duration_hours(instant - start_of_day(instant.date_naive()))
}

/// A duration expressed in fractional hours.
pub fn duration_hours(delta: TimeDelta) -> f64 {
    delta.num_milliseconds() as f64 / 3_600_000.0
}

/// Lenient instant parsing shared by the JSON boundaries.
pub mod instant {
    use super::*;
    use serde::de::{self, Deserializer};

    /// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
    ///
    /// Accepts RFC 3339 (with an offset, converted to UTC) and naive
    /// `YYYY-MM-DDTHH:MM:SS[.fff]`, which is interpreted as UTC.
    pub fn parse(s: &str) -> std::result::Result<DateTime<Utc>, String> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|ndt| ndt.and_utc())
            .map_err(|e| format!("invalid datetime '{}': {}", s, e))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }
}
