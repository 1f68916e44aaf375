//! Multi-day splitting -- cuts events that cross midnight into single-day segments.
//!
//! A segment may end exactly at the midnight closing its day, so an event
//! `[Mon 22:00, Tue 00:00)` is a single-day event and passes through untouched.

use chrono::{DateTime, Utc};

use crate::event::{next_midnight, Event, Segment};

/// Split every event into single-day segments.
///
/// Events contained in one calendar day pass through with `multiple_days ==
/// false`. Longer events become one segment per day they touch, each marked
/// `multiple_days` with `starts_from` / `ends_on` holding the original bounds.
/// Output keeps input order; segments of one event are contiguous and ordered
/// by day.
pub fn split_multi_day(events: &[Event]) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(events.len());
    for event in events {
        split_event(event, &mut segments);
    }
    segments
}

/// Split a single event, appending its segments to `out`.
pub fn split_event(event: &Event, out: &mut Vec<Segment>) {
    let base = Segment::from_event(event);
    if fits_in_one_day(event.start, event.end) {
        out.push(base);
        return;
    }
    let marked = Segment {
        multiple_days: true,
        starts_from: Some(event.start),
        ends_on: Some(event.end),
        ..base
    };
    peel_days(marked, event.start, event.end, out);
}

/// Emit `[from, next midnight)` repeatedly, advancing `from` over the remaining
/// tail until it fits in one day. `template` carries the shared fields and the
/// multi-day markers.
fn peel_days(
    template: Segment,
    mut from: DateTime<Utc>,
    until: DateTime<Utc>,
    out: &mut Vec<Segment>,
) {
    loop {
        match next_midnight(from) {
            Some(boundary) if boundary < until => {
                out.push(Segment {
                    start: from,
                    end: boundary,
                    ..template.clone()
                });
                from = boundary;
            }
            _ => {
                out.push(Segment {
                    start: from,
                    end: until,
                    ..template
                });
                return;
            }
        }
    }
}

/// `true` when `[start, end)` does not cross the midnight after `start`.
///
/// Zero-length and inverted intervals count as single-day.
pub fn fits_in_one_day(start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    match next_midnight(start) {
        Some(boundary) => end <= boundary,
        None => true,
    }
}
