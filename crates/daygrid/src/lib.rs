//! # daygrid
//!
//! Deterministic layout for calendar events on day-grid and month-grid views.
//!
//! Given time-bounded events, daygrid computes where each one is drawn: top
//! and height from time of day, and column, width and left offset from its
//! overlaps with neighbouring events. The engine is pure and synchronous;
//! painting and interaction belong to the caller.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use daygrid::{layout_day, Event, LayoutConfig};
//!
//! let at = |h, m| Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap();
//! let events = vec![
//!     Event::new(1, at(9, 0), at(10, 0), "Standup"),
//!     Event::new(2, at(9, 30), at(10, 30), "Review"),
//! ];
//!
//! let config = LayoutConfig::default().with_gutter(0.0);
//! let day = layout_day(&events, 300.0, &config).unwrap();
//! assert_eq!(day.segments[0].rect.left, 0.0);
//! assert_eq!(day.segments[1].rect.left, 150.0);
//! ```
//!
//! ## Modules
//!
//! - [`segmenter`] — split multi-day events into single-day segments
//! - [`cluster`] — group overlapping segments and assign first-fit columns
//! - [`packer`] — column span lookahead and `LayoutRect` geometry
//! - [`month`] — group segments by day and overlap chain for month views
//! - [`pipeline`] — validation, interval policy, and the end-to-end entry points
//! - [`config`] — `LayoutConfig` and `IntervalPolicy`
//! - [`event`] — `Event` and `Segment`
//! - [`error`] — Error types

pub mod cluster;
pub mod config;
pub mod error;
pub mod event;
pub mod month;
pub mod packer;
pub mod pipeline;
pub mod segmenter;

pub use cluster::{cluster, Cluster};
pub use config::{IntervalPolicy, LayoutConfig};
pub use error::LayoutError;
pub use event::{Event, Segment};
pub use month::{group_by_day, DayGroup, OverlapChain};
pub use packer::{column_span, pack, LayoutRect, PositionedSegment};
pub use pipeline::{
    layout, layout_day, layout_day_on, layout_month, layout_split, DayLayout, Layout,
    LayoutRequest, MonthLayout, Rejection, SplitLayout, ViewMode,
};
pub use segmenter::split_multi_day;
