//! WASM bindings for daygrid.
//!
//! Exposes multi-day splitting, day layout, and month grouping to JavaScript
//! via `wasm-bindgen`. Events, configs, and results cross the boundary as JSON
//! strings; errors are thrown as JS strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p daygrid-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/daygrid-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/daygrid_wasm.wasm
//! ```

use chrono::NaiveDate;
use daygrid::{Event, LayoutConfig, LayoutError};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: JSON in, JSON out
// ---------------------------------------------------------------------------

fn to_js(err: LayoutError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Parse a JSON array of events. Instants may be RFC 3339 or naive (UTC).
fn parse_events_json(json: &str) -> Result<Vec<Event>, JsValue> {
    Event::list_from_json(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid events JSON: {}", e)))
}

/// Parse an optional partial config; `None` or an empty string means defaults.
fn parse_config_json(json: Option<String>) -> Result<LayoutConfig, JsValue> {
    match json.as_deref().map(str::trim) {
        None | Some("") => Ok(LayoutConfig::default()),
        Some(raw) => LayoutConfig::from_json(raw).map_err(to_js),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Split multi-day events into single-day segments.
///
/// Returns `{segments: [...], rejected: [...]}`. Segments of events that
/// cross midnight carry `multipleDays`, `startsFrom`, and `endsOn`.
#[wasm_bindgen(js_name = "splitMultiDay")]
pub fn split_multi_day(events_json: &str, config_json: Option<String>) -> Result<String, JsValue> {
    let events = parse_events_json(events_json)?;
    let config = parse_config_json(config_json)?;
    let split = daygrid::layout_split(&events, &config).map_err(to_js)?;
    to_json(&split)
}

/// Compute the day-grid layout for a viewport of `viewport_width`.
///
/// # Arguments
/// - `events_json` -- JSON array of `{id, start, end, title?, summary, color?}`
/// - `viewport_width` -- width the columns are fitted into
/// - `config_json` -- optional partial `LayoutConfig` JSON
/// - `date` -- optional `YYYY-MM-DD`; restricts the layout to that date
///
/// Returns `{segments: [...], rejected: [...]}` as JSON.
#[wasm_bindgen(js_name = "layoutDay")]
pub fn layout_day(
    events_json: &str,
    viewport_width: f64,
    config_json: Option<String>,
    date: Option<String>,
) -> Result<String, JsValue> {
    let events = parse_events_json(events_json)?;
    let config = parse_config_json(config_json)?;

    let day = match date {
        Some(raw) => {
            let date = raw
                .parse::<NaiveDate>()
                .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", raw, e)))?;
            daygrid::layout_day_on(&events, date, viewport_width, &config)
        }
        None => daygrid::layout_day(&events, viewport_width, &config),
    }
    .map_err(to_js)?;

    to_json(&day)
}

/// Group events by day and overlap chain for a month grid.
///
/// Returns `{days: [{date, chains: [{start, end, segments}]}], rejected: [...]}`.
#[wasm_bindgen(js_name = "layoutMonth")]
pub fn layout_month(events_json: &str, config_json: Option<String>) -> Result<String, JsValue> {
    let events = parse_events_json(events_json)?;
    let config = parse_config_json(config_json)?;
    let month = daygrid::layout_month(&events, &config).map_err(to_js)?;
    to_json(&month)
}
