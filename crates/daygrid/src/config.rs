//! Layout configuration.
//!
//! Every geometric constant the engine uses lives here and is passed in
//! explicitly, so a layout is a pure function of `(events, viewport, config)`.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// How events with `start >= end` are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntervalPolicy {
    /// Drop the event from the layout and report it in `rejected`.
    #[default]
    Reject,
    /// Keep the event with `end` clamped to `start` (zero height).
    ZeroDuration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Height of the full 24-hour track. `px_per_hour = track_height / 24`.
    pub track_height: f64,
    /// Visual margin subtracted from every segment width.
    pub gutter: f64,
    /// Width reserved to the left of column 0 (e.g. for hour labels).
    pub left_margin: f64,
    pub interval_policy: IntervalPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            track_height: 1440.0,
            gutter: 2.0,
            left_margin: 0.0,
            interval_policy: IntervalPolicy::Reject,
        }
    }
}

impl LayoutConfig {
    pub fn with_track_height(mut self, track_height: f64) -> Self {
        self.track_height = track_height;
        self
    }

    pub fn with_gutter(mut self, gutter: f64) -> Self {
        self.gutter = gutter;
        self
    }

    pub fn with_left_margin(mut self, left_margin: f64) -> Self {
        self.left_margin = left_margin;
        self
    }

    pub fn with_interval_policy(mut self, policy: IntervalPolicy) -> Self {
        self.interval_policy = policy;
        self
    }

    pub fn px_per_hour(&self) -> f64 {
        self.track_height / 24.0
    }

    /// Parse a (possibly partial) JSON config; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would produce degenerate geometry.
    pub fn validate(&self) -> Result<()> {
        if !self.track_height.is_finite() || self.track_height <= 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "trackHeight must be positive, got {}",
                self.track_height
            )));
        }
        if !self.gutter.is_finite() || self.gutter < 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "gutter must be non-negative, got {}",
                self.gutter
            )));
        }
        if !self.left_margin.is_finite() || self.left_margin < 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "leftMargin must be non-negative, got {}",
                self.left_margin
            )));
        }
        Ok(())
    }

    /// Validate `viewport_width` against this config.
    ///
    /// The viewport must be finite and strictly wider than `left_margin`.
    pub fn validate_viewport(&self, viewport_width: f64) -> Result<()> {
        if !viewport_width.is_finite() || viewport_width <= self.left_margin {
            return Err(LayoutError::InvalidViewport(viewport_width));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_track_is_sixty_px_per_hour() {
        assert_eq!(LayoutConfig::default().px_per_hour(), 60.0);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = LayoutConfig::from_json(r#"{"gutter": 0, "intervalPolicy": "zeroDuration"}"#)
            .unwrap();
        assert_eq!(config.gutter, 0.0);
        assert_eq!(config.track_height, 1440.0);
        assert_eq!(config.interval_policy, IntervalPolicy::ZeroDuration);
    }

    #[test]
    fn negative_gutter_is_rejected() {
        let err = LayoutConfig::default().with_gutter(-1.0).validate();
        assert!(matches!(err, Err(LayoutError::InvalidConfig(_))));
    }

    #[test]
    fn zero_track_height_is_rejected() {
        let err = LayoutConfig::from_json(r#"{"trackHeight": 0}"#);
        assert!(matches!(err, Err(LayoutError::InvalidConfig(_))));
    }

    #[test]
    fn viewport_must_exceed_left_margin() {
        let config = LayoutConfig::default().with_left_margin(50.0);
        assert!(config.validate_viewport(51.0).is_ok());
        assert!(matches!(
            config.validate_viewport(50.0),
            Err(LayoutError::InvalidViewport(_))
        ));
        assert!(matches!(
            LayoutConfig::default().validate_viewport(0.0),
            Err(LayoutError::InvalidViewport(_))
        ));
        assert!(LayoutConfig::default().validate_viewport(f64::NAN).is_err());
    }
}
