#![forbid(unsafe_code)]

//! Card and spacing dimensions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pixel dimensions driving placement.
///
/// Deserializes from a partial JSON object; absent fields keep their
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    /// Card width.
    pub node_width: f64,
    /// Card height.
    pub node_height: f64,
    /// Gap between adjacent sibling bands.
    pub h_spacing: f64,
    /// Gap between generations.
    pub v_spacing: f64,
    /// Height of the title band at the top of a card.
    pub title_height: f64,
    /// Height of the note strip at the bottom of a card.
    pub note_height: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            node_width: 200.0,
            node_height: 280.0,
            h_spacing: 40.0,
            v_spacing: 40.0,
            title_height: 80.0,
            note_height: 20.0,
        }
    }
}

impl LayoutMetrics {
    #[must_use]
    pub fn with_node_size(mut self, width: f64, height: f64) -> Self {
        self.node_width = width;
        self.node_height = height;
        self
    }

    #[must_use]
    pub fn with_spacing(mut self, horizontal: f64, vertical: f64) -> Self {
        self.h_spacing = horizontal;
        self.v_spacing = vertical;
        self
    }

    #[must_use]
    pub fn with_sections(mut self, title_height: f64, note_height: f64) -> Self {
        self.title_height = title_height;
        self.note_height = note_height;
        self
    }

    /// Pixel width of a band reserving `units` leaf slots.
    ///
    /// A band of zero units is treated as one.
    #[inline]
    #[must_use]
    pub fn band_width(&self, units: usize) -> f64 {
        let units = units.max(1) as f64;
        units * (self.node_width + self.h_spacing) - self.h_spacing
    }

    /// Vertical distance between the tops of consecutive generations.
    #[inline]
    #[must_use]
    pub fn row_pitch(&self) -> f64 {
        self.node_height + self.v_spacing
    }

    /// Reject non-finite values, non-positive card sizes, and negative gaps.
    pub fn validate(&self) -> Result<(), MetricsError> {
        let fields = [
            ("node_width", self.node_width, false),
            ("node_height", self.node_height, false),
            ("h_spacing", self.h_spacing, true),
            ("v_spacing", self.v_spacing, true),
            ("title_height", self.title_height, true),
            ("note_height", self.note_height, true),
        ];
        for (field, value, zero_ok) in fields {
            let ok = value.is_finite() && if zero_ok { value >= 0.0 } else { value > 0.0 };
            if !ok {
                return Err(MetricsError { field, value });
            }
        }
        if self.title_height + self.note_height > self.node_height {
            return Err(MetricsError {
                field: "title_height",
                value: self.title_height,
            });
        }
        Ok(())
    }
}

/// A [`LayoutMetrics`] field holds an unusable value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsError {
    pub field: &'static str,
    pub value: f64,
}

impl fmt::Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid layout metric {} = {}", self.field, self.value)
    }
}

impl std::error::Error for MetricsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_width_matches_unit_arithmetic() {
        let m = LayoutMetrics::default();
        assert_eq!(m.band_width(1), 200.0);
        assert_eq!(m.band_width(3), 680.0);
        assert_eq!(m.band_width(0), 200.0);
        assert_eq!(m.row_pitch(), 320.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let m: LayoutMetrics = serde_json::from_str(r#"{ "node_width": 120 }"#).unwrap();
        assert_eq!(m.node_width, 120.0);
        assert_eq!(m.node_height, 280.0);
        assert_eq!(m.h_spacing, 40.0);
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(LayoutMetrics::default().validate().is_ok());
        let err = LayoutMetrics::default()
            .with_node_size(0.0, 280.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field, "node_width");
        assert!(
            LayoutMetrics::default()
                .with_spacing(-1.0, 40.0)
                .validate()
                .is_err()
        );
        assert!(
            LayoutMetrics::default()
                .with_spacing(f64::NAN, 40.0)
                .validate()
                .is_err()
        );
        assert!(
            LayoutMetrics::default()
                .with_sections(270.0, 20.0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn zero_spacing_is_allowed() {
        assert!(
            LayoutMetrics::default()
                .with_spacing(0.0, 0.0)
                .validate()
                .is_ok()
        );
    }
}
