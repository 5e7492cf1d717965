#![forbid(unsafe_code)]

//! Visual constants for cards, connectors, and drag feedback.

use serde::{Deserialize, Serialize};

/// Fonts, colours, and feedback geometry used by the scene and renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneStyle {
    /// Opacity of the floating drag ghost (default: 0.3).
    pub ghost_opacity: f64,
    /// Stacking order of the ghost above cards (default: 100).
    pub ghost_z: i32,
    /// Width of the gap indicator bar (default: 5).
    pub gap_bar_width: f64,
    /// Distance between an outer sibling and the edge gap bar (default: 10).
    pub gap_edge_inset: f64,
    /// Family title font size (default: 40).
    pub title_font_size: f64,
    /// Vertical space between the family title and the root card (default: 40).
    pub title_gap: f64,
    /// Card title font size (default: 20).
    pub card_title_font_size: f64,
    /// Name font size (default: 20).
    pub name_font_size: f64,
    /// Name font size for long names (default: 16).
    pub small_name_font_size: f64,
    /// Graphemes above which a name uses the small font (default: 4).
    pub small_name_threshold: usize,
    /// Note font size (default: 10).
    pub note_font_size: f64,
    /// Half-width and height of the connector arrow head (default: 8).
    pub arrow_size: f64,
    /// Outline and text colour of cards.
    pub card_color: String,
    /// Colour of the ghost, gap bar, and selection.
    pub active_color: String,
    /// Canvas background for exports.
    pub background: String,
    pub font_family: String,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            ghost_opacity: 0.3,
            ghost_z: 100,
            gap_bar_width: 5.0,
            gap_edge_inset: 10.0,
            title_font_size: 40.0,
            title_gap: 40.0,
            card_title_font_size: 20.0,
            name_font_size: 20.0,
            small_name_font_size: 16.0,
            small_name_threshold: 4,
            note_font_size: 10.0,
            arrow_size: 8.0,
            card_color: "#000000".to_string(),
            active_color: "#d2691e".to_string(),
            background: "#ffffff".to_string(),
            font_family: "KaiTi, STKaiti, serif".to_string(),
        }
    }
}

impl SceneStyle {
    #[must_use]
    pub fn with_active_color(mut self, color: impl Into<String>) -> Self {
        self.active_color = color.into();
        self
    }

    #[must_use]
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    #[must_use]
    pub fn with_ghost_opacity(mut self, opacity: f64) -> Self {
        self.ghost_opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let style: SceneStyle =
            serde_json::from_str(r##"{"active_color":"#ff0000","ghost_opacity":0.5}"##).unwrap();
        assert_eq!(style.active_color, "#ff0000");
        assert_eq!(style.ghost_opacity, 0.5);
        assert_eq!(style.gap_bar_width, 5.0);
        assert_eq!(style.small_name_threshold, 4);
    }

    #[test]
    fn ghost_opacity_is_clamped() {
        assert_eq!(SceneStyle::default().with_ghost_opacity(3.0).ghost_opacity, 1.0);
        assert_eq!(SceneStyle::default().with_ghost_opacity(-1.0).ghost_opacity, 0.0);
    }
}
