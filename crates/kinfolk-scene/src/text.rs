#![forbid(unsafe_code)]

//! Text shaping helpers for card content.
//!
//! There is no font rasterizer here; extents are estimated from terminal
//! cell widths, where a wide (CJK) grapheme occupies one em and a narrow one
//! half an em.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::style::SceneStyle;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT: f64 = 1.25;

/// Number of user-perceived characters in `text`.
#[must_use]
pub fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Stack `text` one grapheme per line, trimming surrounding whitespace.
#[must_use]
pub fn vertical_text(text: &str) -> String {
    let stacked: Vec<&str> = text.graphemes(true).collect();
    stacked.join("\n").trim().to_string()
}

/// Font size for a name column.
///
/// Long names use the small font; a name right at the threshold also does
/// when the card carries a note, since the note strip shortens the column.
#[must_use]
pub fn name_font_size(name: &str, has_note: bool, style: &SceneStyle) -> f64 {
    let count = grapheme_count(name);
    let threshold = style.small_name_threshold;
    if count > threshold || (count == threshold && has_note) {
        style.small_name_font_size
    } else {
        style.name_font_size
    }
}

/// Estimated `(width, height)` of `text` set at `font_size`.
#[must_use]
pub fn text_extent(text: &str, font_size: f64) -> (f64, f64) {
    if text.is_empty() {
        return (0.0, 0.0);
    }
    let lines: Vec<&str> = text.split('\n').collect();
    let widest = lines.iter().map(|line| line.width()).max().unwrap_or(0);
    let width = widest as f64 * font_size / 2.0;
    let height = lines.len() as f64 * font_size * LINE_HEIGHT;
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_text_stacks_graphemes() {
        assert_eq!(vertical_text("李明"), "李\n明");
        assert_eq!(vertical_text("e\u{301}a"), "e\u{301}\na");
        assert_eq!(vertical_text(""), "");
        assert_eq!(vertical_text(" ab "), "a\nb");
    }

    #[test]
    fn small_font_threshold() {
        let style = SceneStyle::default();
        assert_eq!(name_font_size("李明", false, &style), 20.0);
        assert_eq!(name_font_size("欧阳明月", false, &style), 20.0);
        assert_eq!(name_font_size("欧阳明月", true, &style), 16.0);
        assert_eq!(name_font_size("欧阳明月光", false, &style), 16.0);
    }

    #[test]
    fn extent_counts_wide_characters_as_one_em() {
        assert_eq!(text_extent("", 40.0), (0.0, 0.0));
        assert_eq!(text_extent("ab", 20.0), (20.0, 25.0));
        assert_eq!(text_extent("李家", 40.0), (80.0, 50.0));
        assert_eq!(text_extent("李\n明", 20.0), (20.0, 50.0));
    }
}
