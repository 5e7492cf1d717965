#![forbid(unsafe_code)]

//! Render model.
//!
//! The scene exposes everything it draws as a flat list of [`Visual`]s in
//! paint order. Renderers match on the variant; there is no visual class
//! hierarchy.

use kinfolk_core::{Person, PersonId, Point, Rect};
use kinfolk_layout::{LayoutMetrics, Placement};
use serde::Serialize;

use crate::style::SceneStyle;
use crate::text::{name_font_size, text_extent, vertical_text};

/// Card sub-rectangles, relative to the card's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardSections {
    pub title: Rect,
    pub name: Rect,
    pub spouse: Option<Rect>,
    pub note: Option<Rect>,
}

impl CardSections {
    /// Split a card into its title band, name columns, and note strip.
    ///
    /// The name area is halved when a spouse is shown; the note strip only
    /// exists when there is a note.
    #[must_use]
    pub fn compute(metrics: &LayoutMetrics, has_spouse: bool, has_note: bool) -> Self {
        let width = metrics.node_width;
        let top = metrics.title_height;
        let mut name_height = metrics.node_height - metrics.title_height;
        if has_note {
            name_height -= metrics.note_height;
        }

        let title = Rect::new(0.0, 0.0, width, top);
        let (name, spouse) = if has_spouse {
            let half = width / 2.0;
            (
                Rect::new(0.0, top, half, name_height),
                Some(Rect::new(half, top, half, name_height)),
            )
        } else {
            (Rect::new(0.0, top, width, name_height), None)
        };
        let note = has_note.then(|| Rect::new(0.0, top + name_height, width, metrics.note_height));

        Self {
            title,
            name,
            spouse,
            note,
        }
    }
}

/// Everything drawn inside one card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardContent {
    pub title: String,
    pub name: String,
    /// `name` stacked one grapheme per line.
    pub vertical_name: String,
    pub spouse_name: String,
    pub vertical_spouse: String,
    pub note: String,
    pub is_male: bool,
    pub is_alive: bool,
    pub is_spouse_alive: bool,
    pub title_font: f64,
    pub name_font: f64,
    pub spouse_font: f64,
    pub note_font: f64,
    pub sections: CardSections,
}

impl CardContent {
    #[must_use]
    pub fn from_person(person: &Person, metrics: &LayoutMetrics, style: &SceneStyle) -> Self {
        let has_note = person.has_note();
        Self {
            title: person.title.clone(),
            name: person.name.clone(),
            vertical_name: vertical_text(&person.name),
            spouse_name: person.spouse_name.clone(),
            vertical_spouse: vertical_text(&person.spouse_name),
            note: person.note.clone(),
            is_male: person.is_male,
            is_alive: person.is_alive,
            is_spouse_alive: person.is_spouse_alive,
            title_font: style.card_title_font_size,
            name_font: name_font_size(&person.name, has_note, style),
            spouse_font: name_font_size(&person.spouse_name, has_note, style),
            note_font: style.note_font_size,
            sections: CardSections::compute(metrics, person.has_spouse(), has_note),
        }
    }
}

/// One person's card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeVisual {
    pub id: PersonId,
    pub rect: Rect,
    /// Left edge of the subtree band.
    pub band_left: f64,
    /// Pixel width of the subtree band.
    pub band_width: f64,
    pub layer: usize,
    pub content: CardContent,
}

impl NodeVisual {
    #[must_use]
    pub fn new(
        person: &Person,
        placement: &Placement,
        metrics: &LayoutMetrics,
        style: &SceneStyle,
    ) -> Self {
        Self {
            id: person.id.clone(),
            rect: placement.rect,
            band_left: placement.band_left,
            band_width: placement.band_width,
            layer: placement.layer,
            content: CardContent::from_person(person, metrics, style),
        }
    }

    /// Absolute rectangle of a card section.
    #[must_use]
    pub fn section(&self, local: Rect) -> Rect {
        local.translate(self.rect.origin())
    }
}

/// One path segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
}

/// Elbow line from a parent card to a child card, with an arrow head.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorVisual {
    pub parent: PersonId,
    pub child: PersonId,
    pub path: Vec<PathCommand>,
}

impl ConnectorVisual {
    /// Route from the parent's bottom-center down half the gap, across, and
    /// down into the child's top-center, then draw two arrow strokes.
    #[must_use]
    pub fn between(
        parent: PersonId,
        parent_rect: Rect,
        child: PersonId,
        child_rect: Rect,
        arrow_size: f64,
    ) -> Self {
        let begin = parent_rect.bottom_center();
        let end = child_rect.top_center();
        let half = (end.y - begin.y) / 2.0;
        let path = vec![
            PathCommand::MoveTo(begin),
            PathCommand::LineTo(Point::new(begin.x, begin.y + half)),
            PathCommand::LineTo(Point::new(end.x, end.y - half)),
            PathCommand::LineTo(end),
            PathCommand::LineTo(Point::new(end.x - arrow_size, end.y - arrow_size)),
            PathCommand::MoveTo(end),
            PathCommand::LineTo(Point::new(end.x + arrow_size, end.y - arrow_size)),
        ];
        Self {
            parent,
            child,
            path,
        }
    }

    /// Final point of the elbow, on the child's top edge.
    #[must_use]
    pub fn end(&self) -> Option<Point> {
        match self.path.get(3) {
            Some(PathCommand::LineTo(p)) => Some(*p),
            _ => None,
        }
    }
}

/// Family title above the root card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleVisual {
    pub text: String,
    pub font_size: f64,
    pub rect: Rect,
}

impl TitleVisual {
    /// Center `text` horizontally on `root` and place it `gap` above it.
    #[must_use]
    pub fn above(text: &str, root: Rect, style: &SceneStyle) -> Self {
        let (width, height) = text_extent(text, style.title_font_size);
        let x = root.x - (width - root.width) / 2.0;
        let y = root.y - height - style.title_gap;
        Self {
            text: text.to_string(),
            font_size: style.title_font_size,
            rect: Rect::new(x, y, width, height),
        }
    }
}

/// Floating copy of the card being dragged.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GhostVisual {
    pub visible: bool,
    pub rect: Rect,
    pub content: Option<CardContent>,
    pub opacity: f64,
    pub z: i32,
}

/// Bar marking the sibling slot a drop would land in.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GapIndicator {
    pub visible: bool,
    pub rect: Rect,
}

/// One drawable item, borrowed from the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visual<'a> {
    Connector(&'a ConnectorVisual),
    Node {
        node: &'a NodeVisual,
        selected: bool,
    },
    Title(&'a TitleVisual),
    GapIndicator(&'a GapIndicator),
    Ghost(&'a GhostVisual),
}

impl Visual<'_> {
    /// Stable tag for logging and tests.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Connector(_) => "connector",
            Self::Node { .. } => "node",
            Self::Title(_) => "title",
            Self::GapIndicator(_) => "gap_indicator",
            Self::Ghost(_) => "ghost",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_without_spouse_or_note() {
        let s = CardSections::compute(&LayoutMetrics::default(), false, false);
        assert_eq!(s.title, Rect::new(0.0, 0.0, 200.0, 80.0));
        assert_eq!(s.name, Rect::new(0.0, 80.0, 200.0, 200.0));
        assert_eq!(s.spouse, None);
        assert_eq!(s.note, None);
    }

    #[test]
    fn sections_with_spouse_and_note() {
        let s = CardSections::compute(&LayoutMetrics::default(), true, true);
        assert_eq!(s.name, Rect::new(0.0, 80.0, 100.0, 180.0));
        assert_eq!(s.spouse, Some(Rect::new(100.0, 80.0, 100.0, 180.0)));
        assert_eq!(s.note, Some(Rect::new(0.0, 260.0, 200.0, 20.0)));
    }

    #[test]
    fn connector_is_an_elbow_with_arrow() {
        let parent = Rect::new(480.0, 0.0, 200.0, 280.0);
        let child = Rect::new(0.0, 320.0, 200.0, 280.0);
        let c = ConnectorVisual::between("p".into(), parent, "c".into(), child, 8.0);
        assert_eq!(
            c.path,
            vec![
                PathCommand::MoveTo(Point::new(580.0, 280.0)),
                PathCommand::LineTo(Point::new(580.0, 300.0)),
                PathCommand::LineTo(Point::new(100.0, 300.0)),
                PathCommand::LineTo(Point::new(100.0, 320.0)),
                PathCommand::LineTo(Point::new(92.0, 312.0)),
                PathCommand::MoveTo(Point::new(100.0, 320.0)),
                PathCommand::LineTo(Point::new(108.0, 312.0)),
            ]
        );
        assert_eq!(c.end(), Some(Point::new(100.0, 320.0)));
    }

    #[test]
    fn title_centers_above_root() {
        let root = Rect::new(480.0, 0.0, 200.0, 280.0);
        let t = TitleVisual::above("李家", root, &SceneStyle::default());
        assert_eq!(t.rect.width, 80.0);
        assert_eq!(t.rect.center_x(), root.center_x());
        assert_eq!(t.rect.bottom(), -40.0);
    }

    #[test]
    fn card_content_picks_fonts() {
        let person = Person::with_id("a")
            .with_name("欧阳明月")
            .with_spouse("王")
            .with_note("b. 1900");
        let content = CardContent::from_person(
            &person,
            &LayoutMetrics::default(),
            &SceneStyle::default(),
        );
        assert_eq!(content.vertical_name, "欧\n阳\n明\n月");
        assert_eq!(content.name_font, 16.0);
        assert_eq!(content.spouse_font, 20.0);
        assert_eq!(content.note_font, 10.0);
        assert!(content.sections.spouse.is_some());
    }
}
