#![forbid(unsafe_code)]

//! SVG export.
//!
//! [`SvgRenderer`] walks [`Scene::visuals`] once and matches on each
//! [`Visual`]; every visual kind is drawn by exactly one arm.

use std::fmt::Write as _;

use kinfolk_core::Rect;

use crate::scene::Scene;
use crate::style::SceneStyle;
use crate::text::LINE_HEIGHT;
use crate::visual::{
    CardContent, ConnectorVisual, GapIndicator, GhostVisual, NodeVisual, PathCommand,
    TitleVisual, Visual,
};

/// Renders a scene as a standalone SVG document.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgRenderer {
    /// Output scale; 1.0 maps one scene pixel to one SVG unit.
    pub scale: f64,
    /// Margin around the scene bounds, in scene pixels.
    pub padding: f64,
    /// Draw the drag ghost and gap indicator if visible.
    pub include_feedback: bool,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            scale: 1.0,
            padding: 20.0,
            include_feedback: false,
        }
    }
}

fn esc(value: &str) -> String {
    v_htmlescape::escape(value).to_string()
}

impl SvgRenderer {
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_feedback(mut self, include: bool) -> Self {
        self.include_feedback = include;
        self
    }

    #[must_use]
    pub fn render(&self, scene: &Scene) -> String {
        let _span = tracing::debug_span!("scene.export_svg", nodes = scene.len()).entered();
        let style = scene.style();
        let bounds = scene.bounds();
        let view = Rect::new(
            bounds.x - self.padding,
            bounds.y - self.padding,
            bounds.width + 2.0 * self.padding,
            bounds.height + 2.0 * self.padding,
        );

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\" width=\"{}\" height=\"{}\" font-family=\"{}\">",
            view.x,
            view.y,
            view.width,
            view.height,
            view.width * self.scale,
            view.height * self.scale,
            esc(&style.font_family)
        );
        let _ = writeln!(
            svg,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            view.x,
            view.y,
            view.width,
            view.height,
            esc(&style.background)
        );

        for visual in scene.visuals() {
            self.draw(&mut svg, &visual, style);
        }
        svg.push_str("</svg>\n");
        svg
    }

    fn draw(&self, out: &mut String, visual: &Visual<'_>, style: &SceneStyle) {
        match visual {
            Visual::Connector(connector) => draw_connector(out, connector, style),
            Visual::Node { node, selected } => draw_node(out, node, *selected, style),
            Visual::Title(title) => draw_title(out, title, style),
            Visual::GapIndicator(gap) if self.include_feedback => draw_gap(out, gap, style),
            Visual::Ghost(ghost) if self.include_feedback => draw_ghost(out, ghost, style),
            Visual::GapIndicator(_) | Visual::Ghost(_) => {}
        }
    }
}

fn draw_connector(out: &mut String, connector: &ConnectorVisual, style: &SceneStyle) {
    let mut d = String::new();
    for command in &connector.path {
        let (op, p) = match command {
            PathCommand::MoveTo(p) => ('M', p),
            PathCommand::LineTo(p) => ('L', p),
        };
        let _ = write!(d, "{op}{} {} ", p.x, p.y);
    }
    let _ = writeln!(
        out,
        "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1\"/>",
        d.trim_end(),
        esc(&style.card_color)
    );
}

fn draw_node(out: &mut String, node: &NodeVisual, selected: bool, style: &SceneStyle) {
    let color = if selected {
        &style.active_color
    } else {
        &style.card_color
    };
    let _ = writeln!(out, "<g data-id=\"{}\">", esc(node.id.as_str()));
    draw_card(out, node.rect, &node.content, color);
    out.push_str("</g>\n");
}

fn draw_card(out: &mut String, rect: Rect, content: &CardContent, color: &str) {
    let sections = &content.sections;
    let areas = [
        Some(sections.title),
        Some(sections.name),
        sections.spouse,
        sections.note,
    ];
    for local in areas.into_iter().flatten() {
        let r = local.translate(rect.origin());
        let _ = writeln!(
            out,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"{}\"/>",
            r.x,
            r.y,
            r.width,
            r.height,
            esc(color)
        );
    }

    let title = sections.title.translate(rect.origin());
    draw_text_block(out, title, &content.title, content.title_font, color);
    let name = sections.name.translate(rect.origin());
    draw_text_block(out, name, &content.vertical_name, content.name_font, color);
    if let Some(spouse) = sections.spouse {
        let spouse = spouse.translate(rect.origin());
        draw_text_block(
            out,
            spouse,
            &content.vertical_spouse,
            content.spouse_font,
            color,
        );
    }
    if let Some(note) = sections.note {
        let note = note.translate(rect.origin());
        draw_text_block(out, note, &content.note, content.note_font, color);
    }
}

/// Multi-line text centered in `area`, one `<tspan>` per line.
fn draw_text_block(out: &mut String, area: Rect, text: &str, font_size: f64, color: &str) {
    if text.is_empty() {
        return;
    }
    let lines: Vec<&str> = text.split('\n').collect();
    let line_height = font_size * LINE_HEIGHT;
    let block = line_height * lines.len() as f64;
    let first_baseline = area.center_y() - block / 2.0 + font_size;
    let cx = area.center_x();

    let _ = write!(
        out,
        "<text x=\"{cx}\" y=\"{first_baseline}\" font-size=\"{font_size}\" text-anchor=\"middle\" fill=\"{}\">",
        esc(color)
    );
    for (i, line) in lines.iter().enumerate() {
        let dy = if i == 0 { 0.0 } else { line_height };
        let _ = write!(out, "<tspan x=\"{cx}\" dy=\"{dy}\">{}</tspan>", esc(line));
    }
    out.push_str("</text>\n");
}

fn draw_title(out: &mut String, title: &TitleVisual, style: &SceneStyle) {
    draw_text_block(
        out,
        title.rect,
        &title.text,
        title.font_size,
        &style.card_color,
    );
}

fn draw_gap(out: &mut String, gap: &GapIndicator, style: &SceneStyle) {
    let r = gap.rect;
    let _ = writeln!(
        out,
        "<rect class=\"gap\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
        r.x,
        r.y,
        r.width,
        r.height,
        esc(&style.active_color)
    );
}

fn draw_ghost(out: &mut String, ghost: &GhostVisual, style: &SceneStyle) {
    let Some(content) = &ghost.content else {
        return;
    };
    let _ = writeln!(out, "<g class=\"ghost\" opacity=\"{}\">", ghost.opacity);
    draw_card(out, ghost.rect, content, &style.active_color);
    out.push_str("</g>\n");
}
