#![forbid(unsafe_code)]

//! Placement pass: generations to pixel rectangles.

use kinfolk_core::{PersonId, Rect};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::generations::Generations;
use crate::metrics::LayoutMetrics;

/// Where one person lands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub id: PersonId,
    pub layer: usize,
    /// Leaf units reserved by the subtree.
    pub units: usize,
    pub parent: Option<PersonId>,
    /// Left edge of the band reserved for the subtree.
    pub band_left: f64,
    /// Pixel width of the band.
    pub band_width: f64,
    /// Card rectangle, centered in the band.
    pub rect: Rect,
}

impl Placement {
    /// Right edge of the band (exclusive).
    #[inline]
    #[must_use]
    pub fn band_right(&self) -> f64 {
        self.band_left + self.band_width
    }
}

/// Pixel placement for every reached person.
#[derive(Debug, Clone, Default)]
pub struct TreeLayout {
    metrics: LayoutMetrics,
    order: Vec<PersonId>,
    placements: FxHashMap<PersonId, Placement>,
    layer_count: usize,
    bounds: Rect,
}

impl TreeLayout {
    #[must_use]
    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    /// Placed persons in breadth-first order.
    #[must_use]
    pub fn order(&self) -> &[PersonId] {
        &self.order
    }

    #[must_use]
    pub fn placement(&self, id: &PersonId) -> Option<&Placement> {
        self.placements.get(id)
    }

    #[must_use]
    pub fn rect(&self, id: &PersonId) -> Option<Rect> {
        self.placements.get(id).map(|p| p.rect)
    }

    /// Smallest rectangle containing every card.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Placements in breadth-first order.
    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.order.iter().filter_map(|id| self.placements.get(id))
    }

    /// Placements on one layer, left to right.
    pub fn layer(&self, layer: usize) -> impl Iterator<Item = &Placement> {
        self.iter().filter(move |p| p.layer == layer)
    }
}

/// Assign pixel rectangles from measured generations.
///
/// The root's band starts at x = 0. A parent's children share its band from
/// the left, each taking `band_width(units)` plus one `h_spacing`, and each
/// card is centered in its own band.
pub fn place(generations: &Generations, metrics: &LayoutMetrics) -> TreeLayout {
    let _span = tracing::debug_span!("layout.place", persons = generations.len()).entered();

    let mut layout = TreeLayout {
        metrics: *metrics,
        order: Vec::with_capacity(generations.len()),
        placements: FxHashMap::default(),
        layer_count: generations.layer_count(),
        bounds: Rect::default(),
    };

    if let Some(root) = generations.root()
        && let Some(entry) = generations.get(root)
    {
        let placement = make_placement(
            root.clone(),
            entry.layer,
            entry.subtree_width,
            None,
            0.0,
            metrics,
        );
        layout.placements.insert(root.clone(), placement);
    }

    for (id, entry) in generations.iter() {
        let Some(mut cursor) = layout.placements.get(id).map(|p| p.band_left) else {
            continue;
        };
        for child in &entry.children {
            let Some(child_entry) = generations.get(child) else {
                continue;
            };
            let placement = make_placement(
                child.clone(),
                child_entry.layer,
                child_entry.subtree_width,
                Some(id.clone()),
                cursor,
                metrics,
            );
            cursor = placement.band_right() + metrics.h_spacing;
            layout.placements.insert(child.clone(), placement);
        }
        layout.order.push(id.clone());
        if let Some(p) = layout.placements.get(id) {
            layout.bounds = layout.bounds.union(&p.rect);
        }
    }

    tracing::debug!(
        target: "kinfolk.layout",
        persons = layout.order.len(),
        width = layout.bounds.width,
        height = layout.bounds.height,
        "tree placed"
    );
    layout
}

fn make_placement(
    id: PersonId,
    layer: usize,
    units: usize,
    parent: Option<PersonId>,
    band_left: f64,
    metrics: &LayoutMetrics,
) -> Placement {
    let band_width = metrics.band_width(units);
    let x = band_left + (band_width - metrics.node_width) / 2.0;
    let y = layer as f64 * metrics.row_pitch();
    Placement {
        id,
        layer,
        units,
        parent,
        band_left,
        band_width,
        rect: Rect::new(x, y, metrics.node_width, metrics.node_height),
    }
}
