#![forbid(unsafe_code)]

//! Drag-to-reorder among siblings.
//!
//! [`ReorderController`] turns a pointer press, motion, and release on a card
//! into a new child order for that card's parent.
//!
//! # State Machine
//!
//! ```text
//! Idle --begin--> Dragging --end/cancel--> Idle
//!                    |  ^
//!                    +--+ move_to (updates the proposed index)
//! ```
//!
//! # Invariants
//!
//! 1. The proposed index is `None` unless the pointer sits in a gap between
//!    (or beyond) sibling cards and dropping there would change the order.
//! 2. `end` commits at most one reorder; `cancel` never commits.
//! 3. After `end` or `cancel`, the ghost and gap indicator are hidden.
//!
//! Gap numbering: gap `0` lies before the first sibling, gap `i` between
//! siblings `i - 1` and `i`, and gap `len` after the last. Dropping into gap
//! `g` moves the card to index `g`, or `g - 1` when the gap lies after the
//! card's current position (the card's own slot closes up).

use kinfolk_core::{PersonId, Point, Rect};
use kinfolk_store::{Family, StoreError};

use crate::scene::Scene;
use crate::style::SceneStyle;
use crate::visual::CardContent;

/// Gesture state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        grabbed: PersonId,
        /// Pointer position relative to the grabbed card's top-left corner.
        pointer_offset: Point,
        /// Index the card would move to on release.
        proposed: Option<usize>,
    },
}

/// Which gap `x` falls into, or `None` when it lies over a sibling card.
///
/// `spans` are sibling rectangles in child order, left to right.
#[must_use]
pub fn resolve_gap(spans: &[Rect], x: f64) -> Option<usize> {
    let (first, last) = (spans.first()?, spans.last()?);
    if x < first.x {
        return Some(0);
    }
    if x >= last.right() {
        return Some(spans.len());
    }
    if spans.iter().any(|span| span.contains_x(x)) {
        return None;
    }
    spans
        .windows(2)
        .position(|pair| x >= pair[0].right() && x < pair[1].x)
        .map(|i| i + 1)
}

/// Target index for a drop into `gap`, `None` if the order would not change.
#[must_use]
pub fn gap_to_index(gap: usize, current: usize) -> Option<usize> {
    let index = if gap > current { gap - 1 } else { gap };
    (index != current).then_some(index)
}

/// Rectangle of the gap indicator bar for `gap`.
#[must_use]
pub fn gap_marker(spans: &[Rect], gap: usize, height: f64, style: &SceneStyle) -> Option<Rect> {
    let (first, last) = (spans.first()?, spans.last()?);
    let bar = style.gap_bar_width;
    let left = if gap == 0 {
        first.x - style.gap_edge_inset - bar
    } else if gap >= spans.len() {
        last.right() + style.gap_edge_inset
    } else {
        (spans[gap - 1].right() + spans[gap].x) / 2.0 - bar / 2.0
    };
    Some(Rect::new(left, first.y, bar, height))
}

/// Drives one drag gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct ReorderController {
    state: DragState,
}

impl ReorderController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Index the grabbed card would move to if released now.
    #[must_use]
    pub fn proposed(&self) -> Option<usize> {
        match &self.state {
            DragState::Dragging { proposed, .. } => *proposed,
            DragState::Idle => None,
        }
    }

    /// Start dragging the card `id`, grabbed at scene point `pointer`.
    ///
    /// Ignored (returns false) while another drag is active or when `id` has
    /// no card.
    pub fn begin(&mut self, scene: &Scene, id: &PersonId, pointer: Point) -> bool {
        if let DragState::Dragging { grabbed, .. } = &self.state {
            tracing::warn!(
                target: "kinfolk.scene",
                active = %grabbed,
                requested = %id,
                "drag already in progress; ignoring begin"
            );
            return false;
        }
        let Some(node) = scene.node(id) else {
            tracing::debug!(target: "kinfolk.scene", id = %id, "drag begin on unknown card");
            return false;
        };
        self.state = DragState::Dragging {
            grabbed: id.clone(),
            pointer_offset: pointer - node.rect.origin(),
            proposed: None,
        };
        tracing::debug!(target: "kinfolk.scene", id = %id, "drag started");
        true
    }

    /// Track the pointer: move the ghost and recompute the proposed index.
    pub fn move_to(
        &mut self,
        scene: &mut Scene,
        family: &Family,
        pointer: Point,
    ) -> Option<usize> {
        let DragState::Dragging {
            grabbed,
            pointer_offset,
            proposed,
        } = &mut self.state
        else {
            return None;
        };
        *proposed = None;

        let origin = pointer - *pointer_offset;
        if scene.ghost().visible {
            scene.move_ghost(origin);
        } else if let Some(person) = family.member(grabbed) {
            let content = CardContent::from_person(person, scene.metrics(), scene.style());
            let metrics = scene.metrics();
            let rect = Rect::at(origin, metrics.node_width, metrics.node_height);
            scene.show_ghost(content, rect);
        }

        let siblings = scene.siblings(family, grabbed);
        if siblings.len() <= 1 {
            return None;
        }
        let Some(current) = siblings.iter().position(|node| node.id == *grabbed) else {
            return None;
        };
        let spans: Vec<Rect> = siblings.iter().map(|node| node.rect).collect();

        let Some(gap) = resolve_gap(&spans, pointer.x) else {
            scene.hide_gap();
            return None;
        };
        let height = scene.metrics().node_height;
        if let Some(marker) = gap_marker(&spans, gap, height, scene.style()) {
            scene.show_gap(marker);
        }
        *proposed = gap_to_index(gap, current);
        *proposed
    }

    /// Finish the gesture, committing the proposed order if there is one.
    ///
    /// Returns the committed child order, or `None` when nothing moved.
    pub fn end(
        &mut self,
        scene: &mut Scene,
        family: &mut Family,
    ) -> Result<Option<Vec<PersonId>>, StoreError> {
        let state = std::mem::take(&mut self.state);
        scene.hide_ghost();
        scene.hide_gap();

        let DragState::Dragging {
            grabbed,
            proposed: Some(index),
            ..
        } = state
        else {
            return Ok(None);
        };
        let Some(parent) = family.parent_id(&grabbed).cloned() else {
            return Ok(None);
        };
        let mut order = family.siblings(&grabbed).to_vec();
        let Some(from) = order.iter().position(|id| id == &grabbed) else {
            return Ok(None);
        };
        order.remove(from);
        order.insert(index.min(order.len()), grabbed.clone());

        family.reorder_children(&parent, order.clone())?;
        tracing::debug!(
            target: "kinfolk.scene",
            id = %grabbed,
            from,
            to = index,
            "drag committed"
        );
        Ok(Some(order))
    }

    /// Abandon the gesture without committing. Returns false when idle.
    pub fn cancel(&mut self, scene: &mut Scene) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.state = DragState::Idle;
        scene.hide_ghost();
        scene.hide_gap();
        tracing::debug!(target: "kinfolk.scene", "drag cancelled");
        true
    }
}
