#![forbid(unsafe_code)]

//! Scene projection.
//!
//! A [`Scene`] turns a [`TreeLayout`] plus the family's person records into
//! card, connector, and title visuals. Every relayout discards all node and
//! connector visuals and rebuilds them; a member update only refreshes that
//! member's card content in place.
//!
//! The drag ghost and the gap indicator are singletons owned by the scene and
//! reused across gestures; the reorder controller shows and hides them.

use ahash::AHashMap;
use kinfolk_core::{FamilyEvent, Person, PersonId, Point, Rect};
use kinfolk_layout::{LayoutMetrics, TreeLayout};
use kinfolk_store::{Family, FamilyObserver};

use crate::style::SceneStyle;
use crate::visual::{
    CardContent, ConnectorVisual, GapIndicator, GhostVisual, NodeVisual, TitleVisual, Visual,
};

/// Visual state of one family tree.
#[derive(Debug, Clone)]
pub struct Scene {
    metrics: LayoutMetrics,
    style: SceneStyle,
    nodes: AHashMap<PersonId, NodeVisual>,
    /// Paint order of nodes (breadth-first).
    order: Vec<PersonId>,
    connectors: Vec<ConnectorVisual>,
    title: Option<TitleVisual>,
    ghost: GhostVisual,
    gap: GapIndicator,
    selected: Option<PersonId>,
    bounds: Rect,
    rebuilds: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(LayoutMetrics::default(), SceneStyle::default())
    }
}

impl Scene {
    #[must_use]
    pub fn new(metrics: LayoutMetrics, style: SceneStyle) -> Self {
        let ghost = GhostVisual {
            opacity: style.ghost_opacity,
            z: style.ghost_z,
            ..GhostVisual::default()
        };
        Self {
            metrics,
            style,
            nodes: AHashMap::new(),
            order: Vec::new(),
            connectors: Vec::new(),
            title: None,
            ghost,
            gap: GapIndicator::default(),
            selected: None,
            bounds: Rect::default(),
            rebuilds: 0,
        }
    }

    /// Discard every node and connector and rebuild from `layout`.
    ///
    /// Also hides drag feedback and drops a selection whose person is gone.
    pub fn rebuild(&mut self, family: &Family, layout: &TreeLayout) {
        let _span = tracing::debug_span!("scene.rebuild", persons = layout.len()).entered();

        self.nodes.clear();
        self.order.clear();
        self.connectors.clear();
        self.hide_ghost();
        self.hide_gap();

        for placement in layout.iter() {
            let Some(person) = family.member(&placement.id) else {
                tracing::warn!(
                    target: "kinfolk.scene",
                    id = %placement.id,
                    "placed person has no record"
                );
                continue;
            };
            let node = NodeVisual::new(person, placement, &self.metrics, &self.style);

            if let Some(parent) = &placement.parent
                && let Some(parent_node) = self.nodes.get(parent)
            {
                self.connectors.push(ConnectorVisual::between(
                    parent.clone(),
                    parent_node.rect,
                    node.id.clone(),
                    node.rect,
                    self.style.arrow_size,
                ));
            }
            self.order.push(node.id.clone());
            self.nodes.insert(node.id.clone(), node);
        }

        if let Some(selected) = &self.selected
            && !self.nodes.contains_key(selected)
        {
            self.selected = None;
        }
        self.refresh_title(family.title());
        self.rebuilds += 1;

        tracing::debug!(
            target: "kinfolk.scene",
            nodes = self.nodes.len(),
            connectors = self.connectors.len(),
            "scene rebuilt"
        );
    }

    /// Refresh one card's content in place. Returns false for an unknown id.
    pub fn refresh_member(&mut self, person: &Person) -> bool {
        let Some(node) = self.nodes.get_mut(&person.id) else {
            tracing::warn!(
                target: "kinfolk.scene",
                id = %person.id,
                "updated member has no visual"
            );
            return false;
        };
        node.content = CardContent::from_person(person, &self.metrics, &self.style);
        true
    }

    /// Re-center the family title over the root card.
    pub fn refresh_title(&mut self, text: &str) {
        let root = self.order.first().and_then(|id| self.nodes.get(id));
        self.title = root.map(|root| TitleVisual::above(text, root.rect, &self.style));
        self.recompute_bounds();
    }

    fn recompute_bounds(&mut self) {
        let mut bounds = self
            .nodes
            .values()
            .fold(Rect::default(), |acc, node| acc.union(&node.rect));
        if let Some(title) = &self.title {
            bounds = bounds.union(&title.rect);
        }
        self.bounds = bounds;
    }

    #[must_use]
    pub fn node(&self, id: &PersonId) -> Option<&NodeVisual> {
        self.nodes.get(id)
    }

    /// Nodes in paint order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeVisual> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    #[must_use]
    pub fn connectors(&self) -> &[ConnectorVisual] {
        &self.connectors
    }

    #[must_use]
    pub fn title(&self) -> Option<&TitleVisual> {
        self.title.as_ref()
    }

    #[must_use]
    pub fn ghost(&self) -> &GhostVisual {
        &self.ghost
    }

    #[must_use]
    pub fn gap_indicator(&self) -> &GapIndicator {
        &self.gap
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Visuals of `id`'s siblings in child order, `id` included.
    ///
    /// Empty for the root.
    #[must_use]
    pub fn siblings(&self, family: &Family, id: &PersonId) -> Vec<&NodeVisual> {
        family
            .siblings(id)
            .iter()
            .filter_map(|sibling| self.nodes.get(sibling))
            .collect()
    }

    /// Position of `id` among its sibling visuals.
    #[must_use]
    pub fn index_in_siblings(&self, family: &Family, id: &PersonId) -> Option<usize> {
        self.siblings(family, id)
            .iter()
            .position(|node| &node.id == id)
    }

    /// Topmost card under `point`.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<&PersonId> {
        self.order
            .iter()
            .rev()
            .find(|id| self.nodes.get(*id).is_some_and(|n| n.rect.contains(point)))
    }

    #[must_use]
    pub fn selected(&self) -> Option<&PersonId> {
        self.selected.as_ref()
    }

    /// Select `id`. Returns false (and leaves the selection) for an unknown id.
    pub fn select(&mut self, id: &PersonId) -> bool {
        if !self.nodes.contains_key(id) {
            return false;
        }
        self.selected = Some(id.clone());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Smallest rectangle containing every card and the title.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[must_use]
    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    #[must_use]
    pub fn style(&self) -> &SceneStyle {
        &self.style
    }

    /// Number of full rebuilds so far.
    #[must_use]
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Everything to draw, in paint order: connectors, cards, title, gap
    /// indicator, ghost.
    #[must_use]
    pub fn visuals(&self) -> Vec<Visual<'_>> {
        let mut out = Vec::with_capacity(self.connectors.len() + self.nodes.len() + 3);
        out.extend(self.connectors.iter().map(Visual::Connector));
        out.extend(self.nodes().map(|node| Visual::Node {
            node,
            selected: self.selected.as_ref() == Some(&node.id),
        }));
        if let Some(title) = &self.title {
            out.push(Visual::Title(title));
        }
        if self.gap.visible {
            out.push(Visual::GapIndicator(&self.gap));
        }
        if self.ghost.visible {
            out.push(Visual::Ghost(&self.ghost));
        }
        out
    }

    pub(crate) fn show_ghost(&mut self, content: CardContent, rect: Rect) {
        self.ghost.visible = true;
        self.ghost.rect = rect;
        self.ghost.content = Some(content);
    }

    pub(crate) fn move_ghost(&mut self, origin: Point) {
        self.ghost.rect = Rect::at(origin, self.ghost.rect.width, self.ghost.rect.height);
    }

    pub(crate) fn hide_ghost(&mut self) {
        self.ghost.visible = false;
    }

    pub(crate) fn show_gap(&mut self, rect: Rect) {
        self.gap.visible = true;
        self.gap.rect = rect;
    }

    pub(crate) fn hide_gap(&mut self) {
        self.gap.visible = false;
    }
}

impl FamilyObserver for Scene {
    fn on_family_event(&mut self, family: &Family, event: &FamilyEvent) {
        match event {
            FamilyEvent::Relayouted => {
                let layout = kinfolk_layout::place(family.generations(), &self.metrics);
                self.rebuild(family, &layout);
            }
            FamilyEvent::MemberUpdated(id) => {
                if let Some(person) = family.member(id) {
                    self.refresh_member(person);
                }
            }
            FamilyEvent::TitleChanged => self.refresh_title(family.title()),
            FamilyEvent::Cleared => self.clear_selection(),
            FamilyEvent::DirtyChanged(_) => {}
        }
    }
}
