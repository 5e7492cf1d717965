#![forbid(unsafe_code)]

//! The mutable family tree.

use std::collections::BTreeMap;
use std::mem;

use kinfolk_core::{
    FamilyEvent, IntegrityIssue, IntegrityReport, LayoutSlot, Person, PersonId, TreeShape,
};

use kinfolk_layout::Generations;

use crate::error::{Result, StoreError};
use crate::integrity::build_report;
use crate::observer::FamilyObserver;

/// Owner of every person record and the links between them.
///
/// Members are kept in an id-ordered map; relationships are id lists on the
/// records. Every structural edit is validated before anything changes, then
/// relayouts the whole tree and queues [`FamilyEvent`]s for observers.
#[derive(Debug, Clone)]
pub struct Family {
    pub(crate) root_id: PersonId,
    pub(crate) title: String,
    pub(crate) members: BTreeMap<PersonId, Person>,
    pub(crate) dirty: bool,
    pub(crate) events: Vec<FamilyEvent>,
    pub(crate) generations: Generations,
}

impl Default for Family {
    fn default() -> Self {
        Self::new()
    }
}

impl Family {
    /// A clean family holding one blank root.
    ///
    /// The initial [`FamilyEvent::Relayouted`] stays queued, so the first
    /// dispatch builds any observer attached afterwards.
    #[must_use]
    pub fn new() -> Self {
        let mut family = Self {
            root_id: PersonId::default(),
            title: String::new(),
            members: BTreeMap::new(),
            dirty: false,
            events: Vec::new(),
            generations: Generations::default(),
        };
        family.clear();
        family.dirty = false;
        family.events = vec![FamilyEvent::Relayouted];
        family
    }

    /// Discard every member and start over with a fresh blank root.
    ///
    /// The title is kept.
    pub fn clear(&mut self) {
        let root = Person::new();
        self.root_id = root.id.clone();
        self.members.clear();
        self.members.insert(root.id.clone(), root);
        self.events.push(FamilyEvent::Cleared);
        self.relayout();
        self.set_dirty(true);
    }

    /// Recompute layer and subtree width for every member.
    ///
    /// Returns the defects the pass found; each has already been logged.
    pub fn relayout(&mut self) -> Vec<IntegrityIssue> {
        let _span =
            tracing::debug_span!("family.relayout", members = self.members.len()).entered();
        let generations = kinfolk_layout::measure(&*self);

        for person in self.members.values_mut() {
            person.clear_layout();
        }
        for (id, generation) in generations.iter() {
            if let Some(person) = self.members.get_mut(id) {
                person.layout = LayoutSlot {
                    layer: generation.layer,
                    subtree_width: generation.subtree_width,
                };
            }
        }

        let unreached = self.members.len().saturating_sub(generations.len());
        if unreached > 0 {
            tracing::warn!(
                target: "kinfolk.store",
                unreached,
                "members not reachable from the root keep default layout"
            );
        }
        tracing::debug!(
            target: "kinfolk.store",
            members = self.members.len(),
            layers = generations.layer_count(),
            "family relayouted"
        );

        let issues = generations.issues().to_vec();
        self.generations = generations;
        self.events.push(FamilyEvent::Relayouted);
        issues
    }

    /// Generations computed by the last [`Family::relayout`].
    ///
    /// Placement reads these directly instead of walking the tree again.
    #[inline]
    #[must_use]
    pub fn generations(&self) -> &Generations {
        &self.generations
    }

    /// Append `person` as the last child of `parent_id`.
    ///
    /// The person must carry a fresh, non-empty id and no children.
    pub fn add_child(&mut self, parent_id: &PersonId, mut person: Person) -> Result<()> {
        if !person.is_valid() {
            return Err(StoreError::invalid("new child has an empty id"));
        }
        if !person.children.is_empty() {
            return Err(StoreError::invalid(format!(
                "new child {} already has children",
                person.id
            )));
        }
        if self.members.contains_key(&person.id) {
            return Err(StoreError::DuplicateId(person.id));
        }
        let Some(parent) = self.members.get_mut(parent_id) else {
            return Err(StoreError::InvalidParent(parent_id.clone()));
        };

        person.parent_id = Some(parent_id.clone());
        person.index_as_child = parent.children.len();
        person.clear_layout();
        parent.children.push(person.id.clone());

        tracing::debug!(
            target: "kinfolk.store",
            parent = %parent_id,
            child = %person.id,
            index = person.index_as_child,
            "child added"
        );
        self.members.insert(person.id.clone(), person);
        self.relayout();
        self.set_dirty(true);
        Ok(())
    }

    /// Replace the stored record with `person`, matched by id.
    ///
    /// Display fields are taken verbatim. Layout values of the stored record
    /// are carried over; no relayout happens.
    pub fn update_member(&mut self, mut person: Person) -> Result<()> {
        if !person.is_valid() {
            return Err(StoreError::invalid("updated member has an empty id"));
        }
        let Some(stored) = self.members.get_mut(&person.id) else {
            return Err(StoreError::invalid(format!(
                "{} is not a member of this family",
                person.id
            )));
        };

        if !stored.same_links(&person) {
            tracing::warn!(
                target: "kinfolk.store",
                id = %person.id,
                "member update changes parent or children; layout is not recomputed"
            );
        }
        person.layout = stored.layout;
        *stored = person;

        let id = stored.id.clone();
        self.events.push(FamilyEvent::MemberUpdated(id));
        self.set_dirty(true);
        Ok(())
    }

    /// Replace the child order of `parent_id`.
    ///
    /// `new_order` must be a permutation of the current children.
    pub fn reorder_children(
        &mut self,
        parent_id: &PersonId,
        new_order: Vec<PersonId>,
    ) -> Result<()> {
        let Some(parent) = self.members.get_mut(parent_id) else {
            return Err(StoreError::InvalidParent(parent_id.clone()));
        };
        if !is_permutation(&parent.children, &new_order) {
            return Err(StoreError::OrderMismatch {
                parent: parent_id.clone(),
            });
        }
        parent.children = new_order;

        let order = parent.children.clone();
        for (index, child) in order.iter().enumerate() {
            if let Some(person) = self.members.get_mut(child) {
                person.index_as_child = index;
            }
        }
        tracing::debug!(
            target: "kinfolk.store",
            parent = %parent_id,
            children = order.len(),
            "children reordered"
        );

        self.relayout();
        self.set_dirty(true);
        Ok(())
    }

    /// Set the family title. A no-op when unchanged.
    pub fn update_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        if title == self.title {
            return;
        }
        self.title = title;
        self.events.push(FamilyEvent::TitleChanged);
        self.set_dirty(true);
    }

    /// Set the unsaved-changes flag, queueing an event only on change.
    pub fn set_dirty(&mut self, dirty: bool) {
        if self.dirty == dirty {
            return;
        }
        self.dirty = dirty;
        self.events.push(FamilyEvent::DirtyChanged(dirty));
    }

    /// Clear the unsaved-changes flag after a successful save.
    pub fn mark_saved(&mut self) {
        self.set_dirty(false);
    }

    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<FamilyEvent> {
        mem::take(&mut self.events)
    }

    /// Events queued since the last drain.
    #[must_use]
    pub fn pending_events(&self) -> &[FamilyEvent] {
        &self.events
    }

    /// Drain queued events and hand each to every observer in turn.
    ///
    /// Returns the number of events delivered.
    pub fn dispatch(&mut self, observers: &mut [&mut dyn FamilyObserver]) -> usize {
        let events = self.drain_events();
        for event in &events {
            for observer in observers.iter_mut() {
                observer.on_family_event(self, event);
            }
        }
        events.len()
    }

    #[must_use]
    pub fn member(&self, id: &PersonId) -> Option<&Person> {
        self.members.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &PersonId) -> bool {
        self.members.contains_key(id)
    }

    /// Parent of `id`, `None` for the root or an unknown id.
    #[must_use]
    pub fn parent_id(&self, id: &PersonId) -> Option<&PersonId> {
        self.members.get(id).and_then(|p| p.parent_id.as_ref())
    }

    #[inline]
    #[must_use]
    pub fn root_id(&self) -> &PersonId {
        &self.root_id
    }

    #[must_use]
    pub fn root(&self) -> Option<&Person> {
        self.members.get(&self.root_id)
    }

    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in id order.
    pub fn members(&self) -> impl Iterator<Item = &Person> {
        self.members.values()
    }

    /// The ordered children of `id`'s parent, `id` included.
    ///
    /// Empty for the root and for unknown ids.
    #[must_use]
    pub fn siblings(&self, id: &PersonId) -> &[PersonId] {
        self.parent_id(id)
            .and_then(|parent| self.members.get(parent))
            .map_or(&[], |parent| parent.children.as_slice())
    }

    /// Position of `id` among its siblings.
    #[must_use]
    pub fn index_in_siblings(&self, id: &PersonId) -> Option<usize> {
        self.siblings(id).iter().position(|s| s == id)
    }

    /// Structural findings over the whole family.
    #[must_use]
    pub fn invariant_report(&self) -> IntegrityReport {
        build_report(self)
    }
}

impl TreeShape for Family {
    fn root(&self) -> &PersonId {
        &self.root_id
    }

    fn children(&self, id: &PersonId) -> Option<&[PersonId]> {
        self.members.get(id).map(|p| p.children.as_slice())
    }
}

fn is_permutation(current: &[PersonId], proposed: &[PersonId]) -> bool {
    if current.len() != proposed.len() {
        return false;
    }
    let mut a: Vec<&PersonId> = current.iter().collect();
    let mut b: Vec<&PersonId> = proposed.iter().collect();
    a.sort();
    b.sort();
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::EventLog;
    use kinfolk_core::IntegrityCode;

    fn named(name: &str) -> Person {
        Person::new().with_name(name)
    }

    #[test]
    fn new_family_is_clean_with_one_root() {
        let family = Family::new();
        assert_eq!(family.len(), 1);
        assert!(!family.is_dirty());
        assert_eq!(family.pending_events(), &[FamilyEvent::Relayouted]);
        assert_eq!(family.generations().layer(family.root_id()), Some(0));
        let root = family.root().unwrap();
        assert!(root.is_valid());
        assert_eq!(root.parent_id, None);
        assert_eq!(root.subtree_width(), 1);
    }

    #[test]
    fn add_child_to_leaf() {
        let mut family = Family::new();
        family.drain_events();
        let root = family.root_id().clone();
        let child = named("A");
        let child_id = child.id.clone();
        family.add_child(&root, child).unwrap();

        let stored = family.member(&child_id).unwrap();
        assert_eq!(stored.index_as_child, 0);
        assert_eq!(stored.parent_id.as_ref(), Some(&root));
        assert_eq!(stored.layer(), 1);
        assert_eq!(family.root().unwrap().children, vec![child_id]);
        assert!(family.is_dirty());
        assert_eq!(
            family.drain_events(),
            vec![FamilyEvent::Relayouted, FamilyEvent::DirtyChanged(true)]
        );
    }

    #[test]
    fn chain_keeps_unit_widths() {
        let mut family = Family::new();
        let root = family.root_id().clone();
        let a = named("A");
        let a_id = a.id.clone();
        family.add_child(&root, a).unwrap();
        let b = named("B");
        let b_id = b.id.clone();
        family.add_child(&a_id, b).unwrap();

        for id in [&root, &a_id, &b_id] {
            assert_eq!(family.member(id).unwrap().subtree_width(), 1);
        }
        assert_eq!(family.member(&b_id).unwrap().layer(), 2);
    }

    #[test]
    fn add_child_rejects_bad_input() {
        let mut family = Family::new();
        let root = family.root_id().clone();

        let err = family
            .add_child(&PersonId::from("nobody"), named("x"))
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidParent(_)));

        let err = family.add_child(&root, Person::default()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidMember(_)));

        let mut with_kids = named("k");
        with_kids.children.push(PersonId::from("z"));
        let err = family.add_child(&root, with_kids).unwrap_err();
        assert!(matches!(err, StoreError::InvalidMember(_)));

        let dup = Person::with_id(root.clone());
        let err = family.add_child(&root, dup).unwrap_err();
        assert_eq!(err, StoreError::DuplicateId(root.clone()));

        assert_eq!(family.len(), 1);
        assert!(!family.is_dirty());
    }

    #[test]
    fn update_member_keeps_layout_and_skips_relayout() {
        let mut family = Family::new();
        let root = family.root_id().clone();
        let child = named("A");
        let id = child.id.clone();
        family.add_child(&root, child).unwrap();
        family.drain_events();

        let mut edited = family.member(&id).unwrap().clone();
        edited.name = "Renamed".into();
        edited.note = "note".into();
        edited.clear_layout();
        family.update_member(edited).unwrap();

        let stored = family.member(&id).unwrap();
        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.layer(), 1);
        assert_eq!(
            family.drain_events(),
            vec![FamilyEvent::MemberUpdated(id)]
        );
    }

    #[test]
    fn update_member_rejects_unknown_or_empty() {
        let mut family = Family::new();
        assert!(matches!(
            family.update_member(Person::default()),
            Err(StoreError::InvalidMember(_))
        ));
        assert!(matches!(
            family.update_member(named("stranger")),
            Err(StoreError::InvalidMember(_))
        ));
    }

    #[test]
    fn reorder_rewrites_indices() {
        let mut family = Family::new();
        let root = family.root_id().clone();
        let ids: Vec<PersonId> = ["A", "B", "C"]
            .iter()
            .map(|n| {
                let p = named(n);
                let id = p.id.clone();
                family.add_child(&root, p).unwrap();
                id
            })
            .collect();

        let reversed: Vec<PersonId> = ids.iter().rev().cloned().collect();
        family.reorder_children(&root, reversed.clone()).unwrap();
        assert_eq!(family.root().unwrap().children, reversed);
        for (index, id) in reversed.iter().enumerate() {
            assert_eq!(family.member(id).unwrap().index_as_child, index);
            assert_eq!(family.index_in_siblings(id), Some(index));
        }
        assert!(family.invariant_report().is_clean());
    }

    #[test]
    fn reorder_rejects_non_permutations() {
        let mut family = Family::new();
        let root = family.root_id().clone();
        let a = named("A");
        let a_id = a.id.clone();
        family.add_child(&root, a).unwrap();
        family.add_child(&root, named("B")).unwrap();

        let err = family
            .reorder_children(&root, vec![a_id.clone(), a_id.clone()])
            .unwrap_err();
        assert!(matches!(err, StoreError::OrderMismatch { .. }));
        let err = family
            .reorder_children(&root, vec![a_id.clone()])
            .unwrap_err();
        assert!(matches!(err, StoreError::OrderMismatch { .. }));
        let err = family
            .reorder_children(&PersonId::from("nope"), vec![])
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidParent(_)));
    }

    #[test]
    fn title_and_dirty_events() {
        let mut family = Family::new();
        family.drain_events();
        family.update_title("The Lis");
        family.update_title("The Lis");
        assert_eq!(family.title(), "The Lis");
        assert_eq!(
            family.drain_events(),
            vec![FamilyEvent::TitleChanged, FamilyEvent::DirtyChanged(true)]
        );
        family.mark_saved();
        family.mark_saved();
        assert_eq!(family.drain_events(), vec![FamilyEvent::DirtyChanged(false)]);
    }

    #[test]
    fn clear_keeps_title_and_replaces_root() {
        let mut family = Family::new();
        family.update_title("T");
        let old_root = family.root_id().clone();
        family.add_child(&old_root, named("A")).unwrap();
        family.mark_saved();
        family.drain_events();

        family.clear();
        assert_eq!(family.len(), 1);
        assert_ne!(family.root_id(), &old_root);
        assert_eq!(family.title(), "T");
        assert!(family.is_dirty());
        assert_eq!(
            family.drain_events(),
            vec![
                FamilyEvent::Cleared,
                FamilyEvent::Relayouted,
                FamilyEvent::DirtyChanged(true)
            ]
        );
    }

    #[test]
    fn dispatch_feeds_every_observer() {
        let mut family = Family::new();
        family.drain_events();
        family.update_title("x");
        let mut log = EventLog::default();
        let mut titles = Vec::new();
        let mut closure = |f: &Family, e: &FamilyEvent| {
            if *e == FamilyEvent::TitleChanged {
                titles.push(f.title().to_string());
            }
        };
        let delivered = family.dispatch(&mut [
            &mut log as &mut dyn FamilyObserver,
            &mut closure as &mut dyn FamilyObserver,
        ]);
        assert_eq!(delivered, 2);
        assert_eq!(log.events.len(), 2);
        assert_eq!(titles, vec!["x".to_string()]);
        assert!(family.pending_events().is_empty());
    }

    #[test]
    fn first_dispatch_builds_a_fresh_observer() {
        let mut family = Family::new();
        let mut log = EventLog::default();
        assert_eq!(family.dispatch(&mut [&mut log]), 1);
        assert_eq!(log.events, vec![FamilyEvent::Relayouted]);
        assert_eq!(family.dispatch(&mut [&mut log]), 0);
    }

    #[test]
    fn relayout_keeps_generations_for_placement() {
        let mut family = Family::new();
        let root = family.root_id().clone();
        let a = named("A");
        let a_id = a.id.clone();
        family.add_child(&root, a).unwrap();
        family.add_child(&root, named("B")).unwrap();
        assert_eq!(family.generations().len(), 3);
        assert_eq!(family.generations().subtree_width(&root), Some(2));
        assert_eq!(family.generations().layer(&a_id), Some(1));

        let mut edited = family.member(&a_id).unwrap().clone();
        edited.parent_id = None;
        family.update_member(edited).unwrap();
        assert_eq!(family.generations().layer(&a_id), Some(1));
    }

    #[test]
    fn siblings_of_root_are_empty() {
        let family = Family::new();
        assert!(family.siblings(family.root_id()).is_empty());
        assert_eq!(family.index_in_siblings(family.root_id()), None);
    }

    #[test]
    fn structural_update_is_reported_by_integrity_check() {
        let mut family = Family::new();
        let root = family.root_id().clone();
        let child = named("A");
        let id = child.id.clone();
        family.add_child(&root, child).unwrap();

        let mut edited = family.member(&id).unwrap().clone();
        edited.parent_id = None;
        family.update_member(edited).unwrap();
        assert!(
            family
                .invariant_report()
                .contains(IntegrityCode::ParentMismatch)
        );
    }
}
