#![forbid(unsafe_code)]

//! Generation pass: layers top-down, subtree widths bottom-up.

use std::collections::VecDeque;

use kinfolk_core::{IntegrityCode, IntegrityIssue, PersonId, TreeShape};
use rustc_hash::FxHashMap;

/// Per-person output of [`measure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// Depth from the root (root = 0).
    pub layer: usize,
    /// Leaf units reserved by the subtree (minimum 1).
    pub subtree_width: usize,
    /// Parent through which this person was reached.
    pub parent: Option<PersonId>,
    /// Children accepted by the traversal, in order.
    pub children: Vec<PersonId>,
}

/// Layers and subtree widths for every person reachable from the root.
#[derive(Debug, Clone, Default)]
pub struct Generations {
    root: Option<PersonId>,
    order: Vec<PersonId>,
    entries: FxHashMap<PersonId, Generation>,
    layer_count: usize,
    issues: Vec<IntegrityIssue>,
}

impl Generations {
    /// Root id, or `None` when the root had no record.
    #[must_use]
    pub fn root(&self) -> Option<&PersonId> {
        self.root.as_ref()
    }

    /// Reached persons in breadth-first order.
    #[must_use]
    pub fn order(&self) -> &[PersonId] {
        &self.order
    }

    #[must_use]
    pub fn get(&self, id: &PersonId) -> Option<&Generation> {
        self.entries.get(id)
    }

    #[must_use]
    pub fn layer(&self, id: &PersonId) -> Option<usize> {
        self.entries.get(id).map(|g| g.layer)
    }

    #[must_use]
    pub fn subtree_width(&self, id: &PersonId) -> Option<usize> {
        self.entries.get(id).map(|g| g.subtree_width)
    }

    /// Number of distinct layers (0 for an empty result).
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

    /// Defects found during traversal.
    #[must_use]
    pub fn issues(&self) -> &[IntegrityIssue] {
        &self.issues
    }

    /// Iterate `(id, generation)` in breadth-first order.
    pub fn iter(&self) -> impl Iterator<Item = (&PersonId, &Generation)> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|g| (id, g)))
    }

    fn is_ancestor(&self, candidate: &PersonId, of: &PersonId) -> bool {
        let mut cursor = Some(of);
        while let Some(id) = cursor {
            if id == candidate {
                return true;
            }
            cursor = self.entries.get(id).and_then(|g| g.parent.as_ref());
        }
        false
    }
}

/// Compute layer and subtree width for every person reachable from the root.
///
/// The traversal is breadth-first and never revisits a person, so a cyclic
/// or shared child terminates with an issue instead of looping. Dangling
/// child references are recorded and skipped.
pub fn measure<S: TreeShape + ?Sized>(shape: &S) -> Generations {
    let root = shape.root().clone();
    let _span = tracing::debug_span!("layout.measure", root = %root).entered();

    let mut out = Generations::default();
    if !shape.contains(&root) {
        let issue = IntegrityIssue::new(
            IntegrityCode::MissingRoot,
            Some(root.clone()),
            None,
            format!("root {root} has no record"),
        );
        report(&issue);
        out.issues.push(issue);
        return out;
    }

    out.entries.insert(
        root.clone(),
        Generation {
            layer: 0,
            subtree_width: 1,
            parent: None,
            children: Vec::new(),
        },
    );
    out.root = Some(root.clone());

    let mut queue = VecDeque::from([root]);
    while let Some(id) = queue.pop_front() {
        let layer = out.entries.get(&id).map_or(0, |g| g.layer);
        out.layer_count = out.layer_count.max(layer + 1);
        let mut accepted: Vec<PersonId> = Vec::new();

        for child in shape.children(&id).unwrap_or_default() {
            if !shape.contains(child) {
                push_issue(
                    &mut out.issues,
                    IntegrityCode::MissingChild,
                    &id,
                    child,
                    format!("{id} lists missing child {child}"),
                );
                continue;
            }
            if accepted.contains(child) {
                push_issue(
                    &mut out.issues,
                    IntegrityCode::DuplicateChild,
                    &id,
                    child,
                    format!("{id} lists child {child} more than once"),
                );
                continue;
            }
            if out.entries.contains_key(child) {
                let code = if out.is_ancestor(child, &id) {
                    IntegrityCode::CycleDetected
                } else {
                    IntegrityCode::MultipleParents
                };
                push_issue(
                    &mut out.issues,
                    code,
                    child,
                    &id,
                    format!("{child} reached again through {id}"),
                );
                continue;
            }
            out.entries.insert(
                child.clone(),
                Generation {
                    layer: layer + 1,
                    subtree_width: 1,
                    parent: Some(id.clone()),
                    children: Vec::new(),
                },
            );
            accepted.push(child.clone());
            queue.push_back(child.clone());
        }

        if let Some(entry) = out.entries.get_mut(&id) {
            entry.children = accepted;
        }
        out.order.push(id);
    }

    // Children follow their parent in BFS order, so a reverse sweep sees every
    // child's final width before the parent sums it.
    for id in out.order.iter().rev() {
        let sum: usize = match out.entries.get(id) {
            Some(entry) => entry
                .children
                .iter()
                .filter_map(|c| out.entries.get(c))
                .map(|c| c.subtree_width)
                .sum(),
            None => continue,
        };
        if let Some(entry) = out.entries.get_mut(id) {
            entry.subtree_width = sum.max(1);
        }
    }

    tracing::debug!(
        target: "kinfolk.layout",
        persons = out.order.len(),
        layers = out.layer_count,
        issues = out.issues.len(),
        "generations measured"
    );
    out
}

fn push_issue(
    issues: &mut Vec<IntegrityIssue>,
    code: IntegrityCode,
    person: &PersonId,
    related: &PersonId,
    message: String,
) {
    let issue = IntegrityIssue::new(code, Some(person.clone()), Some(related.clone()), message);
    report(&issue);
    issues.push(issue);
}

fn report(issue: &IntegrityIssue) {
    tracing::warn!(
        target: "kinfolk.layout",
        code = %issue.code,
        person = ?issue.person.as_ref().map(PersonId::as_str),
        "{}",
        issue.message
    );
}
