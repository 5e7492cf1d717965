#![forbid(unsafe_code)]

//! Structural integrity report over a [`Family`].

use std::collections::{BTreeMap, BTreeSet};

use kinfolk_core::{IntegrityCode, IntegrityIssue, IntegrityReport, Person, PersonId};

use crate::family::Family;

fn push_issue(
    issues: &mut Vec<IntegrityIssue>,
    code: IntegrityCode,
    person: Option<&PersonId>,
    related: Option<&PersonId>,
    message: impl Into<String>,
) {
    issues.push(IntegrityIssue::new(
        code,
        person.cloned(),
        related.cloned(),
        message,
    ));
}

fn dfs_collect_cycles_and_reachable(
    id: &PersonId,
    members: &BTreeMap<PersonId, Person>,
    visiting: &mut BTreeSet<PersonId>,
    visited: &mut BTreeSet<PersonId>,
    cycle_nodes: &mut BTreeSet<PersonId>,
) {
    if visiting.contains(id) {
        cycle_nodes.insert(id.clone());
        return;
    }
    if !visited.insert(id.clone()) {
        return;
    }

    visiting.insert(id.clone());
    if let Some(person) = members.get(id) {
        for child in &person.children {
            if members.contains_key(child) {
                dfs_collect_cycles_and_reachable(child, members, visiting, visited, cycle_nodes);
            }
        }
    }
    visiting.remove(id);
}

pub(crate) fn build_report(family: &Family) -> IntegrityReport {
    let members = &family.members;
    let root_id = &family.root_id;
    let mut issues = Vec::new();

    match members.get(root_id) {
        None => push_issue(
            &mut issues,
            IntegrityCode::MissingRoot,
            Some(root_id),
            None,
            format!("root {root_id} is missing"),
        ),
        Some(root) => {
            if let Some(parent) = &root.parent_id {
                push_issue(
                    &mut issues,
                    IntegrityCode::RootHasParent,
                    Some(root_id),
                    Some(parent),
                    format!("root {root_id} must not have parent {parent}"),
                );
            }
        }
    }

    let mut expected_parents: BTreeMap<&PersonId, &PersonId> = BTreeMap::new();
    for person in members.values() {
        if let Some(parent) = &person.parent_id
            && !members.contains_key(parent)
        {
            push_issue(
                &mut issues,
                IntegrityCode::MissingParent,
                Some(&person.id),
                Some(parent),
                format!("{} references missing parent {parent}", person.id),
            );
        }

        let mut seen = BTreeSet::new();
        for (index, child) in person.children.iter().enumerate() {
            if !seen.insert(child) {
                push_issue(
                    &mut issues,
                    IntegrityCode::DuplicateChild,
                    Some(&person.id),
                    Some(child),
                    format!("{} lists child {child} more than once", person.id),
                );
                continue;
            }
            let Some(record) = members.get(child) else {
                push_issue(
                    &mut issues,
                    IntegrityCode::MissingChild,
                    Some(&person.id),
                    Some(child),
                    format!("{} references missing child {child}", person.id),
                );
                continue;
            };

            if let Some(first_parent) = expected_parents.insert(child, &person.id)
                && first_parent != &person.id
            {
                push_issue(
                    &mut issues,
                    IntegrityCode::MultipleParents,
                    Some(child),
                    Some(&person.id),
                    format!(
                        "{child} is listed by both {first_parent} and {}",
                        person.id
                    ),
                );
            }

            if record.parent_id.as_ref() == Some(&person.id) && record.index_as_child != index {
                push_issue(
                    &mut issues,
                    IntegrityCode::IndexMismatch,
                    Some(child),
                    Some(&person.id),
                    format!(
                        "{child} records index {} but sits at {index}",
                        record.index_as_child
                    ),
                );
            }
        }
    }

    for person in members.values() {
        if &person.id == root_id {
            continue;
        }
        let expected = expected_parents.get(&person.id).copied();
        if person.parent_id.as_ref() != expected {
            push_issue(
                &mut issues,
                IntegrityCode::ParentMismatch,
                Some(&person.id),
                expected,
                format!(
                    "{} parent mismatch: listed by {:?}, records {:?}",
                    person.id,
                    expected.map(PersonId::as_str),
                    person.parent_id.as_ref().map(PersonId::as_str)
                ),
            );
        }
    }

    if members.contains_key(root_id) {
        let mut visiting = BTreeSet::new();
        let mut visited = BTreeSet::new();
        let mut cycle_nodes = BTreeSet::new();
        dfs_collect_cycles_and_reachable(
            root_id,
            members,
            &mut visiting,
            &mut visited,
            &mut cycle_nodes,
        );

        for id in &cycle_nodes {
            push_issue(
                &mut issues,
                IntegrityCode::CycleDetected,
                Some(id),
                None,
                format!("cycle detected at {id}"),
            );
        }
        for id in members.keys() {
            if !visited.contains(id) {
                push_issue(
                    &mut issues,
                    IntegrityCode::UnreachableNode,
                    Some(id),
                    None,
                    format!("{id} is unreachable from the root"),
                );
            }
        }
    }

    issues.sort_by(|left, right| {
        (left.code, &left.person, &left.related, &left.message).cmp(&(
            right.code,
            &right.person,
            &right.related,
            &right.message,
        ))
    });

    IntegrityReport { issues }
}

/// Log every finding at warn level.
pub(crate) fn log_report(report: &IntegrityReport) {
    for issue in &report.issues {
        tracing::warn!(
            target: "kinfolk.store",
            code = %issue.code,
            person = ?issue.person.as_ref().map(PersonId::as_str),
            related = ?issue.related.as_ref().map(PersonId::as_str),
            "{}",
            issue.message
        );
    }
}
