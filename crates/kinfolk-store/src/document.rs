#![forbid(unsafe_code)]

//! JSON family documents.
//!
//! ```json
//! { "rootId": "...", "title": "...", "members": [ { "id": "...", ... } ] }
//! ```
//!
//! Loading is tolerant at the member level: an unreadable member entry is
//! logged and skipped, and the rest of the document still loads. Only a
//! document that is not a JSON object, or whose root cannot be found, is
//! rejected.

use std::collections::BTreeMap;

use kinfolk_core::{Person, PersonId};
use kinfolk_layout::Generations;
use serde::Serialize;
use serde_json::Value;

use crate::error::DocumentError;
use crate::family::Family;
use crate::integrity::log_report;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentOut<'a> {
    root_id: &'a PersonId,
    title: &'a str,
    members: Vec<&'a Person>,
}

impl Family {
    /// Serialize to a pretty-printed JSON document.
    ///
    /// Members are written in id order; layout values are never written.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        let doc = DocumentOut {
            root_id: &self.root_id,
            title: &self.title,
            members: self.members.values().collect(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Load a family from a JSON document.
    ///
    /// The loaded family is relayouted and clean. Its only pending event is
    /// the [`FamilyEvent::Relayouted`](kinfolk_core::FamilyEvent) that builds
    /// observers on the first dispatch.
    ///
    /// Member entries are skipped only for structural problems: not an
    /// object, a non-array `children`, or an empty id. Mistyped display
    /// fields fall back to their zero values.
    pub fn from_json(text: &str) -> Result<Family, DocumentError> {
        let _span = tracing::debug_span!("document.load", bytes = text.len()).entered();
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(mut object) = value else {
            return Err(DocumentError::NotAnObject);
        };

        let root_id = object
            .get("rootId")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let title = object
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let entries = match object.remove("members") {
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                tracing::warn!(target: "kinfolk.store", "document members is not an array");
                Vec::new()
            }
            None => Vec::new(),
        };

        let members = read_members(entries);
        let root_id = PersonId::from(root_id);
        if root_id.is_empty() || !members.contains_key(&root_id) {
            return Err(DocumentError::MissingRoot {
                root_id: root_id.to_string(),
            });
        }

        let mut family = Family {
            root_id,
            title,
            members,
            dirty: false,
            events: Vec::new(),
            generations: Generations::default(),
        };
        let corrected = family.normalize_child_indices();
        if corrected > 0 {
            tracing::debug!(target: "kinfolk.store", corrected, "child indices normalized");
        }
        log_report(&family.invariant_report());

        family.relayout();
        family.dirty = false;
        tracing::debug!(
            target: "kinfolk.store",
            members = family.members.len(),
            "family document loaded"
        );
        Ok(family)
    }

    /// Rewrite `index_as_child` from each parent's child order.
    ///
    /// Only children that name the listing parent are touched. Returns the
    /// number of records corrected.
    fn normalize_child_indices(&mut self) -> usize {
        let placements: Vec<(PersonId, PersonId, usize)> = self
            .members
            .values()
            .flat_map(|parent| {
                parent
                    .children
                    .iter()
                    .enumerate()
                    .map(|(index, child)| (parent.id.clone(), child.clone(), index))
            })
            .collect();

        let mut corrected = 0;
        for (parent, child, index) in placements {
            if let Some(record) = self.members.get_mut(&child)
                && record.parent_id.as_ref() == Some(&parent)
                && record.index_as_child != index
            {
                record.index_as_child = index;
                corrected += 1;
            }
        }
        corrected
    }
}

fn read_members(entries: Vec<Value>) -> BTreeMap<PersonId, Person> {
    let mut members = BTreeMap::new();
    for (index, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            skip(index, "member entry is not an object");
            continue;
        }
        let person: Person = match serde_json::from_value(entry) {
            Ok(person) => person,
            Err(err) => {
                skip(index, &err.to_string());
                continue;
            }
        };
        if !person.is_valid() {
            skip(index, "member has an empty id");
            continue;
        }
        if members.contains_key(&person.id) {
            skip(index, "member id already loaded");
            continue;
        }
        members.insert(person.id.clone(), person);
    }
    members
}

fn skip(index: usize, reason: &str) {
    tracing::warn!(
        target: "kinfolk.store",
        index,
        reason,
        "skipping unreadable family member"
    );
}
