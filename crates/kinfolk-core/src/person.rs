#![forbid(unsafe_code)]

//! Person records.
//!
//! A [`Person`] is one node of the family tree: identity, relationships, and
//! display attributes. Relationships are stored as identifiers only; the
//! owning store is responsible for keeping them consistent.
//!
//! The serialized form is the camelCase member object of the family document.
//! Transient layout values ([`LayoutSlot`]) are never serialized.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::id::PersonId;

/// Layout values recomputed on every relayout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSlot {
    /// Generation depth from the root (root = 0).
    pub layer: usize,
    /// Leaf units reserved by this person's subtree (minimum 1).
    pub subtree_width: usize,
}

impl Default for LayoutSlot {
    fn default() -> Self {
        Self {
            layer: 0,
            subtree_width: 1,
        }
    }
}

/// One member of the family tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Person {
    #[serde(deserialize_with = "lenient::or_zero")]
    pub id: PersonId,
    #[serde(deserialize_with = "lenient::or_zero")]
    pub title: String,
    #[serde(deserialize_with = "lenient::or_zero")]
    pub name: String,
    #[serde(deserialize_with = "lenient::or_zero")]
    pub spouse_name: String,
    #[serde(deserialize_with = "lenient::or_zero")]
    pub note: String,
    #[serde(deserialize_with = "lenient::or_zero")]
    pub is_male: bool,
    #[serde(deserialize_with = "lenient::or_zero")]
    pub is_alive: bool,
    #[serde(deserialize_with = "lenient::or_zero")]
    pub is_spouse_alive: bool,
    /// Ordered children; order is the left-to-right layout order.
    pub children: Vec<PersonId>,
    /// Parent identifier, `None` for the root.
    #[serde(with = "parent_ref")]
    pub parent_id: Option<PersonId>,
    /// Position in the parent's `children`, kept in sync by the store.
    #[serde(deserialize_with = "lenient::or_zero")]
    pub index_as_child: usize,
    #[serde(skip)]
    pub layout: LayoutSlot,
}

impl Default for Person {
    /// A blank record with an empty (invalid) id.
    fn default() -> Self {
        Self {
            id: PersonId::default(),
            title: String::new(),
            name: String::new(),
            spouse_name: String::new(),
            note: String::new(),
            is_male: true,
            is_alive: false,
            is_spouse_alive: false,
            children: Vec::new(),
            parent_id: None,
            index_as_child: 0,
            layout: LayoutSlot::default(),
        }
    }
}

impl Person {
    /// A blank person with a freshly generated id.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(PersonId::generate())
    }

    /// A blank person with the given id.
    #[must_use]
    pub fn with_id(id: impl Into<PersonId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_spouse(mut self, spouse_name: impl Into<String>) -> Self {
        self.spouse_name = spouse_name.into();
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    #[must_use]
    pub fn with_male(mut self, is_male: bool) -> Self {
        self.is_male = is_male;
        self
    }

    #[must_use]
    pub fn with_alive(mut self, is_alive: bool) -> Self {
        self.is_alive = is_alive;
        self
    }

    #[must_use]
    pub fn with_spouse_alive(mut self, is_spouse_alive: bool) -> Self {
        self.is_spouse_alive = is_spouse_alive;
        self
    }

    /// A record is valid when it carries a non-empty id.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn has_spouse(&self) -> bool {
        !self.spouse_name.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn has_note(&self) -> bool {
        !self.note.is_empty()
    }

    /// Generation depth from the last relayout.
    #[inline]
    #[must_use]
    pub fn layer(&self) -> usize {
        self.layout.layer
    }

    /// Subtree width in leaf units from the last relayout.
    #[inline]
    #[must_use]
    pub fn subtree_width(&self) -> usize {
        self.layout.subtree_width
    }

    /// Reset transient layout values to their defaults.
    pub fn clear_layout(&mut self) {
        self.layout = LayoutSlot::default();
    }

    /// Whether `other` has the same relationships as `self`.
    #[must_use]
    pub fn same_links(&self, other: &Person) -> bool {
        self.parent_id == other.parent_id && self.children == other.children
    }

    /// Equality ignoring transient layout values.
    #[must_use]
    pub fn same_record(&self, other: &Person) -> bool {
        Self {
            layout: LayoutSlot::default(),
            ..self.clone()
        } == Self {
            layout: LayoutSlot::default(),
            ..other.clone()
        }
    }
}

/// `parentId` is the empty string for the root in documents.
mod parent_ref {
    use super::*;

    pub(super) fn serialize<S: Serializer>(
        parent: &Option<PersonId>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match parent {
            Some(id) => serializer.serialize_str(id.as_str()),
            None => serializer.serialize_str(""),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<PersonId>, D::Error> {
        let raw: Option<String> = lenient::or_zero(deserializer)?;
        Ok(raw.filter(|s| !s.is_empty()).map(PersonId::from))
    }
}

/// Scalar fields are read leniently: a value of the wrong JSON type becomes
/// the field type's zero value (`""`, `false`, `0`) instead of failing the
/// whole record. Absent fields still take the record defaults.
mod lenient {
    use serde::de::IgnoredAny;

    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OrAny<T> {
        Value(T),
        Other(IgnoredAny),
    }

    pub(super) fn or_zero<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(match OrAny::<T>::deserialize(deserializer)? {
            OrAny::Value(value) => value,
            OrAny::Other(_) => T::default(),
        })
    }
}
