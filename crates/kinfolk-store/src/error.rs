#![forbid(unsafe_code)]

use kinfolk_core::PersonId;
use thiserror::Error;

/// A structural edit was rejected; the family is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("parent {0} is not a member of this family")]
    InvalidParent(PersonId),
    #[error("person {0} is already a member of this family")]
    DuplicateId(PersonId),
    #[error("invalid member: {0}")]
    InvalidMember(String),
    #[error("new child order for {parent} is not a permutation of its children")]
    OrderMismatch { parent: PersonId },
}

impl StoreError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidMember(message.into())
    }
}

/// A family document could not be loaded.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to parse family document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("family document is not a JSON object")]
    NotAnObject,
    #[error("family document root {root_id:?} is not among its members")]
    MissingRoot { root_id: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;
