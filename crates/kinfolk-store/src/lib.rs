#![forbid(unsafe_code)]

//! Family store.
//!
//! [`Family`] owns every [`Person`] record of one tree and is the only place
//! relationships change. Structural edits (`add_child`, `reorder_children`,
//! `clear`) validate their input, recompute layers and subtree widths through
//! `kinfolk-layout`, mark the family dirty, and queue
//! [`FamilyEvent`]s. Callers drain the queue and feed it to
//! [`FamilyObserver`]s; nothing is delivered behind their back.
//!
//! Documents are read and written by [`Family::from_json`] and
//! [`Family::to_json`].

pub mod document;
pub mod error;
pub mod family;
pub mod integrity;
pub mod observer;

pub use error::{DocumentError, Result, StoreError};
pub use family::Family;
pub use kinfolk_core::{FamilyEvent, IntegrityCode, IntegrityIssue, IntegrityReport, Person, PersonId};
pub use observer::{EventLog, FamilyObserver};
