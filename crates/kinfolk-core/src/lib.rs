#![forbid(unsafe_code)]

//! Core: person records, identifiers, geometry, and change events.
//!
//! # Role in Kinfolk
//! `kinfolk-core` is the vocabulary shared by every other crate. It owns the
//! [`Person`] record and its [`PersonId`], the floating-point geometry used by
//! layout and scene code, the [`FamilyEvent`] values a store emits after a
//! mutation, and the [`TreeShape`] seam the layout engine reads through.
//!
//! # How it fits in the system
//! `kinfolk-store` owns the mutable family and implements [`TreeShape`];
//! `kinfolk-layout` turns a shape into generations and placements;
//! `kinfolk-scene` projects placements into visuals. None of those crates
//! depend on each other through anything but the types defined here and the
//! plain data they return.

pub mod event;
pub mod geometry;
pub mod id;
pub mod integrity;
pub mod person;
pub mod shape;

pub use event::FamilyEvent;
pub use geometry::{Point, Rect};
pub use id::PersonId;
pub use integrity::{IntegrityCode, IntegrityIssue, IntegrityReport, IntegritySeverity};
pub use person::{LayoutSlot, Person};
pub use shape::TreeShape;
