#![forbid(unsafe_code)]

//! Scene projection for Kinfolk.
//!
//! Turns a [`kinfolk_layout::TreeLayout`] and the family's records into a
//! flat list of drawable [`Visual`]s, and hosts the pieces of interaction
//! that live on top of those visuals.
//!
//! # Role in Kinfolk
//! - [`Scene`] observes a [`kinfolk_store::Family`] and rebuilds on relayout.
//! - [`ReorderController`] drags a card among its siblings.
//! - [`Viewport`] zooms and pans.
//! - [`SvgRenderer`] exports the scene.
//!
//! # How it fits in the system
//! The store emits events; the scene consumes them through
//! [`kinfolk_store::FamilyObserver`]. The facade crate wires pointer input
//! to the reorder controller and the viewport.

pub mod reorder;
pub mod scene;
pub mod style;
pub mod svg;
pub mod text;
pub mod viewport;
pub mod visual;

pub use reorder::{DragState, ReorderController, gap_marker, gap_to_index, resolve_gap};
pub use scene::Scene;
pub use style::SceneStyle;
pub use svg::SvgRenderer;
pub use viewport::{MIN_ZOOM, Viewport, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
pub use visual::{
    CardContent, CardSections, ConnectorVisual, GapIndicator, GhostVisual, NodeVisual,
    PathCommand, TitleVisual, Visual,
};
