#![forbid(unsafe_code)]

//! Layered tree layout.
//!
//! Two pure passes over a [`TreeShape`]:
//!
//! 1. [`measure`] walks the tree breadth-first from the root and assigns each
//!    person a generation (`layer`) and a subtree width in leaf units.
//! 2. [`place`] turns those units into pixel bands and centers each card in
//!    its band, so sibling subtrees never overlap.
//!
//! Both passes recompute everything from scratch; there is no incremental
//! state. Structural defects are collected as
//! [`IntegrityIssue`](kinfolk_core::IntegrityIssue)s rather than panicking.

pub mod generations;
pub mod metrics;
pub mod placement;

pub use generations::{Generation, Generations, measure};
pub use kinfolk_core::{PersonId, Rect, TreeShape};
pub use metrics::{LayoutMetrics, MetricsError};
pub use placement::{Placement, TreeLayout, place};

/// Run [`measure`] then [`place`].
pub fn layout<S: TreeShape + ?Sized>(shape: &S, metrics: &LayoutMetrics) -> TreeLayout {
    place(&measure(shape), metrics)
}
