#![forbid(unsafe_code)]

//! Read-only view of a rooted, ordered tree.

use crate::id::PersonId;

/// What the layout engine needs to know about a tree.
///
/// `children` returns `None` for an id with no record, which lets the layout
/// engine detect dangling child references instead of assuming consistency.
pub trait TreeShape {
    /// Identifier of the root node.
    fn root(&self) -> &PersonId;

    /// Ordered children of `id`, or `None` if `id` has no record.
    fn children(&self, id: &PersonId) -> Option<&[PersonId]>;

    /// Whether `id` has a record.
    fn contains(&self, id: &PersonId) -> bool {
        self.children(id).is_some()
    }
}

impl<T: TreeShape + ?Sized> TreeShape for &T {
    fn root(&self) -> &PersonId {
        (**self).root()
    }

    fn children(&self, id: &PersonId) -> Option<&[PersonId]> {
        (**self).children(id)
    }
}
