#![forbid(unsafe_code)]

//! Change events emitted by a family store.

use crate::id::PersonId;

/// A change a store has applied, queued for observers.
///
/// Events are delivered in emission order. A structural change always
/// produces [`FamilyEvent::Relayouted`] after the layout values have been
/// rewritten, so consumers can rebuild positions from scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyEvent {
    /// Layer and subtree width were recomputed for every member.
    Relayouted,
    /// Display fields of one member changed; positions did not.
    MemberUpdated(PersonId),
    /// The family title changed.
    TitleChanged,
    /// The unsaved-changes flag flipped to the carried value.
    DirtyChanged(bool),
    /// Every member was discarded and a fresh root created.
    Cleared,
}

impl FamilyEvent {
    /// Stable name used in log fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Relayouted => "relayouted",
            Self::MemberUpdated(_) => "member_updated",
            Self::TitleChanged => "title_changed",
            Self::DirtyChanged(_) => "dirty_changed",
            Self::Cleared => "cleared",
        }
    }

    /// Whether this event invalidates positions.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::Relayouted | Self::Cleared)
    }
}
