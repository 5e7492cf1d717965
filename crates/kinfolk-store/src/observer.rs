#![forbid(unsafe_code)]

//! Consumers of queued family events.

use kinfolk_core::FamilyEvent;

use crate::family::Family;

/// Receives events drained from a [`Family`].
///
/// The family is passed in its post-mutation state, so observers can read
/// whatever they need without holding a reference between events.
pub trait FamilyObserver {
    fn on_family_event(&mut self, family: &Family, event: &FamilyEvent);
}

impl<F> FamilyObserver for F
where
    F: FnMut(&Family, &FamilyEvent),
{
    fn on_family_event(&mut self, family: &Family, event: &FamilyEvent) {
        self(family, event);
    }
}

/// Collects every event it sees.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub events: Vec<FamilyEvent>,
}

impl FamilyObserver for EventLog {
    fn on_family_event(&mut self, _family: &Family, event: &FamilyEvent) {
        self.events.push(event.clone());
    }
}
