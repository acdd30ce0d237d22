//! Per-event records

use crate::listener::{Listener, ListenerSet};
use emitter_validation::{MinItems, NoDuplicates, Validate, ValidationErrors};

/// State kept for one event identifier
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub(crate) listeners: ListenerSet,
}

impl EventRecord {
    /// Record holding just `first`
    pub fn new(first: Listener) -> Self {
        let mut listeners = ListenerSet::new();
        listeners.insert(first);
        Self { listeners }
    }

    pub fn listeners(&self) -> &ListenerSet {
        &self.listeners
    }

    pub(crate) fn listeners_mut(&mut self) -> &mut ListenerSet {
        &mut self.listeners
    }
}

impl Validate for EventRecord {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let listeners = &self.listeners.listeners;
        let mut errors = ValidationErrors::default();

        if let Err(e) = MinItems(1).validate(listeners.len(), "listeners") {
            errors.add(e);
        }
        if let Err(e) = NoDuplicates::validate_by(listeners, |a, b| a.same_as(b), "listeners") {
            errors.add(e);
        }

        errors.into_result()
    }
}
