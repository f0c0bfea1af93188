//! Core aggregate and domain event traits.

use serde::{Serialize, de::DeserializeOwned};

use crate::journal::Version;

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable and should be named in past tense.
pub trait DomainEvent: Serialize + DeserializeOwned + Send + Sync + Clone {
    /// Returns the event type name.
    ///
    /// Used for journal filtering and metrics labels.
    fn event_type(&self) -> &'static str;
}

/// Trait for state that evolves only by applying events.
///
/// Commands are methods on `&self` that inspect the current state and
/// return the events they would produce; they never mutate. State changes
/// happen only in [`Aggregate::apply`], which is pure and deterministic:
/// - Given the same state and event, it must always produce the same new state
/// - It must not have side effects
/// - It must not fail (events represent facts that have happened)
pub trait Aggregate: Default + Clone + Send + Sync + Sized {
    /// The type of events this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Returns the number of events applied so far.
    fn version(&self) -> Version;

    /// Sets the aggregate version.
    fn set_version(&mut self, version: Version);

    /// Applies an event to the aggregate, updating its state.
    fn apply(&mut self, event: Self::Event);

    /// Applies multiple events in sequence, advancing the version per event.
    fn apply_events(&mut self, events: impl IntoIterator<Item = Self::Event>) {
        for event in events {
            self.apply(event);
            self.set_version(self.version().next());
        }
    }

    /// Returns a new state with `events` applied, leaving `self` untouched.
    fn evolve(&self, events: &[Self::Event]) -> Self {
        let mut next = self.clone();
        next.apply_events(events.iter().cloned());
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    enum TestEvent {
        Incremented,
        Set { value: i32 },
    }

    impl DomainEvent for TestEvent {
        fn event_type(&self) -> &'static str {
            match self {
                TestEvent::Incremented => "TestIncremented",
                TestEvent::Set { .. } => "TestSet",
            }
        }
    }

    #[derive(Debug, Default, Clone)]
    struct Counter {
        value: i32,
        version: Version,
    }

    impl Aggregate for Counter {
        type Event = TestEvent;

        fn version(&self) -> Version {
            self.version
        }

        fn set_version(&mut self, version: Version) {
            self.version = version;
        }

        fn apply(&mut self, event: Self::Event) {
            match event {
                TestEvent::Incremented => self.value += 1,
                TestEvent::Set { value } => self.value = value,
            }
        }
    }

    #[test]
    fn test_apply_events_advances_version() {
        let mut counter = Counter::default();
        counter.apply_events(vec![TestEvent::Set { value: 41 }, TestEvent::Incremented]);
        assert_eq!(counter.value, 42);
        assert_eq!(counter.version(), Version::new(2));
    }

    #[test]
    fn test_evolve_leaves_original_untouched() {
        let counter = Counter::default();
        let next = counter.evolve(&[TestEvent::Incremented]);
        assert_eq!(counter.value, 0);
        assert_eq!(counter.version(), Version::initial());
        assert_eq!(next.value, 1);
        assert_eq!(next.version(), Version::first());
    }

    #[test]
    fn test_domain_event_type() {
        assert_eq!(TestEvent::Incremented.event_type(), "TestIncremented");
        assert_eq!(TestEvent::Set { value: 1 }.event_type(), "TestSet");
    }
}
