//! In-process log of committed store events.
//!
//! Lives as long as the process. Every event the service commits is wrapped
//! in an [`EventEnvelope`] carrying a gapless, 1-based sequence number.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::DomainEvent;
use crate::store::StoreEvent;

/// Position in the journal; also the version of the snapshot it produced.
///
/// Versions start at 1 for the first event and increment by 1 for each
/// subsequent event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the initial version (0), before any event.
    pub fn initial() -> Self {
        Self(0)
    }

    /// Returns the first version (1) for the first event.
    pub fn first() -> Self {
        Self(1)
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An event along with its journal metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique identifier for this event.
    pub event_id: Uuid,

    /// Position in the journal.
    pub sequence: Version,

    /// The type of the event (e.g., "OrderPlaced", "CartItemAdded").
    pub event_type: String,

    /// When the event was committed.
    pub timestamp: DateTime<Utc>,

    pub event: StoreEvent,
}

/// Append-only sequence of envelopes.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    envelopes: Vec<EventEnvelope>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps and appends `events`, returning the sequence of the last one.
    pub fn append(&mut self, events: &[StoreEvent], timestamp: DateTime<Utc>) -> Version {
        for event in events {
            let sequence = self.last_sequence().next();
            self.envelopes.push(EventEnvelope {
                event_id: Uuid::new_v4(),
                sequence,
                event_type: event.event_type().to_string(),
                timestamp,
                event: event.clone(),
            });
        }
        self.last_sequence()
    }

    pub fn all(&self) -> &[EventEnvelope] {
        &self.envelopes
    }

    /// Envelopes strictly after `sequence`.
    pub fn since(&self, sequence: Version) -> &[EventEnvelope] {
        let start = usize::try_from(sequence.as_u64())
            .unwrap_or(usize::MAX)
            .min(self.envelopes.len());
        &self.envelopes[start..]
    }

    pub fn by_type<'a>(&'a self, event_type: &'a str) -> impl Iterator<Item = &'a EventEnvelope> {
        self.envelopes
            .iter()
            .filter(move |e| e.event_type == event_type)
    }

    pub fn len(&self) -> usize {
        self.envelopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.envelopes.is_empty()
    }

    pub fn last_sequence(&self) -> Version {
        self.envelopes
            .last()
            .map(|e| e.sequence)
            .unwrap_or(Version::initial())
    }
}
