//! The projection trait and journal checkpoints.

use async_trait::async_trait;
use domain::{EventEnvelope, Version};

use crate::Result;

/// The last journal sequence a projection has folded in.
///
/// Sequences are gapless and start at 1, so a projection whose checkpoint is
/// `n` has seen every envelope from 1 through `n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProjectionPosition {
    last_sequence: Version,
}

impl ProjectionPosition {
    /// Position of a projection that has seen nothing.
    pub fn start() -> Self {
        Self {
            last_sequence: Version::initial(),
        }
    }

    /// Position after folding in the envelope at `sequence`.
    pub fn record(self, sequence: Version) -> Self {
        Self {
            last_sequence: self.last_sequence.max(sequence),
        }
    }

    pub fn last_sequence(&self) -> Version {
        self.last_sequence
    }

    pub fn has_seen(&self, sequence: Version) -> bool {
        sequence <= self.last_sequence
    }

    /// The only sequence that can be applied next without a gap.
    pub fn next_expected(&self) -> Version {
        self.last_sequence.next()
    }
}

impl std::fmt::Display for ProjectionPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.last_sequence)
    }
}

/// A projection that folds journal envelopes into a read model.
#[async_trait]
pub trait Projection: Send + Sync {
    fn name(&self) -> &'static str;

    /// Folds one envelope in. The processor guarantees it is the next one.
    async fn handle(&self, envelope: &EventEnvelope) -> Result<()>;

    async fn position(&self) -> ProjectionPosition;

    /// Clears the read model back to its empty state.
    async fn reset(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_position_expects_first_sequence() {
        let pos = ProjectionPosition::start();
        assert_eq!(pos.last_sequence(), Version::initial());
        assert_eq!(pos.next_expected(), Version::first());
        assert!(!pos.has_seen(Version::first()));
    }

    #[test]
    fn record_moves_forward_only() {
        let pos = ProjectionPosition::start()
            .record(Version::new(1))
            .record(Version::new(2));
        assert_eq!(pos.last_sequence(), Version::new(2));

        let pos = pos.record(Version::new(1));
        assert_eq!(pos.last_sequence(), Version::new(2));
        assert!(pos.has_seen(Version::new(2)));
        assert!(!pos.has_seen(Version::new(3)));
    }

    #[test]
    fn display_shows_sequence() {
        let pos = ProjectionPosition::start().record(Version::new(42));
        assert_eq!(pos.to_string(), "@42");
    }
}
