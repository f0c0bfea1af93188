//! Projection processor for feeding journal envelopes to projections.

use domain::EventEnvelope;

use crate::projection::Projection;
use crate::{ProjectionError, Result};

/// Feeds journal slices to every registered projection.
///
/// Each projection tracks its own checkpoint, so the same slice can be
/// handed over repeatedly; envelopes a projection already holds are skipped.
/// Envelopes must arrive in journal order. A projection that would skip a
/// sequence number fails with [`ProjectionError::SequenceGap`] instead.
#[derive(Default)]
pub struct ProjectionProcessor {
    projections: Vec<Box<dyn Projection>>,
}

impl ProjectionProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, projection: Box<dyn Projection>) {
        self.projections.push(projection);
    }

    pub fn projection_count(&self) -> usize {
        self.projections.len()
    }

    async fn deliver(projection: &dyn Projection, envelope: &EventEnvelope) -> Result<bool> {
        let position = projection.position().await;
        if position.has_seen(envelope.sequence) {
            return Ok(false);
        }
        let expected = position.next_expected();
        if envelope.sequence != expected {
            return Err(ProjectionError::SequenceGap {
                projection: projection.name(),
                expected: expected.as_u64(),
                found: envelope.sequence.as_u64(),
            });
        }
        projection.handle(envelope).await?;
        metrics::counter!("projections_events_processed", "projection" => projection.name())
            .increment(1);
        Ok(true)
    }

    /// Hands each projection the envelopes past its checkpoint. Returns the
    /// number of (projection, envelope) deliveries made.
    #[tracing::instrument(skip(self, envelopes), fields(envelopes = envelopes.len()))]
    pub async fn catch_up(&self, envelopes: &[EventEnvelope]) -> Result<u64> {
        let mut delivered = 0;
        for envelope in envelopes {
            for projection in &self.projections {
                if Self::deliver(projection.as_ref(), envelope).await? {
                    delivered += 1;
                }
            }
        }

        if delivered > 0 {
            tracing::debug!(delivered, "catch-up complete");
        }
        Ok(delivered)
    }

    /// Hands one freshly committed envelope to every projection.
    #[tracing::instrument(skip(self, envelope), fields(event_type = %envelope.event_type))]
    pub async fn process_event(&self, envelope: &EventEnvelope) -> Result<()> {
        for projection in &self.projections {
            Self::deliver(projection.as_ref(), envelope).await?;
        }
        Ok(())
    }

    /// Clears every read model and folds `envelopes` in again.
    #[tracing::instrument(skip(self, envelopes))]
    pub async fn rebuild_all(&self, envelopes: &[EventEnvelope]) -> Result<()> {
        for projection in &self.projections {
            projection.reset().await?;
        }
        let delivered = self.catch_up(envelopes).await?;
        tracing::info!(delivered, "projections rebuilt");
        Ok(())
    }
}
