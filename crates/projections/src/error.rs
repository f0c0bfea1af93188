//! Projection error types.

use thiserror::Error;

/// Errors raised while folding the journal into read models.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// The slice handed to a projection skipped part of the journal.
    #[error("{projection} expected sequence {expected}, got {found}")]
    SequenceGap {
        projection: &'static str,
        expected: u64,
        found: u64,
    },
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
