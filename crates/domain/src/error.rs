//! Domain error types.

use thiserror::Error;

use crate::order::OrderError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An order rule rejected the command.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),
}
