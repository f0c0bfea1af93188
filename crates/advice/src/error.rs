//! Advice error types.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when asking for shopping advice.
#[derive(Debug, Error)]
pub enum AdviceError {
    /// No API key was configured.
    #[error("missing API key")]
    MissingApiKey,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The model API returned an error status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The model answered without any text.
    #[error("empty response")]
    EmptyResponse,

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The request did not complete in time.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The backing service is unavailable.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}
