//! Errors returned by handlers, rendered as `{"error": "..."}` bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{DomainError, OrderError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    /// Malformed or incomplete input; nothing was committed.
    BadRequest(String),
    /// No user is logged in.
    Unauthorized(String),
    /// The logged-in user lacks the admin role.
    Forbidden(String),
    /// A command the store refused.
    Domain(DomainError),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::Domain(err) => domain_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, axum::Json(serde_json::json!({ "error": error }))).into_response()
    }
}

fn domain_error_to_response(err: DomainError) -> (StatusCode, String) {
    match &err {
        DomainError::Order(OrderError::InvalidTransition { .. }) => {
            tracing::warn!(error = %err, "rejected status change");
            (StatusCode::CONFLICT, err.to_string())
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<domain::MoneyParseError> for ApiError {
    fn from(err: domain::MoneyParseError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<projections::ProjectionError> for ApiError {
    fn from(err: projections::ProjectionError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
