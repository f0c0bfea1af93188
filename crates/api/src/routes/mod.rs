//! HTTP route handlers.

pub mod advice;
pub mod cart;
pub mod catalog;
pub mod dashboard;
pub mod health;
pub mod metrics;
pub mod orders;
pub mod session;
pub mod store;

use domain::{CommandResult, Storefront, User};
use serde::Serialize;

use crate::error::ApiError;

/// Envelope for every mutation response.
#[derive(Debug, Serialize)]
pub struct CommandResponse<T = ()> {
    /// Store version after the command.
    pub version: u64,
    /// True when the command changed nothing.
    pub noop: bool,
    pub data: T,
}

impl<T> CommandResponse<T> {
    pub fn new(result: &CommandResult, data: T) -> Self {
        Self {
            version: result.version.as_u64(),
            noop: result.is_noop(),
            data,
        }
    }
}

/// Requires a logged-in user.
pub(crate) fn require_session(store: &Storefront) -> Result<&User, ApiError> {
    store
        .session()
        .current()
        .ok_or_else(|| ApiError::Unauthorized("Login required".to_string()))
}

/// Requires a logged-in admin.
pub(crate) fn require_admin(store: &Storefront) -> Result<&User, ApiError> {
    match store.session().current() {
        Some(user) if user.is_admin() => Ok(user),
        _ => Err(ApiError::Forbidden("Admin role required".to_string())),
    }
}

pub(crate) fn non_empty(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(())
}
