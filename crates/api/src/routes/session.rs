//! Login and logout.
//!
//! Credentials are verified elsewhere; the role in the payload is trusted.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::UserId;
use domain::{Role, User};
use serde::Deserialize;

use crate::error::ApiError;
use crate::routes::{CommandResponse, non_empty};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    pub avatar: Option<String>,
}

/// POST /session: start a session for the given user.
#[tracing::instrument(skip(state, req), fields(email = %req.email, role = ?req.role))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<CommandResponse<User>>, ApiError> {
    non_empty("name", &req.name)?;
    non_empty("email", &req.email)?;

    let id = req.id.map(UserId::from).unwrap_or_else(UserId::generate);
    let mut user = User::new(id, req.name, req.email, req.role);
    user.avatar = req.avatar;

    let result = state.store.login(user.clone())?;
    tracing::info!(user_id = %user.id, "user logged in");
    Ok(Json(CommandResponse::new(&result, user)))
}

/// DELETE /session
#[tracing::instrument(skip(state))]
pub async fn logout(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CommandResponse>, ApiError> {
    let result = state.store.logout()?;
    Ok(Json(CommandResponse::new(&result, ())))
}
