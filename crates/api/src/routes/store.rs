//! Whole-store snapshot and journal endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use domain::{EventEnvelope, Version};
use serde::Deserialize;

use crate::error::ApiError;
use crate::routes::require_admin;
use crate::state::AppState;

/// GET /store: the current snapshot.
pub async fn snapshot(State(state): State<Arc<AppState>>) -> Response {
    let snapshot = state.store.snapshot();
    Json(&*snapshot).into_response()
}

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    /// Only envelopes with a sequence greater than this.
    #[serde(default)]
    pub since: u64,
}

/// GET /events: journal envelopes (admin only).
#[tracing::instrument(skip(state))]
pub async fn events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<Vec<EventEnvelope>>, ApiError> {
    require_admin(&state.store.snapshot())?;
    Ok(Json(state.store.events_since(Version::new(query.since))))
}
