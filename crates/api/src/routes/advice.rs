//! Shopping assistant endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::routes::non_empty;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AdviceRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub reply: String,
}

/// POST /advice: ask the assistant about the current catalog.
///
/// Always answers 200 once the query is valid; assistant failures come back
/// as a fixed apology in `reply`.
#[tracing::instrument(skip(state, req))]
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AdviceRequest>,
) -> Result<Json<AdviceResponse>, ApiError> {
    non_empty("query", &req.query)?;

    let snapshot = state.store.snapshot();
    let reply = state
        .advisor
        .advise(&req.query, snapshot.catalog().products())
        .await;
    Ok(Json(AdviceResponse { reply }))
}
