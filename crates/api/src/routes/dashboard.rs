//! Admin dashboard backed by the read models.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use projections::{CustomerOrdersSummary, SalesOverview};
use serde::Serialize;

use crate::error::ApiError;
use crate::routes::require_admin;
use crate::state::AppState;

const TOP_CUSTOMERS: usize = 5;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub overview: SalesOverview,
    pub top_customers: Vec<CustomerOrdersSummary>,
}

/// GET /dashboard
#[tracing::instrument(skip(state))]
pub async fn get(State(state): State<Arc<AppState>>) -> Result<Json<DashboardResponse>, ApiError> {
    require_admin(&state.store.snapshot())?;

    // Bring the read models up to date before reading
    state.refresh_views().await?;

    Ok(Json(DashboardResponse {
        overview: state.sales.overview().await,
        top_customers: state.customers.get_top_customers(TOP_CUSTOMERS).await,
    }))
}
