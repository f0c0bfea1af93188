//! Cart endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use common::ProductId;
use domain::{CartItem, CommandResult, PriceBreakdown, Storefront};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::routes::CommandResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub delta: i64,
}

/// The cart together with its freshly computed prices.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total_quantity: u32,
    #[serde(flatten)]
    pub breakdown: PriceBreakdown,
}

impl CartView {
    fn of(store: &Storefront) -> Self {
        Self {
            items: store.cart().items().to_vec(),
            total_quantity: store.cart().total_quantity(),
            breakdown: store.checkout_breakdown(),
        }
    }
}

fn respond(result: &CommandResult) -> Json<CommandResponse<CartView>> {
    Json(CommandResponse::new(result, CartView::of(&result.snapshot)))
}

/// GET /cart
pub async fn get(State(state): State<Arc<AppState>>) -> Json<CartView> {
    Json(CartView::of(&state.store.snapshot()))
}

/// POST /cart/items: add one unit of a catalog product.
#[tracing::instrument(skip(state, req), fields(product_id = %req.product_id))]
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<CommandResponse<CartView>>, ApiError> {
    let product_id = ProductId::from(req.product_id);
    if state.store.snapshot().catalog().product(&product_id).is_none() {
        return Err(ApiError::NotFound(format!("Product {product_id} not found")));
    }

    let result = state.store.add_to_cart(&product_id)?;
    Ok(respond(&result))
}

/// PATCH /cart/items/{id}: move a line's quantity by a signed delta.
#[tracing::instrument(skip(state, req), fields(delta = req.delta))]
pub async fn update_quantity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateQuantityRequest>,
) -> Result<Json<CommandResponse<CartView>>, ApiError> {
    let result = state
        .store
        .update_quantity(&ProductId::from(id), req.delta)?;
    Ok(respond(&result))
}

/// DELETE /cart/items/{id}
#[tracing::instrument(skip(state))]
pub async fn remove_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CommandResponse<CartView>>, ApiError> {
    let result = state.store.remove_from_cart(&ProductId::from(id))?;
    Ok(respond(&result))
}

/// DELETE /cart
#[tracing::instrument(skip(state))]
pub async fn clear(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CommandResponse<CartView>>, ApiError> {
    let result = state.store.clear_cart()?;
    Ok(respond(&result))
}
