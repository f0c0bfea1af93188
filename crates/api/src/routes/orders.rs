//! Checkout and order ledger endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use common::OrderId;
use domain::{DeliveryDetails, Order, OrderStatus, PaymentMethod};
use serde::Deserialize;

use crate::error::ApiError;
use crate::message::order_message;
use crate::routes::{CommandResponse, non_empty, require_admin, require_session};
use crate::state::AppState;

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub address: String,
    #[serde(default = "default_city")]
    pub city: String,
    pub phone: String,
    pub payment_method: String,
}

fn default_city() -> String {
    "Mogadishu".to_string()
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

// -- Handlers --

/// POST /checkout: place the current cart as an order.
#[tracing::instrument(skip(state, req))]
pub async fn checkout(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CommandResponse<Order>>), ApiError> {
    let snapshot = state.store.snapshot();
    require_session(&snapshot)?;
    non_empty("address", &req.address)?;
    non_empty("phone", &req.phone)?;
    let payment_method: PaymentMethod = req
        .payment_method
        .parse()
        .map_err(|e: domain::UnknownPaymentMethod| ApiError::BadRequest(e.to_string()))?;

    // The cart is checked under the store lock; a no-op means it was empty
    let result = state.store.place_order(
        DeliveryDetails::new(req.address, req.city, req.phone),
        payment_method,
    )?;
    let order = result
        .placed_order()
        .cloned()
        .ok_or_else(|| ApiError::BadRequest("Cart is empty".to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(CommandResponse::new(&result, order)),
    ))
}

/// GET /orders: every order for admins, otherwise the caller's own orders.
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Order>>, ApiError> {
    let snapshot = state.store.snapshot();
    let user = require_session(&snapshot)?;

    let orders = if user.is_admin() {
        snapshot.orders().orders().to_vec()
    } else {
        snapshot.orders().for_user(&user.id).cloned().collect()
    };
    Ok(Json(orders))
}

/// PATCH /orders/{id}/status: unknown ids are a no-op.
#[tracing::instrument(skip(state, req), fields(status = %req.status))]
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<CommandResponse<Option<Order>>>, ApiError> {
    require_admin(&state.store.snapshot())?;
    let status: OrderStatus = req.status.parse().map_err(ApiError::BadRequest)?;
    let order_id = OrderId::from(id);

    let result = state.store.update_order_status(&order_id, status)?;
    let order = result.snapshot.orders().get(&order_id).cloned();
    Ok(Json(CommandResponse::new(&result, order)))
}

/// GET /orders/{id}/message: plain-text summary for a messaging channel.
#[tracing::instrument(skip(state))]
pub async fn message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state.store.snapshot();
    let user = require_session(&snapshot)?;
    let order = snapshot
        .orders()
        .get(&OrderId::from(id.as_str()))
        .filter(|order| user.is_admin() || order.user_id == user.id)
        .ok_or_else(|| ApiError::NotFound(format!("Order {id} not found")))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        order_message(order),
    ))
}
