//! HTTP API server with observability for the storefront engine.
//!
//! Provides REST endpoints over the catalog, cart, checkout, order ledger,
//! session and shopping assistant, with structured logging (tracing) and
//! Prometheus metrics.

pub mod config;
pub mod error;
pub mod message;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, patch, post, put};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::{AppState, create_default_state};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/store", get(routes::store::snapshot))
        .route("/events", get(routes::store::events))
        .route(
            "/products",
            get(routes::catalog::list_products).post(routes::catalog::create_product),
        )
        .route(
            "/products/{id}",
            put(routes::catalog::update_product).delete(routes::catalog::delete_product),
        )
        .route(
            "/categories",
            get(routes::catalog::list_categories).post(routes::catalog::create_category),
        )
        .route(
            "/categories/{id}",
            put(routes::catalog::update_category).delete(routes::catalog::delete_category),
        )
        .route("/catalog/check", get(routes::catalog::check))
        .route("/cart", get(routes::cart::get).delete(routes::cart::clear))
        .route("/cart/items", post(routes::cart::add_item))
        .route(
            "/cart/items/{id}",
            patch(routes::cart::update_quantity).delete(routes::cart::remove_item),
        )
        .route("/checkout", post(routes::orders::checkout))
        .route("/orders", get(routes::orders::list))
        .route("/orders/{id}/status", patch(routes::orders::update_status))
        .route("/orders/{id}/message", get(routes::orders::message))
        .route(
            "/session",
            post(routes::session::login).delete(routes::session::logout),
        )
        .route("/advice", post(routes::advice::ask))
        .route("/dashboard", get(routes::dashboard::get))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
