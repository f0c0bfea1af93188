//! Product and category endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::{CategoryId, ProductId};
use domain::{Category, DanglingCategoryRef, LOW_STOCK_THRESHOLD, Money, Product, ProductFilter};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::routes::{CommandResponse, non_empty, require_admin};
use crate::state::AppState;

// -- Request types --

/// A price given either as a JSON number or a decimal string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl PriceInput {
    fn parse(&self) -> Result<Money, ApiError> {
        let text = match self {
            PriceInput::Number(n) => n.to_string(),
            PriceInput::Text(s) => s.clone(),
        };
        Ok(Money::parse(&text)?)
    }
}

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: PriceInput,
    #[serde(default)]
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub stock: u32,
    pub rating: Option<f32>,
}

impl ProductRequest {
    fn into_product(self, id: Option<ProductId>) -> Result<Product, ApiError> {
        non_empty("name", &self.name)?;
        let price = self.price.parse()?;

        let mut product = Product::new(self.name, price, self.category)
            .with_description(self.description)
            .with_image(self.image)
            .with_stock(self.stock);
        product.rating = self.rating;
        if let Some(id) = id {
            product = product.with_id(id);
        }
        Ok(product)
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub description: Option<String>,
}

impl CategoryRequest {
    fn into_category(self, id: Option<CategoryId>) -> Result<Category, ApiError> {
        non_empty("name", &self.name)?;
        let mut category = Category::new(self.name).with_image(self.image);
        category.description = self.description;
        if let Some(id) = id {
            category = category.with_id(id);
        }
        Ok(category)
    }
}

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

// -- Response types --

#[derive(Serialize)]
pub struct CatalogCheckResponse {
    pub dangling_category_refs: Vec<DanglingCategoryRef>,
    pub low_stock: Vec<Product>,
}

// -- Handlers --

/// GET /products: list products, optionally filtered by category and text.
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProductQuery>,
) -> Json<Vec<Product>> {
    let filter = ProductFilter {
        category: query.category,
        query: query.q,
    };
    let snapshot = state.store.snapshot();
    Json(snapshot.catalog().filter(&filter).cloned().collect())
}

/// POST /products: add a product with a fresh id.
#[tracing::instrument(skip(state, req))]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProductRequest>,
) -> Result<(StatusCode, Json<CommandResponse<Product>>), ApiError> {
    require_admin(&state.store.snapshot())?;
    let product = req.into_product(None)?;

    let result = state.store.add_product(product.clone())?;
    tracing::info!(product_id = %product.id, "product added");
    Ok((
        StatusCode::CREATED,
        Json(CommandResponse::new(&result, product)),
    ))
}

/// PUT /products/{id}: replace a product. Unknown ids are a no-op.
#[tracing::instrument(skip(state, req))]
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ProductRequest>,
) -> Result<Json<CommandResponse<Product>>, ApiError> {
    require_admin(&state.store.snapshot())?;
    let product = req.into_product(Some(ProductId::from(id)))?;

    let result = state.store.update_product(product.clone())?;
    Ok(Json(CommandResponse::new(&result, product)))
}

/// DELETE /products/{id}
#[tracing::instrument(skip(state))]
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CommandResponse>, ApiError> {
    require_admin(&state.store.snapshot())?;
    let result = state.store.delete_product(&ProductId::from(id))?;
    Ok(Json(CommandResponse::new(&result, ())))
}

/// GET /categories
pub async fn list_categories(State(state): State<Arc<AppState>>) -> Json<Vec<Category>> {
    Json(state.store.snapshot().catalog().categories().to_vec())
}

/// POST /categories: add a category with a fresh id.
#[tracing::instrument(skip(state, req))]
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<CommandResponse<Category>>), ApiError> {
    require_admin(&state.store.snapshot())?;
    let category = req.into_category(None)?;

    let result = state.store.add_category(category.clone())?;
    Ok((
        StatusCode::CREATED,
        Json(CommandResponse::new(&result, category)),
    ))
}

/// PUT /categories/{id}: replace a category. Products keep the old name.
#[tracing::instrument(skip(state, req))]
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<CategoryRequest>,
) -> Result<Json<CommandResponse<Category>>, ApiError> {
    require_admin(&state.store.snapshot())?;
    let category = req.into_category(Some(CategoryId::from(id)))?;

    let result = state.store.update_category(category.clone())?;
    Ok(Json(CommandResponse::new(&result, category)))
}

/// DELETE /categories/{id}: products naming it are left dangling.
#[tracing::instrument(skip(state))]
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CommandResponse>, ApiError> {
    require_admin(&state.store.snapshot())?;
    let result = state.store.delete_category(&CategoryId::from(id))?;
    Ok(Json(CommandResponse::new(&result, ())))
}

/// GET /catalog/check: category integrity and low stock report.
pub async fn check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CatalogCheckResponse>, ApiError> {
    let snapshot = state.store.snapshot();
    require_admin(&snapshot)?;

    let catalog = snapshot.catalog();
    Ok(Json(CatalogCheckResponse {
        dangling_category_refs: catalog.dangling_category_refs(),
        low_stock: catalog.low_stock(LOW_STOCK_THRESHOLD).cloned().collect(),
    }))
}
