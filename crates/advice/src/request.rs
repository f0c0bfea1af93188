//! Advice request and prompt rendering.

use domain::Product;
use serde::{Deserialize, Serialize};

const STORE_NAME: &str = "Dherkiinlay Supermarket";

/// A shopper's question together with the products currently on offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceRequest {
    pub query: String,

    /// Comma-separated `name ($price)` list, see [`product_digest`].
    pub product_digest: String,
}

impl AdviceRequest {
    pub fn new(query: impl Into<String>, products: &[Product]) -> Self {
        Self {
            query: query.into(),
            product_digest: product_digest(products),
        }
    }

    /// Renders the full prompt sent to the model.
    pub fn prompt(&self) -> String {
        format!(
            "You are a helpful shopping assistant for {STORE_NAME}.\n\
             Current available products: {}.\n\
             \n\
             User Query: \"{}\"\n\
             \n\
             Please provide a helpful, short, and friendly response. If the user asks \
             for a recipe, suggest one using available items if possible.\n\
             Format the response as plain text.",
            self.product_digest, self.query
        )
    }
}

/// `"Fresh Bananas ($1.50), Whole Milk ($3.20)"`.
pub fn product_digest(products: &[Product]) -> String {
    products
        .iter()
        .map(|p| format!("{} ({})", p.name, p.price))
        .collect::<Vec<_>>()
        .join(", ")
}
