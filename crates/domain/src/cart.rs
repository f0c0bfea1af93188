//! Shopping cart.

use common::ProductId;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::money::Money;

/// A product snapshot plus a quantity of at least one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product: Product, quantity: u32) -> Self {
        Self {
            product,
            quantity: quantity.max(1),
        }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply(self.quantity)
    }
}

/// The active shopper's uncommitted selection.
///
/// Holds at most one item per product id, in first-add order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn item(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id() == product_id)
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.item(product_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Merges into an existing line (+1) or appends a new line with quantity 1.
    ///
    /// Stock is not consulted.
    pub fn add(&mut self, product: Product) {
        match self.items.iter_mut().find(|i| i.product.id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartItem::new(product, 1)),
        }
    }

    /// Drops the line for `product_id`. Returns false if there was none.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id() != product_id);
        self.items.len() != before
    }

    /// Applies `delta` to a line's quantity, clamping at 1.
    ///
    /// Returns the resulting quantity, or `None` if the product is not in the cart.
    pub fn update_quantity(&mut self, product_id: &ProductId, delta: i64) -> Option<u32> {
        let item = self.items.iter_mut().find(|i| i.product_id() == product_id)?;
        item.quantity = clamp_quantity(item.quantity, delta);
        Some(item.quantity)
    }

    /// Sets a line's quantity directly. Used when replaying recorded changes.
    pub(crate) fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id() == product_id) {
            item.quantity = quantity.max(1);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// `max(1, current + delta)`, saturating at `u32::MAX`.
pub fn clamp_quantity(current: u32, delta: i64) -> u32 {
    let next = i64::from(current).saturating_add(delta);
    u32::try_from(next.max(1)).unwrap_or(u32::MAX)
}
