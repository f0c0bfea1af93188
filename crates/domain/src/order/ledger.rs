//! Placed orders.

use chrono::{DateTime, Utc};
use common::{OrderId, UserId};
use serde::{Deserialize, Serialize};

use crate::cart::CartItem;
use crate::money::Money;

use super::{DeliveryDetails, OrderStatus, PaymentMethod};

/// A placed order.
///
/// `items` and `total` are captured at placement and never recomputed, so
/// later catalog edits do not reach existing orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub customer_name: String,
    pub items: Vec<CartItem>,
    pub total: Money,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub delivery_details: DeliveryDetails,
}

impl Order {
    /// Total quantity across all lines.
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }
}

/// Placed orders, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderLedger {
    orders: Vec<Order>,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends an order. Returns false if its id is already recorded.
    pub fn record(&mut self, order: Order) -> bool {
        if self.get(&order.id).is_some() {
            return false;
        }
        self.orders.insert(0, order);
        true
    }

    /// Overwrites the status of a recorded order. Returns the previous status.
    pub fn set_status(&mut self, id: &OrderId, status: OrderStatus) -> Option<OrderStatus> {
        let order = self.orders.iter_mut().find(|o| &o.id == id)?;
        Some(std::mem::replace(&mut order.status, status))
    }

    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn for_user<'a>(&'a self, user_id: &'a UserId) -> impl Iterator<Item = &'a Order> {
        self.orders.iter().filter(move |o| &o.user_id == user_id)
    }

    /// Sum of recorded order totals, regardless of status.
    pub fn revenue(&self) -> Money {
        self.orders.iter().map(|o| o.total).sum()
    }
}
