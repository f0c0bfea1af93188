//! Store domain events.

use common::{CategoryId, OrderId, ProductId};
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;
use crate::catalog::{Category, Product};
use crate::order::{Order, OrderStatus};
use crate::session::User;

/// Facts recorded against the storefront snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum StoreEvent {
    ProductAdded(Product),

    /// The product with the same id was replaced wholesale.
    ProductUpdated(Product),

    ProductDeleted { product_id: ProductId },

    CategoryAdded(Category),

    CategoryUpdated(Category),

    /// Products naming this category are left as they are.
    CategoryDeleted { category_id: CategoryId },

    /// One unit of `product` went into the cart, merging with an existing line.
    CartItemAdded { product: Product },

    CartItemRemoved { product_id: ProductId },

    CartQuantityChanged {
        product_id: ProductId,
        old_quantity: u32,
        new_quantity: u32,
    },

    CartCleared,

    /// An order was committed. Applying it also empties the cart.
    OrderPlaced { order: Box<Order> },

    OrderStatusChanged {
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },

    UserLoggedIn(User),

    UserLoggedOut,
}

impl DomainEvent for StoreEvent {
    fn event_type(&self) -> &'static str {
        match self {
            StoreEvent::ProductAdded(_) => "ProductAdded",
            StoreEvent::ProductUpdated(_) => "ProductUpdated",
            StoreEvent::ProductDeleted { .. } => "ProductDeleted",
            StoreEvent::CategoryAdded(_) => "CategoryAdded",
            StoreEvent::CategoryUpdated(_) => "CategoryUpdated",
            StoreEvent::CategoryDeleted { .. } => "CategoryDeleted",
            StoreEvent::CartItemAdded { .. } => "CartItemAdded",
            StoreEvent::CartItemRemoved { .. } => "CartItemRemoved",
            StoreEvent::CartQuantityChanged { .. } => "CartQuantityChanged",
            StoreEvent::CartCleared => "CartCleared",
            StoreEvent::OrderPlaced { .. } => "OrderPlaced",
            StoreEvent::OrderStatusChanged { .. } => "OrderStatusChanged",
            StoreEvent::UserLoggedIn(_) => "UserLoggedIn",
            StoreEvent::UserLoggedOut => "UserLoggedOut",
        }
    }
}

impl StoreEvent {
    /// The order carried by an `OrderPlaced` event.
    pub fn placed_order(&self) -> Option<&Order> {
        match self {
            StoreEvent::OrderPlaced { order } => Some(order.as_ref()),
            _ => None,
        }
    }
}
