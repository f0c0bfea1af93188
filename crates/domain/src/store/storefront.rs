//! Storefront aggregate: the single logical snapshot of the engine.

use chrono::{DateTime, Utc};
use common::{CategoryId, OrderId, ProductId};
use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregate;
use crate::cart::{Cart, clamp_quantity};
use crate::catalog::{Catalog, Category, Product};
use crate::error::DomainError;
use crate::journal::Version;
use crate::order::{DeliveryDetails, Order, OrderLedger, OrderStatus, PaymentMethod, StatusPolicy};
use crate::pricing::PriceBreakdown;
use crate::session::{Session, User};

use super::StoreEvent;

/// Catalog, cart, order ledger and session as one immutable value.
///
/// Command methods return the events they would produce; an empty list means
/// the command is a no-op against this snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Storefront {
    catalog: Catalog,
    cart: Cart,
    orders: OrderLedger,
    session: Session,
    #[serde(default)]
    status_policy: StatusPolicy,
    #[serde(default)]
    version: Version,
}

impl Aggregate for Storefront {
    type Event = StoreEvent;

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            StoreEvent::ProductAdded(product) => {
                self.catalog.add_product(product);
            }
            StoreEvent::ProductUpdated(product) => {
                self.catalog.update_product(product);
            }
            StoreEvent::ProductDeleted { product_id } => {
                self.catalog.delete_product(&product_id);
            }
            StoreEvent::CategoryAdded(category) => {
                self.catalog.add_category(category);
            }
            StoreEvent::CategoryUpdated(category) => {
                self.catalog.update_category(category);
            }
            StoreEvent::CategoryDeleted { category_id } => {
                self.catalog.delete_category(&category_id);
            }
            StoreEvent::CartItemAdded { product } => self.cart.add(product),
            StoreEvent::CartItemRemoved { product_id } => {
                self.cart.remove(&product_id);
            }
            StoreEvent::CartQuantityChanged {
                product_id,
                new_quantity,
                ..
            } => self.cart.set_quantity(&product_id, new_quantity),
            StoreEvent::CartCleared => self.cart.clear(),
            StoreEvent::OrderPlaced { order } => {
                self.orders.record(*order);
                self.cart.clear();
            }
            StoreEvent::OrderStatusChanged { order_id, to, .. } => {
                self.orders.set_status(&order_id, to);
            }
            StoreEvent::UserLoggedIn(user) => self.session.login(user),
            StoreEvent::UserLoggedOut => self.session.logout(),
        }
    }
}

// Query methods
impl Storefront {
    /// An empty store using the given status policy.
    pub fn with_policy(status_policy: StatusPolicy) -> Self {
        Self {
            status_policy,
            ..Self::default()
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn orders(&self) -> &OrderLedger {
        &self.orders
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status_policy(&self) -> StatusPolicy {
        self.status_policy
    }

    /// Subtotal, fee and total of the live cart.
    pub fn checkout_breakdown(&self) -> PriceBreakdown {
        PriceBreakdown::for_items(self.cart.items())
    }
}

// Catalog commands
impl Storefront {
    pub fn add_product(&self, product: Product) -> Vec<StoreEvent> {
        if self.catalog.product(&product.id).is_some() {
            return vec![];
        }
        vec![StoreEvent::ProductAdded(product)]
    }

    pub fn update_product(&self, product: Product) -> Vec<StoreEvent> {
        match self.catalog.product(&product.id) {
            Some(existing) if existing != &product => vec![StoreEvent::ProductUpdated(product)],
            _ => vec![],
        }
    }

    pub fn delete_product(&self, product_id: &ProductId) -> Vec<StoreEvent> {
        if self.catalog.product(product_id).is_none() {
            return vec![];
        }
        vec![StoreEvent::ProductDeleted {
            product_id: product_id.clone(),
        }]
    }

    pub fn add_category(&self, category: Category) -> Vec<StoreEvent> {
        if self.catalog.category(&category.id).is_some() {
            return vec![];
        }
        vec![StoreEvent::CategoryAdded(category)]
    }

    pub fn update_category(&self, category: Category) -> Vec<StoreEvent> {
        match self.catalog.category(&category.id) {
            Some(existing) if existing != &category => vec![StoreEvent::CategoryUpdated(category)],
            _ => vec![],
        }
    }

    pub fn delete_category(&self, category_id: &CategoryId) -> Vec<StoreEvent> {
        if self.catalog.category(category_id).is_none() {
            return vec![];
        }
        vec![StoreEvent::CategoryDeleted {
            category_id: category_id.clone(),
        }]
    }
}

// Cart commands
impl Storefront {
    /// Adds one unit of the given product snapshot. Stock is not checked.
    pub fn add_to_cart(&self, product: Product) -> Vec<StoreEvent> {
        vec![StoreEvent::CartItemAdded { product }]
    }

    pub fn remove_from_cart(&self, product_id: &ProductId) -> Vec<StoreEvent> {
        if !self.cart.contains(product_id) {
            return vec![];
        }
        vec![StoreEvent::CartItemRemoved {
            product_id: product_id.clone(),
        }]
    }

    /// Moves a line's quantity by `delta`, never below one.
    pub fn update_quantity(&self, product_id: &ProductId, delta: i64) -> Vec<StoreEvent> {
        let Some(item) = self.cart.item(product_id) else {
            return vec![];
        };

        let new_quantity = clamp_quantity(item.quantity, delta);
        if new_quantity == item.quantity {
            return vec![];
        }

        vec![StoreEvent::CartQuantityChanged {
            product_id: product_id.clone(),
            old_quantity: item.quantity,
            new_quantity,
        }]
    }

    pub fn clear_cart(&self) -> Vec<StoreEvent> {
        if self.cart.is_empty() {
            return vec![];
        }
        vec![StoreEvent::CartCleared]
    }
}

// Order commands
impl Storefront {
    /// Commits the current cart as a pending order under `order_id`.
    ///
    /// Delivery details are recorded as given. The order is attributed to
    /// the session user, or to the guest sentinel. An empty cart, or an id
    /// that is already in the ledger, makes this a no-op.
    pub fn place_order(
        &self,
        order_id: OrderId,
        delivery_details: DeliveryDetails,
        payment_method: PaymentMethod,
        created_at: DateTime<Utc>,
    ) -> Vec<StoreEvent> {
        if self.cart.is_empty() || self.orders.get(&order_id).is_some() {
            return vec![];
        }

        let (user_id, customer_name) = self.session.customer();
        let order = Order {
            id: order_id,
            user_id,
            customer_name,
            items: self.cart.items().to_vec(),
            total: self.checkout_breakdown().total,
            status: OrderStatus::Pending,
            payment_method,
            created_at,
            delivery_details,
        };

        vec![StoreEvent::OrderPlaced {
            order: Box::new(order),
        }]
    }

    /// Changes an order's status, subject to the store's status policy.
    ///
    /// Unknown ids and unchanged statuses produce no events.
    pub fn update_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<Vec<StoreEvent>, DomainError> {
        let Some(order) = self.orders.get(order_id) else {
            return Ok(vec![]);
        };

        self.status_policy.check(order.status, status)?;

        if order.status == status {
            return Ok(vec![]);
        }

        Ok(vec![StoreEvent::OrderStatusChanged {
            order_id: order_id.clone(),
            from: order.status,
            to: status,
        }])
    }
}

// Session commands
impl Storefront {
    pub fn login(&self, user: User) -> Vec<StoreEvent> {
        vec![StoreEvent::UserLoggedIn(user)]
    }

    pub fn logout(&self) -> Vec<StoreEvent> {
        if !self.session.is_authenticated() {
            return vec![];
        }
        vec![StoreEvent::UserLoggedOut]
    }
}
