//! Storefront domain engine.
//!
//! This crate owns the catalog, the shopping cart, checkout pricing, the
//! order ledger and the current session:
//! - [`Storefront`] is the single snapshot; commands return [`StoreEvent`]s
//!   and [`Aggregate::apply`] is the only way state changes
//! - [`StoreService`] swaps snapshots atomically and keeps the [`Journal`]
//! - [`pricing`] holds the pure subtotal/fee/total functions

pub mod aggregate;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod journal;
pub mod money;
pub mod order;
pub mod pricing;
pub mod service;
pub mod session;
pub mod store;

pub use aggregate::{Aggregate, DomainEvent};
pub use cart::{Cart, CartItem};
pub use catalog::{
    Catalog, Category, DanglingCategoryRef, LOW_STOCK_THRESHOLD, Product, ProductFilter,
};
pub use common::{CategoryId, OrderId, ProductId, UserId};
pub use error::DomainError;
pub use journal::{EventEnvelope, Journal, Version};
pub use money::{Money, MoneyParseError};
pub use order::{
    DeliveryDetails, Order, OrderError, OrderLedger, OrderStatus, PaymentMethod, StatusPolicy,
    UnknownPaymentMethod,
};
pub use pricing::PriceBreakdown;
pub use service::{CommandResult, StoreService};
pub use session::{Role, Session, User};
pub use store::{StoreEvent, Storefront, seed_events};
