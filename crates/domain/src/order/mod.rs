//! Order ledger and related types.

mod ledger;
mod state;
mod value_objects;

pub use ledger::{Order, OrderLedger};
pub use state::{OrderStatus, StatusPolicy};
pub use value_objects::{DeliveryDetails, PaymentMethod, UnknownPaymentMethod};

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The status change is not allowed under the strict policy.
    #[error("Invalid status transition: cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
}
