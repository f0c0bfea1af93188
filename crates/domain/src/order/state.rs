//! Order status state machine.

use serde::{Deserialize, Serialize};

use super::OrderError;

/// The status of a placed order.
///
/// Strict transitions:
/// ```text
/// Pending ──► Processing ──► Shipped ──► Delivered
///    │            │
///    └────────────┴──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, not yet picked up by the shop.
    #[default]
    Pending,

    Processing,

    Shipped,

    /// Terminal.
    Delivered,

    /// Terminal.
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Returns true if the strict table allows moving from `self` to `next`.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Processing, Shipped)
                | (Shipped, Delivered)
                | (Pending | Processing, Cancelled)
        )
    }

    /// Returns true if this is a terminal state (no further strict transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown order status '{s}'"))
    }
}

/// How status changes are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    /// Any status may move to any other.
    #[default]
    Permissive,

    /// Only the transitions in [`OrderStatus::can_transition_to`] are allowed.
    Strict,
}

impl StatusPolicy {
    /// Checks a status change.
    ///
    /// Re-asserting the current status is always accepted; callers treat it
    /// as a no-op.
    pub fn check(&self, from: OrderStatus, to: OrderStatus) -> Result<(), OrderError> {
        match self {
            StatusPolicy::Permissive => Ok(()),
            StatusPolicy::Strict if from == to || from.can_transition_to(to) => Ok(()),
            StatusPolicy::Strict => Err(OrderError::InvalidTransition { from, to }),
        }
    }
}
