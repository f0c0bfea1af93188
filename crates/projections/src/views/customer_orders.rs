//! Customer orders read model: per-customer order statistics.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{OrderId, UserId};
use domain::{EventEnvelope, Money, OrderStatus, StoreEvent};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::Result;
use crate::projection::{Projection, ProjectionPosition};
use crate::read_model::ReadModel;

/// Per-customer order statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerOrdersSummary {
    pub user_id: UserId,
    pub customer_name: String,
    pub total_orders: u64,
    pub cancelled_orders: u64,

    /// Sum of totals over orders that are not cancelled.
    pub total_spent: Money,

    /// Most recent first.
    pub order_ids: Vec<OrderId>,
}

impl CustomerOrdersSummary {
    fn new(user_id: UserId, customer_name: String) -> Self {
        Self {
            user_id,
            customer_name,
            total_orders: 0,
            cancelled_orders: 0,
            total_spent: Money::zero(),
            order_ids: Vec::new(),
        }
    }
}

#[derive(Default)]
struct CustomerOrdersState {
    customers: HashMap<UserId, CustomerOrdersSummary>,
    /// Maps order_id -> (customer, order total) for status changes.
    orders: HashMap<OrderId, (UserId, Money)>,
    position: ProjectionPosition,
}

/// Read model view for per-customer order statistics.
///
/// Guest checkouts are grouped under the guest user id.
#[derive(Clone, Default)]
pub struct CustomerOrdersView {
    state: Arc<RwLock<CustomerOrdersState>>,
}

impl CustomerOrdersView {
    /// Creates a new empty customer orders view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets statistics for a specific customer.
    pub async fn get_customer(&self, user_id: &UserId) -> Option<CustomerOrdersSummary> {
        self.state.read().await.customers.get(user_id).cloned()
    }

    /// Gets all customer statistics.
    pub async fn get_all_customers(&self) -> Vec<CustomerOrdersSummary> {
        self.state
            .read()
            .await
            .customers
            .values()
            .cloned()
            .collect()
    }

    /// Gets the top customers by total spent, limited to `limit` results.
    pub async fn get_top_customers(&self, limit: usize) -> Vec<CustomerOrdersSummary> {
        let mut customers = self.get_all_customers().await;
        customers.sort_by(|a, b| {
            b.total_spent
                .cmp(&a.total_spent)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        customers.truncate(limit);
        customers
    }
}

fn apply_status_change(
    state: &mut CustomerOrdersState,
    order_id: &OrderId,
    from: OrderStatus,
    to: OrderStatus,
) {
    let Some((user_id, total)) = state.orders.get(order_id).cloned() else {
        return;
    };
    let Some(customer) = state.customers.get_mut(&user_id) else {
        return;
    };

    let was_cancelled = from == OrderStatus::Cancelled;
    let is_cancelled = to == OrderStatus::Cancelled;
    if !was_cancelled && is_cancelled {
        customer.cancelled_orders += 1;
        customer.total_spent -= total;
    } else if was_cancelled && !is_cancelled {
        // Only reachable under the permissive status policy
        customer.cancelled_orders = customer.cancelled_orders.saturating_sub(1);
        customer.total_spent += total;
    }
}

#[async_trait]
impl Projection for CustomerOrdersView {
    fn name(&self) -> &'static str {
        "CustomerOrdersView"
    }

    async fn handle(&self, envelope: &EventEnvelope) -> Result<()> {
        let mut state = self.state.write().await;
        // A concurrent catch-up may have applied it since the processor looked
        if state.position.has_seen(envelope.sequence) {
            return Ok(());
        }

        match &envelope.event {
            StoreEvent::OrderPlaced { order } if !state.orders.contains_key(&order.id) => {
                state
                    .orders
                    .insert(order.id.clone(), (order.user_id.clone(), order.total));

                let customer = state
                    .customers
                    .entry(order.user_id.clone())
                    .or_insert_with(|| {
                        CustomerOrdersSummary::new(
                            order.user_id.clone(),
                            order.customer_name.clone(),
                        )
                    });
                customer.total_orders += 1;
                customer.order_ids.insert(0, order.id.clone());
                if order.status == OrderStatus::Cancelled {
                    customer.cancelled_orders += 1;
                } else {
                    customer.total_spent += order.total;
                }
            }
            StoreEvent::OrderStatusChanged { order_id, from, to } => {
                apply_status_change(&mut state, order_id, *from, *to);
            }
            _ => {}
        }

        state.position = state.position.record(envelope.sequence);
        Ok(())
    }

    async fn position(&self) -> ProjectionPosition {
        self.state.read().await.position
    }

    async fn reset(&self) -> Result<()> {
        *self.state.write().await = CustomerOrdersState::default();
        Ok(())
    }
}

impl ReadModel for CustomerOrdersView {
    fn name(&self) -> &'static str {
        "CustomerOrdersView"
    }

    fn count(&self) -> usize {
        self.state
            .try_read()
            .map(|s| s.customers.len())
            .unwrap_or(0)
    }
}
