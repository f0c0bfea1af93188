//! Sales overview read model for the admin dashboard.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{OrderId, ProductId};
use domain::{EventEnvelope, LOW_STOCK_THRESHOLD, Money, OrderStatus, StoreEvent};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::Result;
use crate::projection::{Projection, ProjectionPosition};
use crate::read_model::ReadModel;

/// Point-in-time dashboard figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesOverview {
    pub total_orders: u64,

    /// Sum of every recorded order total, including the delivery fee.
    pub revenue: Money,

    pub orders_by_status: HashMap<OrderStatus, u64>,
    pub product_count: usize,
    pub category_count: usize,

    /// Products whose stock is below the low-stock threshold.
    pub low_stock: Vec<ProductId>,

    pub last_order_at: Option<DateTime<Utc>>,
}

#[derive(Default)]
struct SalesOverviewState {
    revenue: Money,
    order_status: HashMap<OrderId, OrderStatus>,
    stock: HashMap<ProductId, u32>,
    category_count: usize,
    last_order_at: Option<DateTime<Utc>>,
    position: ProjectionPosition,
}

impl SalesOverviewState {
    fn overview(&self) -> SalesOverview {
        let mut orders_by_status = HashMap::new();
        for status in self.order_status.values() {
            *orders_by_status.entry(*status).or_insert(0) += 1;
        }

        let mut low_stock: Vec<ProductId> = self
            .stock
            .iter()
            .filter(|(_, stock)| **stock < LOW_STOCK_THRESHOLD)
            .map(|(id, _)| id.clone())
            .collect();
        low_stock.sort();

        SalesOverview {
            total_orders: self.order_status.len() as u64,
            revenue: self.revenue,
            orders_by_status,
            product_count: self.stock.len(),
            category_count: self.category_count,
            low_stock,
            last_order_at: self.last_order_at,
        }
    }
}

/// Read model view for the admin overview: revenue, order counts per
/// status, and catalog size.
#[derive(Clone, Default)]
pub struct SalesOverviewView {
    state: Arc<RwLock<SalesOverviewState>>,
}

impl SalesOverviewView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the current dashboard figures.
    pub async fn overview(&self) -> SalesOverview {
        self.state.read().await.overview()
    }

    /// Gets the number of orders currently in `status`.
    pub async fn orders_in_status(&self, status: OrderStatus) -> u64 {
        self.state
            .read()
            .await
            .order_status
            .values()
            .filter(|s| **s == status)
            .count() as u64
    }
}

#[async_trait]
impl Projection for SalesOverviewView {
    fn name(&self) -> &'static str {
        "SalesOverviewView"
    }

    async fn handle(&self, envelope: &EventEnvelope) -> Result<()> {
        let mut state = self.state.write().await;
        // A concurrent catch-up may have applied it since the processor looked
        if state.position.has_seen(envelope.sequence) {
            return Ok(());
        }

        match &envelope.event {
            StoreEvent::ProductAdded(product) | StoreEvent::ProductUpdated(product) => {
                state.stock.insert(product.id.clone(), product.stock);
            }
            StoreEvent::ProductDeleted { product_id } => {
                state.stock.remove(product_id);
            }
            StoreEvent::CategoryAdded(_) => state.category_count += 1,
            StoreEvent::CategoryDeleted { .. } => {
                state.category_count = state.category_count.saturating_sub(1);
            }
            StoreEvent::OrderPlaced { order } => {
                if !state.order_status.contains_key(&order.id) {
                    state.order_status.insert(order.id.clone(), order.status);
                    state.revenue += order.total;
                    state.last_order_at = state.last_order_at.max(Some(order.created_at));
                }
            }
            StoreEvent::OrderStatusChanged { order_id, to, .. } => {
                if let Some(status) = state.order_status.get_mut(order_id) {
                    *status = *to;
                }
            }
            // Cart and session activity doesn't affect the overview
            StoreEvent::CategoryUpdated(_)
            | StoreEvent::CartItemAdded { .. }
            | StoreEvent::CartItemRemoved { .. }
            | StoreEvent::CartQuantityChanged { .. }
            | StoreEvent::CartCleared
            | StoreEvent::UserLoggedIn(_)
            | StoreEvent::UserLoggedOut => {}
        }

        state.position = state.position.record(envelope.sequence);
        Ok(())
    }

    async fn position(&self) -> ProjectionPosition {
        self.state.read().await.position
    }

    async fn reset(&self) -> Result<()> {
        *self.state.write().await = SalesOverviewState::default();
        Ok(())
    }
}

impl ReadModel for SalesOverviewView {
    fn name(&self) -> &'static str {
        "SalesOverviewView"
    }

    fn count(&self) -> usize {
        self.state
            .try_read()
            .map(|s| s.order_status.len())
            .unwrap_or(0)
    }
}
