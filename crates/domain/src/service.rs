//! Store service: the only place the current snapshot is replaced.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use common::{CategoryId, OrderId, ProductId};

use crate::aggregate::{Aggregate, DomainEvent};
use crate::catalog::{Category, Product};
use crate::error::DomainError;
use crate::journal::{EventEnvelope, Journal, Version};
use crate::order::{DeliveryDetails, Order, OrderStatus, PaymentMethod, StatusPolicy};
use crate::session::User;
use crate::store::{StoreEvent, Storefront, seed_events};

/// Result of command execution.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// The snapshot after applying the new events.
    pub snapshot: Arc<Storefront>,

    /// The events that were committed. Empty for a no-op.
    pub events: Vec<StoreEvent>,

    /// The snapshot version after the command.
    pub version: Version,
}

impl CommandResult {
    /// Returns true if the command changed nothing.
    pub fn is_noop(&self) -> bool {
        self.events.is_empty()
    }

    /// The order committed by this command, if any.
    pub fn placed_order(&self) -> Option<&Order> {
        self.events.iter().find_map(StoreEvent::placed_order)
    }
}

struct State {
    current: Arc<Storefront>,
    journal: Journal,
}

/// Owns the current storefront snapshot and its journal.
///
/// Each command runs against the current snapshot under one write guard:
/// the events are computed, applied to a copy, journalled and the copy is
/// swapped in before the guard drops. Readers holding an earlier
/// `Arc<Storefront>` keep a complete, consistent version.
pub struct StoreService {
    state: RwLock<State>,
}

impl StoreService {
    /// Creates a service starting from `initial`. Nothing is journalled.
    pub fn new(initial: Storefront) -> Self {
        Self {
            state: RwLock::new(State {
                current: Arc::new(initial),
                journal: Journal::new(),
            }),
        }
    }

    /// An empty store with the given status policy.
    pub fn with_policy(status_policy: StatusPolicy) -> Self {
        Self::new(Storefront::with_policy(status_policy))
    }

    /// A store populated with the demo data, committed through the journal
    /// so read models see it.
    pub fn seeded(status_policy: StatusPolicy) -> Self {
        let service = Self::with_policy(status_policy);
        let seed = seed_events();
        let count = seed.len();
        // Seeding an empty store cannot be rejected.
        if service.execute("seed", |_| Ok(seed)).is_ok() {
            tracing::info!(events = count, "seeded demo catalog");
        }
        service
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<Storefront> {
        Arc::clone(&self.read().current)
    }

    /// Every journalled envelope, oldest first.
    pub fn journal(&self) -> Vec<EventEnvelope> {
        self.read().journal.all().to_vec()
    }

    /// Journalled envelopes strictly after `sequence`.
    pub fn events_since(&self, sequence: Version) -> Vec<EventEnvelope> {
        self.read().journal.since(sequence).to_vec()
    }

    /// Runs a command against the current snapshot and commits its events.
    ///
    /// The command function receives the current snapshot and returns
    /// either a list of events to apply, or an error. An empty list commits
    /// nothing and returns the unchanged snapshot.
    #[tracing::instrument(skip(self, command_fn))]
    pub fn execute<F>(&self, command: &'static str, command_fn: F) -> Result<CommandResult, DomainError>
    where
        F: FnOnce(&Storefront) -> Result<Vec<StoreEvent>, DomainError>,
    {
        metrics::counter!("storefront_commands_total", "command" => command).increment(1);

        let mut state = self.write();
        let events = command_fn(&state.current).inspect_err(|e| {
            tracing::warn!(error = %e, "command rejected");
            metrics::counter!("storefront_rejected_commands_total", "command" => command)
                .increment(1);
        })?;

        if events.is_empty() {
            tracing::debug!("command was a no-op");
            metrics::counter!("storefront_noop_commands_total", "command" => command).increment(1);
            return Ok(CommandResult {
                snapshot: Arc::clone(&state.current),
                version: state.current.version(),
                events,
            });
        }

        let next = state.current.evolve(&events);
        let sequence = state.journal.append(&events, Utc::now());
        debug_assert_eq!(sequence, next.version());

        for event in &events {
            metrics::counter!("storefront_events_total", "event" => event.event_type())
                .increment(1);
        }

        let next = Arc::new(next);
        state.current = Arc::clone(&next);
        drop(state);

        tracing::debug!(version = %sequence, events = events.len(), "command committed");

        Ok(CommandResult {
            snapshot: next,
            version: sequence,
            events,
        })
    }

    // Catalog

    pub fn add_product(&self, product: Product) -> Result<CommandResult, DomainError> {
        self.execute("add_product", |store| Ok(store.add_product(product)))
    }

    pub fn update_product(&self, product: Product) -> Result<CommandResult, DomainError> {
        self.execute("update_product", |store| Ok(store.update_product(product)))
    }

    pub fn delete_product(&self, product_id: &ProductId) -> Result<CommandResult, DomainError> {
        self.execute("delete_product", |store| Ok(store.delete_product(product_id)))
    }

    pub fn add_category(&self, category: Category) -> Result<CommandResult, DomainError> {
        self.execute("add_category", |store| Ok(store.add_category(category)))
    }

    pub fn update_category(&self, category: Category) -> Result<CommandResult, DomainError> {
        self.execute("update_category", |store| Ok(store.update_category(category)))
    }

    pub fn delete_category(&self, category_id: &CategoryId) -> Result<CommandResult, DomainError> {
        self.execute("delete_category", |store| {
            Ok(store.delete_category(category_id))
        })
    }

    // Cart

    /// Adds the catalog's current snapshot of `product_id` to the cart.
    ///
    /// Unknown products are a no-op.
    pub fn add_to_cart(&self, product_id: &ProductId) -> Result<CommandResult, DomainError> {
        self.execute("add_to_cart", |store| {
            Ok(store
                .catalog()
                .product(product_id)
                .cloned()
                .map(|product| store.add_to_cart(product))
                .unwrap_or_default())
        })
    }

    pub fn remove_from_cart(&self, product_id: &ProductId) -> Result<CommandResult, DomainError> {
        self.execute("remove_from_cart", |store| {
            Ok(store.remove_from_cart(product_id))
        })
    }

    pub fn update_quantity(
        &self,
        product_id: &ProductId,
        delta: i64,
    ) -> Result<CommandResult, DomainError> {
        self.execute("update_quantity", |store| {
            Ok(store.update_quantity(product_id, delta))
        })
    }

    pub fn clear_cart(&self) -> Result<CommandResult, DomainError> {
        self.execute("clear_cart", |store| Ok(store.clear_cart()))
    }

    // Orders

    /// Commits the current cart as a new order and empties the cart.
    #[tracing::instrument(skip(self, delivery_details))]
    pub fn place_order(
        &self,
        delivery_details: DeliveryDetails,
        payment_method: PaymentMethod,
    ) -> Result<CommandResult, DomainError> {
        let result = self.execute("place_order", |store| {
            let mut order_id = OrderId::generate();
            while store.orders().get(&order_id).is_some() {
                order_id = OrderId::generate();
            }
            Ok(store.place_order(order_id, delivery_details, payment_method, Utc::now()))
        })?;

        if let Some(order) = result.placed_order() {
            metrics::counter!("storefront_orders_placed_total").increment(1);
            tracing::info!(
                order_id = %order.id,
                user_id = %order.user_id,
                total = %order.total,
                items = order.items.len(),
                "order placed"
            );
        }

        Ok(result)
    }

    pub fn update_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<CommandResult, DomainError> {
        self.execute("update_order_status", |store| {
            store.update_order_status(order_id, status)
        })
    }

    // Session

    pub fn login(&self, user: User) -> Result<CommandResult, DomainError> {
        self.execute("login", |store| Ok(store.login(user)))
    }

    pub fn logout(&self) -> Result<CommandResult, DomainError> {
        self.execute("logout", |store| Ok(store.logout()))
    }
}

impl Default for StoreService {
    fn default() -> Self {
        Self::with_policy(StatusPolicy::default())
    }
}
