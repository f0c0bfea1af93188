//! Shared application state.

use std::sync::Arc;

use advice::{GeminiAdviceService, GeminiConfig, ShoppingAdvisor};
use domain::StoreService;
use projections::{CustomerOrdersView, Projection, ProjectionProcessor, SalesOverviewView};
use secrecy::ExposeSecret;

use crate::config::Config;
use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub store: StoreService,
    pub processor: ProjectionProcessor,
    pub sales: SalesOverviewView,
    pub customers: CustomerOrdersView,
    pub advisor: ShoppingAdvisor,
}

impl AppState {
    /// Wires both read models to a fresh processor.
    pub fn new(store: StoreService, advisor: ShoppingAdvisor) -> Self {
        let sales = SalesOverviewView::new();
        let customers = CustomerOrdersView::new();

        let mut processor = ProjectionProcessor::new();
        processor.register(Box::new(sales.clone()) as Box<dyn Projection>);
        processor.register(Box::new(customers.clone()) as Box<dyn Projection>);

        Self {
            store,
            processor,
            sales,
            customers,
            advisor,
        }
    }

    /// Brings the read models up to the current journal.
    pub async fn refresh_views(&self) -> Result<(), ApiError> {
        let seen = self
            .sales
            .position()
            .await
            .min(self.customers.position().await);
        let pending = self.store.events_since(seen.last_sequence());
        self.processor.catch_up(&pending).await?;
        Ok(())
    }
}

fn advisor_from_config(config: &Config) -> ShoppingAdvisor {
    let Some(api_key) = &config.advice.api_key else {
        tracing::warn!("no advice API key configured, assistant is offline");
        return ShoppingAdvisor::offline();
    };

    let gemini = GeminiConfig::new(api_key.expose_secret())
        .with_model(config.advice.model.clone())
        .with_timeout(config.advice.timeout);

    match GeminiAdviceService::new(gemini) {
        Ok(service) => ShoppingAdvisor::new(Arc::new(service)).with_timeout(config.advice.timeout),
        Err(e) => {
            tracing::warn!(error = %e, "failed to build advice client, assistant is offline");
            ShoppingAdvisor::offline()
        }
    }
}

/// Creates the application state described by `config`.
pub fn create_default_state(config: &Config) -> Arc<AppState> {
    let policy = config.status_policy();
    let store = if config.seed_demo_data {
        StoreService::seeded(policy)
    } else {
        StoreService::with_policy(policy)
    };

    Arc::new(AppState::new(store, advisor_from_config(config)))
}
