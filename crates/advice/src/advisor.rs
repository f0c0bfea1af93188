//! Shopping advisor: the never-failing front of the advice boundary.

use std::sync::Arc;
use std::time::Duration;

use domain::Product;

use crate::error::AdviceError;
use crate::gemini::DEFAULT_TIMEOUT;
use crate::request::AdviceRequest;
use crate::service::AdviceService;

pub const OFFLINE_REPLY: &str = "Sorry, the AI assistant is currently offline (Missing API Key).";
pub const EMPTY_REPLY: &str = "I couldn't generate a response at the moment.";
pub const TROUBLE_REPLY: &str = "Sorry, I'm having trouble connecting to the brain right now.";

/// Wraps an optional [`AdviceService`] and always produces a reply.
///
/// Each request is bounded by `timeout`. Dropping the future returned by
/// [`ShoppingAdvisor::advise`] cancels the outbound request.
#[derive(Clone)]
pub struct ShoppingAdvisor {
    service: Option<Arc<dyn AdviceService>>,
    timeout: Duration,
}

impl ShoppingAdvisor {
    pub fn new(service: Arc<dyn AdviceService>) -> Self {
        Self {
            service: Some(service),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// An advisor with no backing service; every reply is the offline notice.
    pub fn offline() -> Self {
        Self {
            service: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_online(&self) -> bool {
        self.service.is_some()
    }

    /// Asks the backing service, mapping errors to a typed result.
    pub async fn try_advise(
        &self,
        query: &str,
        products: &[Product],
    ) -> Result<String, AdviceError> {
        let service = self.service.as_ref().ok_or(AdviceError::MissingApiKey)?;
        let request = AdviceRequest::new(query, products);

        let reply = tokio::time::timeout(self.timeout, service.ask(&request))
            .await
            .map_err(|_| AdviceError::Timeout(self.timeout))??;

        if reply.trim().is_empty() {
            return Err(AdviceError::EmptyResponse);
        }
        Ok(reply)
    }

    /// Answers `query` against the current `products`. Never fails.
    #[tracing::instrument(skip(self, products), fields(products = products.len()))]
    pub async fn advise(&self, query: &str, products: &[Product]) -> String {
        let (outcome, reply) = match self.try_advise(query, products).await {
            Ok(reply) => ("ok", reply),
            Err(AdviceError::MissingApiKey) => ("offline", OFFLINE_REPLY.to_string()),
            Err(AdviceError::EmptyResponse) => ("empty", EMPTY_REPLY.to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "advice request failed");
                let outcome = if matches!(e, AdviceError::Timeout(_)) {
                    "timeout"
                } else {
                    "error"
                };
                (outcome, TROUBLE_REPLY.to_string())
            }
        };

        metrics::counter!("advice_requests_total", "outcome" => outcome).increment(1);
        reply
    }
}
