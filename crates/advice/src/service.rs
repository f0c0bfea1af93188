//! Advice service trait and in-memory implementation.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::AdviceError;
use crate::request::AdviceRequest;

/// Trait for answering shopper questions.
#[async_trait]
pub trait AdviceService: Send + Sync {
    /// Returns the model's raw answer. An empty string is a valid answer.
    async fn ask(&self, request: &AdviceRequest) -> Result<String, AdviceError>;
}

#[derive(Debug, Default)]
struct InMemoryAdviceState {
    replies: VecDeque<String>,
    requests: Vec<AdviceRequest>,
    failure: Option<String>,
    missing_key: bool,
    delay: Option<Duration>,
}

/// In-memory advice service for testing.
///
/// Replies are handed out in the order they were scripted; once they run
/// out the service answers with an empty string.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAdviceService {
    state: Arc<Mutex<InMemoryAdviceState>>,
}

impl InMemoryAdviceService {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InMemoryAdviceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues a reply for the next request.
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.lock().replies.push_back(reply.into());
    }

    /// Configures the service to fail every request with `reason`.
    pub fn set_failure(&self, reason: Option<&str>) {
        self.lock().failure = reason.map(str::to_string);
    }

    /// Configures the service to report a missing API key.
    pub fn set_missing_key(&self, missing: bool) {
        self.lock().missing_key = missing;
    }

    /// Delays every answer by `delay`.
    pub fn set_delay(&self, delay: Option<Duration>) {
        self.lock().delay = delay;
    }

    /// Returns every request seen so far.
    pub fn requests(&self) -> Vec<AdviceRequest> {
        self.lock().requests.clone()
    }
}

#[async_trait]
impl AdviceService for InMemoryAdviceService {
    async fn ask(&self, request: &AdviceRequest) -> Result<String, AdviceError> {
        let delay = {
            let mut state = self.lock();
            state.requests.push(request.clone());
            state.delay
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.lock();
        if state.missing_key {
            return Err(AdviceError::MissingApiKey);
        }
        if let Some(reason) = &state.failure {
            return Err(AdviceError::Unavailable(reason.clone()));
        }
        Ok(state.replies.pop_front().unwrap_or_default())
    }
}
