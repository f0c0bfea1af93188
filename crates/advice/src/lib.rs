//! Shopping assistant boundary.
//!
//! This crate isolates the one outbound call the storefront makes:
//! - [`AdviceService`] trait with a Gemini-backed and an in-memory implementation
//! - [`ShoppingAdvisor`] which bounds each request with a timeout and turns
//!   every failure into a fixed, user-facing reply

pub mod advisor;
pub mod error;
pub mod gemini;
pub mod request;
pub mod service;

pub use advisor::ShoppingAdvisor;
pub use error::AdviceError;
pub use gemini::{GeminiAdviceService, GeminiConfig};
pub use request::{AdviceRequest, product_digest};
pub use service::{AdviceService, InMemoryAdviceService};
