//! Shared types for the storefront workspace.

pub mod types;

pub use types::{CategoryId, OrderId, ProductId, UserId};
