//! Read models built from the storefront journal.
//!
//! This crate provides the query side next to [`domain::StoreService`]:
//! - [`Projection`] trait for folding journal envelopes into read models
//! - [`ReadModel`] trait for query access to denormalized data
//! - [`ProjectionProcessor`] for feeding journal envelopes to projections
//! - Two views: the admin sales overview and per-customer order statistics

pub mod error;
pub mod processor;
pub mod projection;
pub mod read_model;
pub mod views;

pub use error::{ProjectionError, Result};
pub use processor::ProjectionProcessor;
pub use projection::{Projection, ProjectionPosition};
pub use read_model::ReadModel;
pub use views::{CustomerOrdersSummary, CustomerOrdersView, SalesOverview, SalesOverviewView};
