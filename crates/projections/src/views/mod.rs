//! Read model views built from the storefront journal.

pub mod customer_orders;
pub mod sales_overview;

pub use customer_orders::{CustomerOrdersSummary, CustomerOrdersView};
pub use sales_overview::{SalesOverview, SalesOverviewView};
