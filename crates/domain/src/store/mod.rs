//! The storefront snapshot and its events.

mod events;
mod seed;
mod storefront;

pub use events::StoreEvent;
pub use seed::seed_events;
pub use storefront::Storefront;
