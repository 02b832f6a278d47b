//! Shopify Price Watch engine
//!
//! This library contains the provider-agnostic core of the price watch server: it decides whether a product update
//! constitutes an alert-worthy price drop, and keeps track of the last price seen for every product.
//!
//! The library is divided into these sections:
//! 1. The data types ([`mod@price_types`]) that flow through the engine: product update events and price alerts.
//! 2. The backend contracts ([`mod@traits`]). [`PriceStore`] holds the price baselines, and [`AlertNotifier`] delivers
//!    alerts. An in-memory store is provided in [`mod@store`]; notifiers (e.g. email) live with the server.
//! 3. The public API ([`PriceTrackerApi`]), which ties a store and a notifier together.
//! 4. Helpers for verifying Shopify webhook signatures ([`mod@helpers`]).
pub mod helpers;
pub mod price_types;
pub mod store;
pub mod traits;

mod spw_api;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use spw_api::{
    errors::PriceTrackerError,
    price_tracker_api::{PriceTrackerApi, DEFAULT_ALERT_THRESHOLD_PERCENT, DEFAULT_NOTIFICATION_TIMEOUT},
};
pub use store::InMemoryPriceStore;
pub use traits::{AlertNotifier, NotificationError, PriceStore, PriceStoreError};
