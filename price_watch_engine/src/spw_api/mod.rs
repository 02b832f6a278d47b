//! # Price watch public API
//!
//! [`price_tracker_api::PriceTrackerApi`] is created by supplying a backend that implements
//! [`crate::traits::PriceStore`] and a notifier that implements [`crate::traits::AlertNotifier`]:
//!
//! ```rust,ignore
//! use price_watch_engine::{InMemoryPriceStore, PriceTrackerApi};
//! let api = PriceTrackerApi::new(InMemoryPriceStore::new(), my_notifier);
//! let alert = api.handle_product_update(event).await?;
//! ```
pub mod errors;
pub mod price_tracker_api;
