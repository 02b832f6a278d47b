//! # Backend contracts
//!
//! * [`PriceStore`] holds the last observed price of every product. It is the only mutable state in the engine.
//! * [`AlertNotifier`] delivers a [`crate::price_types::PriceAlert`] to a human. The engine defines the contract only;
//!   the transport (email, chat, ...) lives with whoever wires the engine up.
mod alert_notifier;
mod price_store;

pub use alert_notifier::{AlertNotifier, NotificationError};
pub use price_store::{PriceStore, PriceStoreError};
