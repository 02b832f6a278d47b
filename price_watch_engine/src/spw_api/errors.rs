use thiserror::Error;

use crate::traits::{NotificationError, PriceStoreError};

#[derive(Debug, Clone, Error)]
pub enum PriceTrackerError {
    #[error("Price store error: {0}")]
    StoreError(#[from] PriceStoreError),
    #[error("Price alert notification failed: {0}")]
    NotificationFailed(#[from] NotificationError),
}
