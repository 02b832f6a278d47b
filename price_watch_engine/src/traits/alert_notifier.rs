use thiserror::Error;

use crate::price_types::PriceAlert;

#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("The notifier is not configured correctly. {0}")]
    ConfigurationError(String),
    #[error("Could not build the alert message. {0}")]
    MessageError(String),
    #[error("Could not deliver the alert. {0}")]
    DeliveryError(String),
    #[error("Alert delivery timed out after {0} ms")]
    Timeout(u128),
}

/// Delivers price alerts. Delivery is attempted exactly once; failures are reported, never retried.
#[allow(async_fn_in_trait)]
pub trait AlertNotifier {
    async fn send_alert(&self, alert: &PriceAlert) -> Result<(), NotificationError>;
}
