use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use log::*;

use crate::{
    price_types::PriceAlert,
    traits::{AlertNotifier, NotificationError},
};

/// Keeps every alert it is asked to send. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    alerts: Arc<Mutex<Vec<PriceAlert>>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<PriceAlert> {
        self.alerts.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl AlertNotifier for RecordingNotifier {
    async fn send_alert(&self, alert: &PriceAlert) -> Result<(), NotificationError> {
        debug!("🧪️ Recording alert: {alert}");
        self.alerts
            .lock()
            .map_err(|e| NotificationError::DeliveryError(e.to_string()))?
            .push(alert.clone());
        Ok(())
    }
}

/// Always fails to deliver.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingNotifier;

impl AlertNotifier for FailingNotifier {
    async fn send_alert(&self, _alert: &PriceAlert) -> Result<(), NotificationError> {
        Err(NotificationError::DeliveryError("Connection refused".into()))
    }
}

/// Takes the given time before reporting success.
#[derive(Debug, Clone, Copy)]
pub struct SlowNotifier(pub Duration);

impl AlertNotifier for SlowNotifier {
    async fn send_alert(&self, _alert: &PriceAlert) -> Result<(), NotificationError> {
        tokio::time::sleep(self.0).await;
        Ok(())
    }
}
