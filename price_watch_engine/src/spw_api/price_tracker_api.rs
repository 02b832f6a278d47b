//! The `PriceTrackerApi` compares every product update against the last known price of the product and decides
//! whether the change warrants an alert.
//!
//! The rules are:
//! * The first update for a product only records a baseline. There is nothing to compare it against.
//! * Every update overwrites the baseline, whether it results in an alert or not. A price that slides down in many
//!   small steps therefore never alerts; only a single drop larger than the threshold does.
//! * A drop alerts when it is strictly larger than the threshold (20% by default).
//! * A zero baseline never alerts.
//!
//! The baseline is updated before the notifier is called, so a failed or slow notification never affects the stored
//! prices.
use std::{fmt::Debug, time::Duration};

use log::*;
use rust_decimal::Decimal;

use crate::{
    price_types::{PriceAlert, ProductUpdateEvent},
    traits::{AlertNotifier, NotificationError, PriceStore},
    PriceTrackerError,
};

/// Price drops strictly larger than this percentage trigger an alert.
pub const DEFAULT_ALERT_THRESHOLD_PERCENT: u32 = 20;
pub const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(10);

pub struct PriceTrackerApi<S, N> {
    store: S,
    notifier: N,
    threshold_percent: Decimal,
    notification_timeout: Duration,
}

impl<S, N> Debug for PriceTrackerApi<S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PriceTrackerApi (threshold: {}%)", self.threshold_percent)
    }
}

impl<S, N> PriceTrackerApi<S, N>
where
    S: PriceStore,
    N: AlertNotifier,
{
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            store,
            notifier,
            threshold_percent: Decimal::from(DEFAULT_ALERT_THRESHOLD_PERCENT),
            notification_timeout: DEFAULT_NOTIFICATION_TIMEOUT,
        }
    }

    pub fn with_threshold(mut self, threshold_percent: Decimal) -> Self {
        self.threshold_percent = threshold_percent;
        self
    }

    pub fn with_notification_timeout(mut self, timeout: Duration) -> Self {
        self.notification_timeout = timeout;
        self
    }

    pub fn threshold_percent(&self) -> Decimal {
        self.threshold_percent
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records the new price for the product and returns an alert if the price dropped by more than the threshold.
    ///
    /// This does not notify anyone. See [`Self::handle_product_update`].
    pub async fn process(&self, event: &ProductUpdateEvent) -> Result<Option<PriceAlert>, PriceTrackerError> {
        let previous = self.store.swap_last_price(&event.product_id, event.price).await?;
        let Some(old_price) = previous else {
            info!("📈️ Cached initial price for {}: {}", event.title, event.price);
            return Ok(None);
        };
        if old_price > event.price {
            debug!("📈️ Price for {} went down from {old_price} to {}", event.title, event.price);
        }
        let alert = PriceAlert::for_price_change(&event.title, old_price, event.price, self.threshold_percent);
        match &alert {
            Some(a) => info!("📈️ Price decreased by {:.2}% for {}", a.decrease_percent, a.title),
            None => trace!("📈️ No alert for {}. {old_price} -> {}", event.title, event.price),
        }
        Ok(alert)
    }

    /// Sends the alert via the notifier. Delivery is bounded by the notification timeout.
    pub async fn notify(&self, alert: &PriceAlert) -> Result<(), PriceTrackerError> {
        debug!("📈️ Sending price alert for {}", alert.title);
        match tokio::time::timeout(self.notification_timeout, self.notifier.send_alert(alert)).await {
            Ok(Ok(())) => {
                info!("📈️ Price alert sent for {}", alert.title);
                Ok(())
            },
            Ok(Err(e)) => {
                warn!("📈️ Could not send price alert for {}. {e}", alert.title);
                Err(e.into())
            },
            Err(_) => {
                warn!("📈️ Price alert for {} timed out", alert.title);
                Err(NotificationError::Timeout(self.notification_timeout.as_millis()).into())
            },
        }
    }

    /// Processes the update and, if it results in an alert, delivers it. The alert that was sent (if any) is returned.
    ///
    /// If delivery fails, the error is returned, but the price baseline has already been updated and stays that way.
    pub async fn handle_product_update(
        &self,
        event: ProductUpdateEvent,
    ) -> Result<Option<PriceAlert>, PriceTrackerError> {
        let alert = self.process(&event).await?;
        if let Some(alert) = &alert {
            self.notify(alert).await?;
        }
        Ok(alert)
    }
}
