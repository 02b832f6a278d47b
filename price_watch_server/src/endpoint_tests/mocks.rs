use mockall::mock;
use price_watch_engine::{
    price_types::{PriceAlert, ProductId},
    traits::{AlertNotifier, NotificationError, PriceStore, PriceStoreError},
};
use rust_decimal::Decimal;

mock! {
    pub Store {}
    impl PriceStore for Store {
        async fn fetch_last_price(&self, product_id: &ProductId) -> Result<Option<Decimal>, PriceStoreError>;
        async fn set_last_price(&self, product_id: &ProductId, price: Decimal) -> Result<(), PriceStoreError>;
        async fn swap_last_price(&self, product_id: &ProductId, price: Decimal) -> Result<Option<Decimal>, PriceStoreError>;
    }
}

mock! {
    pub Notifier {}
    impl AlertNotifier for Notifier {
        async fn send_alert(&self, alert: &PriceAlert) -> Result<(), NotificationError>;
    }
}
