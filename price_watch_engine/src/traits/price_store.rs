use rust_decimal::Decimal;
use thiserror::Error;

use crate::price_types::ProductId;

#[derive(Debug, Clone, Error)]
pub enum PriceStoreError {
    #[error("Price store backend error: {0}")]
    BackendError(String),
}

/// The `PriceStore` trait defines the storage of price baselines, i.e. the last price seen for each product.
///
/// Implementations must be safe to share between concurrently running requests.
#[allow(async_fn_in_trait)]
pub trait PriceStore {
    /// Fetch the last recorded price for the given product, or `None` if the product has never been seen.
    async fn fetch_last_price(&self, product_id: &ProductId) -> Result<Option<Decimal>, PriceStoreError>;

    /// Record `price` as the latest price for the given product, overwriting whatever was there.
    async fn set_last_price(&self, product_id: &ProductId, price: Decimal) -> Result<(), PriceStoreError>;

    /// Record `price` as the latest price for the given product and return the price it replaced.
    ///
    /// The read and the write happen as a single atomic step with respect to other calls for the same product. Two
    /// concurrent swaps on one product therefore always observe each other in some serial order.
    async fn swap_last_price(&self, product_id: &ProductId, price: Decimal)
        -> Result<Option<Decimal>, PriceStoreError>;
}
