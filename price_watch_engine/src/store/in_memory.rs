use std::sync::Arc;

use dashmap::DashMap;
use log::*;
use rust_decimal::Decimal;

use crate::{
    price_types::ProductId,
    traits::{PriceStore, PriceStoreError},
};

/// A volatile, process-wide [`PriceStore`]. Clones share the same underlying map, so a single instance can be created
/// at startup and handed to every worker.
///
/// There is no eviction and no size bound. Everything is lost when the process exits, which means that the first
/// update for a product after a restart is always treated as a new baseline.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceStore {
    prices: Arc<DashMap<ProductId, Decimal>>,
}

impl InMemoryPriceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl PriceStore for InMemoryPriceStore {
    async fn fetch_last_price(&self, product_id: &ProductId) -> Result<Option<Decimal>, PriceStoreError> {
        Ok(self.prices.get(product_id).map(|p| *p.value()))
    }

    async fn set_last_price(&self, product_id: &ProductId, price: Decimal) -> Result<(), PriceStoreError> {
        trace!("📈️ Setting last price for {product_id} to {price}");
        self.prices.insert(product_id.clone(), price);
        Ok(())
    }

    async fn swap_last_price(
        &self,
        product_id: &ProductId,
        price: Decimal,
    ) -> Result<Option<Decimal>, PriceStoreError> {
        // `insert` holds the shard's write lock for the read and the write, which is what makes this atomic.
        let old = self.prices.insert(product_id.clone(), price);
        trace!("📈️ Swapped last price for {product_id}: {old:?} -> {price}");
        Ok(old)
    }
}
