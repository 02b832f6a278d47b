use log::*;
use price_watch_engine::price_types::ProductUpdateEvent;
use shopify_tools::{helpers::parse_shopify_price, ShopifyProductUpdate};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductConversionError {
    #[error("Product {0} has no variants, so it has no price.")]
    MissingPrice(String),
    #[error("Product {product_id} has an invalid price. {reason}")]
    InvalidPrice { product_id: String, reason: String },
}

/// Converts the body of a Shopify product webhook into a [`ProductUpdateEvent`].
///
/// Only the first variant's price is used. Products with several variants are tracked as a single price.
pub fn product_update_from_shopify_product(
    product: ShopifyProductUpdate,
) -> Result<ProductUpdateEvent, ProductConversionError> {
    let product_id = product.product_id();
    let variant = product.variants.first().ok_or_else(|| ProductConversionError::MissingPrice(product_id.clone()))?;
    if product.variants.len() > 1 {
        debug!(
            "🛍️ Product {product_id} has {} variants. Only the first variant's price ({}) is tracked.",
            product.variants.len(),
            variant.price
        );
    }
    let price = parse_shopify_price(&variant.price)
        .map_err(|e| ProductConversionError::InvalidPrice { product_id: product_id.clone(), reason: e.to_string() })?;
    Ok(ProductUpdateEvent::new(product_id, product.title, price))
}
