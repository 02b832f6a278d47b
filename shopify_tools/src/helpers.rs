use std::str::FromStr;

use rust_decimal::Decimal;

use crate::ShopifyApiError;

/// Shopify expresses prices as decimal strings, e.g. `"19.99"`. Negative prices are rejected.
pub fn parse_shopify_price(price: &str) -> Result<Decimal, ShopifyApiError> {
    let value = Decimal::from_str(price.trim())
        .map_err(|e| ShopifyApiError::InvalidCurrencyAmount(format!("Invalid price value: {price}. {e}.")))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ShopifyApiError::InvalidCurrencyAmount(format!("Prices cannot be negative: {price}")));
    }
    Ok(value)
}

/// The GraphQL global id for a product with the given numeric id.
pub fn product_gid(id: i64) -> String {
    format!("gid://shopify/Product/{id}")
}
