use std::fmt::Display;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

//--------------------------------------       ProductId       ---------------------------------------------------------
/// An opaque product identifier. It must be stable across updates for the same product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------   ProductUpdateEvent  ---------------------------------------------------------
/// A single product update, as received from the storefront.
///
/// Products with several variants are reduced to the price of their first variant before they reach the engine.
/// Variants with independent price histories are not tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdateEvent {
    pub product_id: ProductId,
    pub title: String,
    pub price: Decimal,
}

impl ProductUpdateEvent {
    pub fn new<P: Into<ProductId>, S: Into<String>>(product_id: P, title: S, price: Decimal) -> Self {
        Self { product_id: product_id.into(), title: title.into(), price }
    }
}

impl Display for ProductUpdateEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) @ {}", self.title, self.product_id, self.price)
    }
}

//--------------------------------------       PriceAlert      ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceAlert {
    pub title: String,
    pub old_price: Decimal,
    pub new_price: Decimal,
    pub decrease_percent: Decimal,
}

impl PriceAlert {
    /// Builds an alert if the move from `old_price` to `new_price` is a decrease of strictly more than
    /// `threshold_percent`. A zero baseline never produces an alert.
    pub fn for_price_change(
        title: &str,
        old_price: Decimal,
        new_price: Decimal,
        threshold_percent: Decimal,
    ) -> Option<Self> {
        let decrease_percent = percent_decrease(old_price, new_price)?;
        (decrease_percent > threshold_percent).then(|| Self {
            title: title.to_string(),
            old_price,
            new_price,
            decrease_percent,
        })
    }

    pub fn subject(&self) -> String {
        format!("Price Alert: {}", self.title)
    }
}

impl Display for PriceAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: ${:.2} -> ${:.2} ({:.2}% decrease)",
            self.title, self.old_price, self.new_price, self.decrease_percent
        )
    }
}

/// `(old - new) / old * 100`, for price decreases only. `None` if the price did not go down, or if `old` is zero.
pub fn percent_decrease(old_price: Decimal, new_price: Decimal) -> Option<Decimal> {
    if old_price.is_zero() || old_price <= new_price {
        return None;
    }
    Some((old_price - new_price) / old_price * Decimal::ONE_HUNDRED)
}
