use serde::{Deserialize, Serialize};

use crate::helpers::product_gid;

/// The body of a Shopify `products/update` webhook call.
///
/// Shopify sends a lot more than this. Only the fields we act on are required; everything else is optional so that
/// payload changes on Shopify's side don't break deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopifyProductUpdate {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub variants: Vec<ShopifyVariant>,
    #[serde(default)]
    pub admin_graphql_api_id: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopifyVariant {
    pub id: i64,
    pub price: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub compare_at_price: Option<String>,
}

impl ShopifyProductUpdate {
    /// The stable identifier for this product. This is the GraphQL id if Shopify provided one, otherwise it is
    /// constructed from the numeric id.
    pub fn product_id(&self) -> String {
        self.admin_graphql_api_id.clone().unwrap_or_else(|| product_gid(self.id))
    }
}
