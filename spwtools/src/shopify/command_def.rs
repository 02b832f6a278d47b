use anyhow::{anyhow, Result};
use clap::Subcommand;
use shopify_tools::helpers::product_gid;

pub const DEFAULT_PRODUCT_COUNT: u64 = 10;
pub const DEFAULT_ORDER_HISTORY_DAYS: u64 = 30;

#[derive(Debug, Subcommand)]
pub enum ShopifyCommand {
    #[command(subcommand)]
    /// Retrieve products
    Products(ProductsCommand),
    #[command(subcommand)]
    /// Retrieve orders
    Orders(OrdersCommand),
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List the first products in the store
    List {
        /// The number of products to fetch
        #[arg(short = 'n', long = "count", default_value_t = DEFAULT_PRODUCT_COUNT)]
        count: u64,
    },
    /// Retrieves a product, and up to 10 of its variants, by its id
    Get {
        /// The product id, either numeric or as a GraphQL id (gid://shopify/Product/...)
        #[arg(required = true, index = 1, value_parser = parse_product_id)]
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// List recent orders that contain the given product
    #[command(name = "with-product")]
    WithProduct {
        /// The product id, either numeric or as a GraphQL id (gid://shopify/Product/...)
        #[arg(required = true, index = 1, value_parser = parse_product_id)]
        product_id: String,
        /// How many days back to search
        #[arg(short = 'd', long = "days", default_value_t = DEFAULT_ORDER_HISTORY_DAYS)]
        days: u64,
    },
}

/// Accepts `123` or `gid://shopify/Product/123` and returns the GraphQL id.
pub fn parse_product_id(s: &str) -> Result<String> {
    let s = s.trim();
    if let Ok(id) = s.parse::<i64>() {
        return Ok(product_gid(id));
    }
    match s.strip_prefix("gid://shopify/Product/") {
        Some(id) if id.parse::<i64>().is_ok() => Ok(s.to_string()),
        _ => Err(anyhow!("'{s}' is not a product id. Use a number, or gid://shopify/Product/<number>")),
    }
}
