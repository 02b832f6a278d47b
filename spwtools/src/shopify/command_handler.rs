use anyhow::{Context, Result};
use chrono::{Days, Utc};
use log::*;
use shopify_tools::{ShopifyApi, ShopifyApiError, ShopifyConfig};

use crate::shopify::{
    formatting::{format_orders_with_product, format_product_detail, format_products},
    OrdersCommand,
    ProductsCommand,
    ShopifyCommand,
};

pub async fn handle_shopify_command(command: ShopifyCommand) -> Result<()> {
    use ShopifyCommand::*;
    match command {
        Products(products_cmd) => match products_cmd {
            ProductsCommand::List { count } => list_products(count).await,
            ProductsCommand::Get { id } => get_product(&id).await,
        },
        Orders(orders_cmd) => match orders_cmd {
            OrdersCommand::WithProduct { product_id, days } => orders_with_product(&product_id, days).await,
        },
    }
}

fn new_shopify_api() -> Result<ShopifyApi> {
    let config = ShopifyConfig::try_from_env().context("Shopify is not configured")?;
    debug!("Using Shopify shop {} (API version {})", config.shop, config.api_version);
    ShopifyApi::new(config).context("Error creating Shopify API")
}

pub async fn list_products(count: u64) -> Result<()> {
    let api = new_shopify_api()?;
    let products = api.fetch_products(count).await.context("Error fetching products")?;
    println!("{}", format_products(&products));
    Ok(())
}

pub async fn get_product(id: &str) -> Result<()> {
    let api = new_shopify_api()?;
    match api.fetch_product(id).await {
        Ok(product) => {
            println!("{}", format_product_detail(&product));
            Ok(())
        },
        Err(ShopifyApiError::EmptyResponse) => {
            println!("Product {id} not found");
            Ok(())
        },
        Err(e) => Err(e).context(format!("Error fetching product {id}")),
    }
}

pub async fn orders_with_product(product_id: &str, days: u64) -> Result<()> {
    let api = new_shopify_api()?;
    let since = Utc::now().checked_sub_days(Days::new(days)).context("The search window is too large")?;
    let orders = api
        .fetch_orders_with_product(product_id, since)
        .await
        .with_context(|| format!("Error fetching orders containing {product_id}"))?;
    println!("Orders containing {product_id} in the last {days} days");
    println!("{}", format_orders_with_product(&orders));
    Ok(())
}
