//! # Shopify tools
//!
//! A thin client for the Shopify Admin API, plus the data objects that Shopify sends us in product webhooks.
//!
//! * [`ShopifyApi`] wraps REST and GraphQL calls against the Admin API for the shop in [`ShopifyConfig`].
//! * [`ShopifyProductUpdate`] is the body of a `products/update` webhook call.
//! * [`helpers::parse_shopify_price`] converts Shopify's string prices into decimals.
mod api;
mod config;
mod error;
mod shopify_product;

pub mod data_objects;
pub mod helpers;

pub use api::ShopifyApi;
pub use config::ShopifyConfig;
pub use error::ShopifyApiError;
pub use shopify_product::{ShopifyProductUpdate, ShopifyVariant};
