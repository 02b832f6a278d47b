use std::env;

use log::*;
use spw_common::Secret;

use crate::ShopifyApiError;

pub const DEFAULT_SHOPIFY_API_VERSION: &str = "2023-07";

#[derive(Debug, Clone, Default)]
pub struct ShopifyConfig {
    /// The shop domain, e.g. "my-shop.myshopify.com"
    pub shop: String,
    pub admin_access_token: Secret<String>,
    pub api_version: String,
}

impl ShopifyConfig {
    pub fn new(shop: &str, admin_access_token: &str) -> Self {
        Self {
            shop: shop.to_string(),
            admin_access_token: Secret::new(admin_access_token.to_string()),
            api_version: DEFAULT_SHOPIFY_API_VERSION.to_string(),
        }
    }

    /// Loads the Shopify API configuration from `SPW_SHOPIFY_SHOP`, `SPW_SHOPIFY_ADMIN_ACCESS_TOKEN` and
    /// (optionally) `SPW_SHOPIFY_API_VERSION`. The shop and access token are required.
    pub fn try_from_env() -> Result<Self, ShopifyApiError> {
        Self::try_from_vars(|name| env::var(name).ok())
    }

    /// As [`Self::try_from_env`], but reads variables through `vars` instead of the process environment.
    pub fn try_from_vars<F>(vars: F) -> Result<Self, ShopifyApiError>
    where F: Fn(&str) -> Option<String> {
        let shop = required_var(&vars, "SPW_SHOPIFY_SHOP")?;
        let admin_access_token = Secret::new(required_var(&vars, "SPW_SHOPIFY_ADMIN_ACCESS_TOKEN")?);
        let api_version = vars("SPW_SHOPIFY_API_VERSION").filter(|s| !s.trim().is_empty()).unwrap_or_else(|| {
            debug!("SPW_SHOPIFY_API_VERSION not set, using {DEFAULT_SHOPIFY_API_VERSION} as default");
            DEFAULT_SHOPIFY_API_VERSION.to_string()
        });
        Ok(Self { shop, admin_access_token, api_version })
    }
}

fn required_var<F>(vars: &F, name: &str) -> Result<String, ShopifyApiError>
where F: Fn(&str) -> Option<String> {
    match vars(name) {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Some(_) => Err(ShopifyApiError::ConfigurationError(format!("{name} is set, but empty"))),
        None => Err(ShopifyApiError::ConfigurationError(format!("{name} is not set"))),
    }
}
