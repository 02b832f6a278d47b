pub mod email;
pub mod shopify;
