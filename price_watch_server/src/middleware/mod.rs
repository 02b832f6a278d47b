mod hmac;

pub use hmac::{HmacMiddlewareFactory, HmacMiddlewareService, MAX_WEBHOOK_PAYLOAD_SIZE, SHOPIFY_HMAC_HEADER};
