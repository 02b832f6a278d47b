//! Webhook signatures
//!
//! Shopify signs every webhook call with HMAC-SHA256, using the app's webhook secret as the key and the raw request body
//! as the message. The base64-encoded digest is sent along in a request header.
//!
//! The signature covers the exact bytes on the wire. Always verify against the body as received, never against a
//! re-serialised copy of the parsed JSON.
use hmac::{Hmac, Mac};
use log::*;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Calculates the base64-encoded HMAC-SHA256 digest of `data`.
pub fn calculate_hmac(secret: &[u8], data: &[u8]) -> String {
    // HMAC accepts keys of any length
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take a key of any size");
    mac.update(data);
    base64::encode(mac.finalize().into_bytes())
}

/// Checks `signature` (base64) against the HMAC-SHA256 digest of `data`.
///
/// The digest comparison is constant-time. Empty, non-base64 or wrong-length signatures are rejected, as is an empty
/// secret. This function never panics.
pub fn verify_webhook_signature(data: &[u8], signature: &str, secret: &[u8]) -> bool {
    if secret.is_empty() {
        warn!("🔐️ Refusing to verify a signature with an empty secret");
        return false;
    }
    let signature = signature.trim();
    if signature.is_empty() {
        return false;
    }
    let provided = match base64::decode(signature) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("🔐️ Signature is not valid base64. {e}");
            return false;
        },
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(data);
    mac.verify_slice(&provided).is_ok()
}
