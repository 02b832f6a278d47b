//! HMAC middleware for Actix Web.
//!
//! This module provides a middleware for Actix Web that checks the HMAC signature of incoming requests.
//!
//! Shopify signs every webhook call using the app's webhook secret (`SPW_SHOPIFY_HMAC_SECRET`) as the key, and the
//! body of the request as the data to sign. The base64-encoded signature is provided in the `X-Shopify-Hmac-Sha256`
//! header.
//!
//! The middleware reads the raw body, verifies it, and then puts the very same bytes back into the request so that the
//! handler can parse them. Requests with a missing or invalid signature never reach the handler; they receive a
//! `401 Unauthorized` response. A body that cannot be read at all (e.g. one larger than [`MAX_WEBHOOK_PAYLOAD_SIZE`])
//! is reported as a malformed payload.

use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_http::h1;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    web,
    Error,
    ResponseError,
};
use futures::future::LocalBoxFuture;
use log::{trace, warn};
use price_watch_engine::helpers::verify_webhook_signature;
use spw_common::Secret;

use crate::errors::ServerError;

pub const SHOPIFY_HMAC_HEADER: &str = "X-Shopify-Hmac-Sha256";

/// Upper bound on webhook bodies. Product payloads carry every variant and image, plus `body_html`, so they routinely
/// exceed actix's 256 KiB default.
pub const MAX_WEBHOOK_PAYLOAD_SIZE: usize = 4 * 1024 * 1024;

#[derive(Clone)]
pub struct HmacMiddlewareFactory {
    hmac_header: String,
    key: Secret<String>,
}

impl HmacMiddlewareFactory {
    pub fn new(hmac_header: &str, key: Secret<String>) -> Self {
        HmacMiddlewareFactory { hmac_header: hmac_header.into(), key }
    }

    /// A factory that checks the standard Shopify signature header.
    pub fn shopify(key: Secret<String>) -> Self {
        Self::new(SHOPIFY_HMAC_HEADER, key)
    }
}

impl<S, B> Transform<S, ServiceRequest> for HmacMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<EitherBody<B>>;
    type Transform = HmacMiddlewareService<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(HmacMiddlewareService {
            hmac_header: self.hmac_header.clone(),
            key: self.key.clone(),
            service: Rc::new(service),
        }))
    }
}

pub struct HmacMiddlewareService<S> {
    hmac_header: String,
    key: Secret<String>,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for HmacMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;
    type Response = ServiceResponse<EitherBody<B>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let secret = self.key.clone();
        let hmac_header = self.hmac_header.clone();
        Box::pin(async move {
            trace!("🔐️ Checking HMAC for request");
            let data = match req.extract::<web::Bytes>().await {
                Ok(data) => data,
                Err(e) => {
                    warn!("🔐️ Failed to extract request data: {e}");
                    let err = ServerError::MalformedPayload(format!("Could not read the request body. {e}"));
                    return Ok(reject(req, err));
                },
            };
            let signature = req.headers().get(&hmac_header).and_then(|v| v.to_str().ok()).map(str::to_string);
            let Some(signature) = signature else {
                warn!("🔐️ No HMAC signature found in request. Denying access.");
                return Ok(reject(req, ServerError::VerificationFailure("No HMAC signature found.".into())));
            };
            if verify_webhook_signature(data.as_ref(), &signature, secret.reveal().as_bytes()) {
                trace!("🔐️ HMAC check for request ✅️");
                req.set_payload(bytes_to_payload(data));
                service.call(req).await.map(ServiceResponse::map_into_left_body)
            } else {
                warn!("🔐️ Invalid HMAC signature found in request. Denying access.");
                Ok(reject(req, ServerError::VerificationFailure("Invalid HMAC signature.".into())))
            }
        })
    }
}

fn reject<B>(req: ServiceRequest, err: ServerError) -> ServiceResponse<EitherBody<B>> {
    req.into_response(err.error_response()).map_into_right_body()
}

fn bytes_to_payload(buf: web::Bytes) -> Payload {
    let (_, mut pl) = h1::Payload::create(true);
    pl.unread_data(buf);
    Payload::from(pl)
}
