//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module (see [`crate::shopify_routes`]). Keep this
//! module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Alert delivery goes out over SMTP, so it is always awaited, never
//! blocked on.
use std::collections::BTreeMap;

use actix_web::{get, web, HttpRequest, HttpResponse, Resource, Responder};
use log::*;

use crate::{
    data_objects::{ApiIndex, WebhookStatus},
    errors::ServerError,
};

/// The path Shopify delivers `products/update` webhooks to.
pub const PRODUCT_UPDATE_WEBHOOK_PATH: &str = "/webhooks/products/update";

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal) => {
        paste::paste! { pub struct [<$name:camel Route>];}
        paste::paste! {
                impl [<$name:camel Route>] {
                #[allow(clippy::new_without_default)]
                pub fn new() -> Self { Self }
            }
        }
        paste::paste! {
            impl actix_web::dev::HttpServiceFactory for [<$name:camel Route>] {
                fn register(self, config: &mut actix_web::dev::AppService) {
                    let res = actix_web::Resource::new($path)
                        .name(stringify!($name))
                        .guard(actix_web::guard::$method())
                        .to($name);
                    actix_web::dev::HttpServiceFactory::register(res, config);
                }
            }
        }
    };

    // The request body must carry a valid Shopify HMAC signature before the handler sees it. The payload limit applies
    // to both the middleware and the handler.
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+ where hmac_verified) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            hmac: $crate::middleware::HmacMiddlewareFactory,
            _backends: ( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ ),
        }}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            pub fn new(hmac: $crate::middleware::HmacMiddlewareFactory) -> Self {
                Self { hmac, _backends: ($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+) }
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .app_data(actix_web::web::PayloadConfig::new($crate::middleware::MAX_WEBHOOK_PAYLOAD_SIZE))
                    .to($name::< $( [< T $bounds:camel >], )+>)
                    .wrap(self.hmac);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

// ----------------------------------------------   Index  -----------------------------------------------------
#[get("/")]
pub async fn index() -> impl Responder {
    trace!("💻️ Received index request");
    let endpoints = BTreeMap::from([
        ("health".to_string(), "/health".to_string()),
        ("product_update_webhook".to_string(), PRODUCT_UPDATE_WEBHOOK_PATH.to_string()),
    ]);
    HttpResponse::Ok().json(ApiIndex { message: "Shopify Price Watch API".into(), endpoints })
}

// -------------------------------------------   Webhook status  -----------------------------------------------
route!(webhook_status => Get "/webhooks/products/update");
pub async fn webhook_status() -> impl Responder {
    trace!("💻️ Received webhook status request");
    HttpResponse::Ok().json(WebhookStatus::active())
}

/// Catches anything that is neither a POST nor a GET on the webhook path. Must be registered after the other webhook
/// routes.
pub fn webhook_fallback() -> Resource {
    web::resource(PRODUCT_UPDATE_WEBHOOK_PATH).name("webhook_method_not_allowed").to(webhook_method_not_allowed)
}

pub async fn webhook_method_not_allowed(req: HttpRequest) -> Result<HttpResponse, ServerError> {
    debug!("💻️ {} is not supported on {}", req.method(), req.path());
    Err(ServerError::MethodNotAllowed(format!("{} is not supported on this endpoint.", req.method())))
}
