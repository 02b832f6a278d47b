use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use price_watch_engine::{InMemoryPriceStore, PriceTrackerApi};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::email::EmailNotifier,
    middleware::HmacMiddlewareFactory,
    routes::{health, index, webhook_fallback, WebhookStatusRoute},
    shopify_routes::ProductUpdateRoute,
};

pub type PriceTracker = PriceTrackerApi<InMemoryPriceStore, EmailNotifier>;

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let notifier = EmailNotifier::new(&config.email_config).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    info!("💻️ Price alerts will be sent to {}", notifier.recipient());
    let api = PriceTrackerApi::new(InMemoryPriceStore::new(), notifier)
        .with_threshold(config.alert_threshold_percent)
        .with_notification_timeout(config.email_config.timeout);
    info!("💻️ Alerting on price drops of more than {}%", api.threshold_percent());
    let srv = create_server_instance(config, api)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

/// Builds the HTTP server. Every worker shares the same price tracker, and so the same price baselines.
pub fn create_server_instance(config: ServerConfig, api: PriceTracker) -> Result<Server, ServerError> {
    let api = web::Data::new(api);
    let hmac_secret = config.shopify_config.hmac_secret.clone();
    let srv = HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("spw::access_log"))
            .app_data(api.clone())
            .service(health)
            .service(index)
            .service(ProductUpdateRoute::<InMemoryPriceStore, EmailNotifier>::new(HmacMiddlewareFactory::shopify(
                hmac_secret.clone(),
            )))
            .service(WebhookStatusRoute::new())
            .service(webhook_fallback())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
