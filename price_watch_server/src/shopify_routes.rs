//----------------------------------------------   Product updates  ----------------------------------------------------

use actix_web::{web, HttpRequest, HttpResponse};
use log::{debug, error, info, trace, warn};
use price_watch_engine::{traits::AlertNotifier, PriceStore, PriceTrackerApi, PriceTrackerError};
use shopify_tools::ShopifyProductUpdate;

use crate::{
    data_objects::JsonResponse,
    errors::ServerError,
    integrations::shopify::product_update_from_shopify_product,
    route,
};

route!(product_update => Post "/webhooks/products/update" impl PriceStore, AlertNotifier where hmac_verified);
/// Handles Shopify's `products/update` webhook.
///
/// The HMAC middleware has already checked the signature against the raw body, so the body is parsed here from the
/// same bytes. Any failure after that point is reported as a 500, which tells Shopify to retry the delivery later.
pub async fn product_update<BStore, BNotify>(
    req: HttpRequest,
    body: web::Bytes,
    api: web::Data<PriceTrackerApi<BStore, BNotify>>,
) -> Result<HttpResponse, ServerError>
where
    BStore: PriceStore,
    BNotify: AlertNotifier,
{
    trace!("🛍️ Received product update webhook request: {}", req.uri());
    let product = serde_json::from_slice::<ShopifyProductUpdate>(&body).map_err(|e| {
        warn!("🛍️ Could not deserialize product update. {e}");
        ServerError::MalformedPayload(e.to_string())
    })?;
    debug!("🛍️ Product update for {} ({})", product.title, product.id);
    let event = product_update_from_shopify_product(product).map_err(|e| {
        warn!("🛍️ Could not convert product update. {e}");
        ServerError::from(e)
    })?;
    let product_id = event.product_id.clone();
    match api.handle_product_update(event).await {
        Ok(Some(alert)) => {
            info!("🛍️ Price alert sent for {product_id}. {alert}");
            Ok(HttpResponse::Ok().json(JsonResponse::success("Webhook processed successfully. Price alert sent.")))
        },
        Ok(None) => {
            debug!("🛍️ Product update for {product_id} processed. No alert required.");
            Ok(HttpResponse::Ok().json(JsonResponse::success("Webhook processed successfully.")))
        },
        Err(PriceTrackerError::NotificationFailed(e)) => {
            error!("🛍️ Price alert for {product_id} could not be delivered. {e}");
            Err(ServerError::NotificationFailure(e.to_string()))
        },
        Err(e) => {
            error!("🛍️ Could not process product update for {product_id}. {e}");
            Err(e.into())
        },
    }
}
