use std::time::Duration;

use actix_web::{http::StatusCode, test::TestRequest};
use price_watch_engine::{
    helpers::calculate_hmac,
    price_types::ProductId,
    test_utils::{RecordingNotifier, SlowNotifier},
    traits::NotificationError,
    InMemoryPriceStore,
    PriceStore,
    PriceTrackerApi,
};
use rust_decimal::Decimal;

use super::{
    helpers::{send_request, sign, webhook_post},
    mocks::{MockNotifier, MockStore},
};
use crate::{middleware::MAX_WEBHOOK_PAYLOAD_SIZE, routes::PRODUCT_UPDATE_WEBHOOK_PATH};

const PRODUCT_ID: &str = "gid://shopify/Product/632910392";

const PRODUCT_UPDATE: &str = r#"{"id":632910392,"title":"IPod Nano - 8GB","admin_graphql_api_id":"gid://shopify/Product/632910392","handle":"ipod-nano","variants":[{"id":808950810,"title":"Pink","price":"79.00"},{"id":49148385,"title":"Red","price":"199.00"}]}"#;

const PROCESSED: &str = r#"{"success":true,"message":"Webhook processed successfully."}"#;

async fn tracker_with_baseline(
    baseline: Option<i64>,
) -> (PriceTrackerApi<InMemoryPriceStore, RecordingNotifier>, InMemoryPriceStore, RecordingNotifier) {
    let store = InMemoryPriceStore::new();
    let notifier = RecordingNotifier::default();
    if let Some(price) = baseline {
        store.set_last_price(&ProductId::from(PRODUCT_ID), Decimal::from(price)).await.unwrap();
    }
    (PriceTrackerApi::new(store.clone(), notifier.clone()), store, notifier)
}

/// A tracker whose store and notifier must never be touched.
fn untouchable_tracker() -> PriceTrackerApi<MockStore, MockNotifier> {
    let mut store = MockStore::new();
    store.expect_swap_last_price().never();
    store.expect_fetch_last_price().never();
    store.expect_set_last_price().never();
    let mut notifier = MockNotifier::new();
    notifier.expect_send_alert().never();
    PriceTrackerApi::new(store, notifier)
}

#[actix_web::test]
async fn first_update_caches_price() {
    let _ = env_logger::try_init();
    let (api, store, notifier) = tracker_with_baseline(None).await;
    let sig = sign(PRODUCT_UPDATE);
    let (status, body) = send_request(api, webhook_post(PRODUCT_UPDATE, Some(&sig))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, PROCESSED);
    let cached = store.fetch_last_price(&ProductId::from(PRODUCT_ID)).await.unwrap();
    assert_eq!(cached, Some(Decimal::from(79)));
    assert!(notifier.alerts().is_empty());
}

#[actix_web::test]
async fn large_drop_sends_alert() {
    let _ = env_logger::try_init();
    let (api, store, notifier) = tracker_with_baseline(Some(100)).await;
    let sig = sign(PRODUCT_UPDATE);
    let (status, body) = send_request(api, webhook_post(PRODUCT_UPDATE, Some(&sig))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"success":true,"message":"Webhook processed successfully. Price alert sent."}"#);
    let alerts = notifier.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].title, "IPod Nano - 8GB");
    assert_eq!(alerts[0].old_price, Decimal::from(100));
    assert_eq!(alerts[0].new_price, Decimal::from(79));
    assert_eq!(alerts[0].decrease_percent, Decimal::from(21));
    let cached = store.fetch_last_price(&ProductId::from(PRODUCT_ID)).await.unwrap();
    assert_eq!(cached, Some(Decimal::from(79)));
}

#[actix_web::test]
async fn small_drop_does_not_alert() {
    let _ = env_logger::try_init();
    let (api, store, notifier) = tracker_with_baseline(Some(90)).await;
    let sig = sign(PRODUCT_UPDATE);
    let (status, body) = send_request(api, webhook_post(PRODUCT_UPDATE, Some(&sig))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, PROCESSED);
    assert!(notifier.alerts().is_empty());
    let cached = store.fetch_last_price(&ProductId::from(PRODUCT_ID)).await.unwrap();
    assert_eq!(cached, Some(Decimal::from(79)));
}

#[actix_web::test]
async fn missing_signature() {
    let _ = env_logger::try_init();
    let (status, body) = send_request(untouchable_tracker(), webhook_post(PRODUCT_UPDATE, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Webhook signature verification failed. No HMAC signature found."}"#);
}

#[actix_web::test]
async fn invalid_signature() {
    let _ = env_logger::try_init();
    let (status, body) =
        send_request(untouchable_tracker(), webhook_post(PRODUCT_UPDATE, Some("bm90IGEgcmVhbCBzaWduYXR1cmU="))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Webhook signature verification failed. Invalid HMAC signature."}"#);
}

#[actix_web::test]
async fn signature_from_another_secret() {
    let _ = env_logger::try_init();
    let sig = calculate_hmac(b"some other app's secret", PRODUCT_UPDATE.as_bytes());
    let (status, _) = send_request(untouchable_tracker(), webhook_post(PRODUCT_UPDATE, Some(&sig))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn signature_covers_the_raw_bytes() {
    let _ = env_logger::try_init();
    // Same JSON document, different bytes on the wire
    let reformatted = serde_json::to_string_pretty(&serde_json::from_str::<serde_json::Value>(PRODUCT_UPDATE).unwrap())
        .unwrap();
    let sig = sign(PRODUCT_UPDATE);
    let (status, _) = send_request(untouchable_tracker(), webhook_post(&reformatted, Some(&sig))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// A product update whose description pads the body out to roughly `size` bytes.
fn product_update_with_description(size: usize) -> String {
    let description = "<p>Lorem ipsum dolor sit amet.</p>".repeat(size / 34 + 1);
    format!(
        r#"{{"id":632910392,"title":"IPod Nano - 8GB","admin_graphql_api_id":"{PRODUCT_ID}","body_html":"{description}","variants":[{{"id":808950810,"title":"Pink","price":"79.00"}}]}}"#
    )
}

#[actix_web::test]
async fn large_product_update_is_processed() {
    let _ = env_logger::try_init();
    let (api, store, _) = tracker_with_baseline(None).await;
    let body = product_update_with_description(300 * 1024);
    assert!(body.len() > 256 * 1024);
    let sig = sign(&body);
    let (status, response) = send_request(api, webhook_post(&body, Some(&sig))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, PROCESSED);
    let cached = store.fetch_last_price(&ProductId::from(PRODUCT_ID)).await.unwrap();
    assert_eq!(cached, Some(Decimal::from(79)));
}

#[actix_web::test]
async fn oversized_body_is_a_malformed_payload() {
    let _ = env_logger::try_init();
    let body = product_update_with_description(MAX_WEBHOOK_PAYLOAD_SIZE + 1024);
    let sig = sign(&body);
    let (status, response) = send_request(untouchable_tracker(), webhook_post(&body, Some(&sig))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.starts_with(r#"{"error":"The webhook payload is malformed."#), "Unexpected body: {response}");
}

#[actix_web::test]
async fn malformed_payload() {
    let _ = env_logger::try_init();
    for body in [r#"{"title":"No id or variants"}"#, "this is not json", r#"{"id":1,"title":"Mug","variants":[]}"#] {
        let sig = sign(body);
        let (status, body) = send_request(untouchable_tracker(), webhook_post(body, Some(&sig))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "Unexpected response: {body}");
        assert!(body.starts_with(r#"{"error":"The webhook payload is malformed."#), "Unexpected body: {body}");
    }
}

#[actix_web::test]
async fn non_numeric_price() {
    let _ = env_logger::try_init();
    let body = r#"{"id":7,"title":"Mug","variants":[{"id":70,"price":"free"}]}"#;
    let sig = sign(body);
    let (status, _) = send_request(untouchable_tracker(), webhook_post(body, Some(&sig))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn notification_failure_keeps_new_baseline() {
    let _ = env_logger::try_init();
    let mut store = MockStore::new();
    store
        .expect_swap_last_price()
        .withf(|id, price| id.as_str() == PRODUCT_ID && *price == Decimal::from(79))
        .times(1)
        .returning(|_, _| Ok(Some(Decimal::from(200))));
    let mut notifier = MockNotifier::new();
    notifier
        .expect_send_alert()
        .times(1)
        .returning(|_| Err(NotificationError::DeliveryError("SMTP relay unavailable".into())));
    let api = PriceTrackerApi::new(store, notifier);
    let sig = sign(PRODUCT_UPDATE);
    let (status, body) = send_request(api, webhook_post(PRODUCT_UPDATE, Some(&sig))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        r#"{"error":"Could not send the price alert. Could not deliver the alert. SMTP relay unavailable"}"#
    );
}

#[actix_web::test]
async fn notification_timeout() {
    let _ = env_logger::try_init();
    let store = InMemoryPriceStore::new();
    store.set_last_price(&ProductId::from(PRODUCT_ID), Decimal::from(100)).await.unwrap();
    let api = PriceTrackerApi::new(store.clone(), SlowNotifier(Duration::from_secs(5)))
        .with_notification_timeout(Duration::from_millis(50));
    let sig = sign(PRODUCT_UPDATE);
    let (status, body) = send_request(api, webhook_post(PRODUCT_UPDATE, Some(&sig))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"Could not send the price alert. Alert delivery timed out after 50 ms"}"#);
    let cached = store.fetch_last_price(&ProductId::from(PRODUCT_ID)).await.unwrap();
    assert_eq!(cached, Some(Decimal::from(79)));
}

#[actix_web::test]
async fn store_failure() {
    let _ = env_logger::try_init();
    let mut store = MockStore::new();
    store
        .expect_swap_last_price()
        .returning(|_, _| Err(price_watch_engine::PriceStoreError::BackendError("unavailable".into())));
    let mut notifier = MockNotifier::new();
    notifier.expect_send_alert().never();
    let sig = sign(PRODUCT_UPDATE);
    let (status, _) = send_request(PriceTrackerApi::new(store, notifier), webhook_post(PRODUCT_UPDATE, Some(&sig))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn webhook_status() {
    let _ = env_logger::try_init();
    let req = TestRequest::get().uri(PRODUCT_UPDATE_WEBHOOK_PATH);
    let (status, body) = send_request(untouchable_tracker(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"{"status":"Webhook endpoint active","message":"Send POST requests to this endpoint to process webhooks"}"#
    );
}

#[actix_web::test]
async fn unsupported_methods() {
    let _ = env_logger::try_init();
    for req in [TestRequest::put(), TestRequest::delete(), TestRequest::patch()] {
        let sig = sign(PRODUCT_UPDATE);
        let req = req.uri(PRODUCT_UPDATE_WEBHOOK_PATH).insert_header(("X-Shopify-Hmac-Sha256", sig));
        let (status, body) = send_request(untouchable_tracker(), req).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert!(body.starts_with(r#"{"error":"Method not allowed."#), "Unexpected body: {body}");
    }
}
