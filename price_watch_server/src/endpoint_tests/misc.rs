use actix_web::{http::StatusCode, test::TestRequest};
use price_watch_engine::{test_utils::RecordingNotifier, InMemoryPriceStore, PriceTrackerApi};

use super::helpers::send_request;

fn api() -> PriceTrackerApi<InMemoryPriceStore, RecordingNotifier> {
    PriceTrackerApi::new(InMemoryPriceStore::new(), RecordingNotifier::default())
}

#[actix_web::test]
async fn health() {
    let _ = env_logger::try_init();
    let (status, body) = send_request(api(), TestRequest::get().uri("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "👍️\n");
}

#[actix_web::test]
async fn index() {
    let _ = env_logger::try_init();
    let (status, body) = send_request(api(), TestRequest::get().uri("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"{"message":"Shopify Price Watch API","endpoints":{"health":"/health","product_update_webhook":"/webhooks/products/update"}}"#
    );
}

#[actix_web::test]
async fn unknown_path() {
    let _ = env_logger::try_init();
    let (status, _) = send_request(api(), TestRequest::get().uri("/webhooks/orders/create")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
