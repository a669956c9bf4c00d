use super::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CatalogClient {
    CatalogClient::new(format!("{}/products", server.uri()), HttpTimeouts::default()).unwrap()
}

#[tokio::test]
async fn get_products_returns_body_unmodified() {
    let server = MockServer::start().await;
    let products = json!([
        { "id": 1, "title": "Backpack", "price": 109.95, "rating": { "rate": 3.9, "count": 120 } },
        { "id": 2, "title": "T-Shirt", "price": 22.3, "extra": null }
    ]);
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products))
        .expect(1)
        .mount(&server)
        .await;

    let body = client_for(&server).get_products().await.unwrap();
    assert_eq!(body, products);
}

#[tokio::test]
async fn get_products_propagates_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_products().await.unwrap_err();
    assert_eq!(err, ApiError::Status { status: 503, body: "unavailable".into() });
}

#[tokio::test]
async fn get_products_rejects_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_products().await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn get_products_transport_failure_is_request_error() {
    // Nothing listens on port 1.
    let client = CatalogClient::new("http://127.0.0.1:1/products", HttpTimeouts::default()).unwrap();

    let err = client.get_products().await.unwrap_err();
    assert!(matches!(err, ApiError::Request(_)));
}
