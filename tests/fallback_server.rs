//! End-to-end tests: the fallback server on an ephemeral port, driven by
//! the async client.
#![cfg(feature = "server")]

use std::sync::Arc;

use merchant_dashboard::DashboardError;
use merchant_dashboard::actions::Actions;
use merchant_dashboard::backend::{Backend, InMemoryStore};
use merchant_dashboard::client::DashboardClient;
use merchant_dashboard::list::ListView;
use merchant_dashboard::models::{
    MerchantId, MerchantPatch, NewMerchant, NewProduct, ProductId, ProductPatch,
};
use merchant_dashboard::server::router;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Boots a server over the demo catalogue and returns its base URL.
async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(Arc::new(InMemoryStore::with_demo_data()), false);
    let _handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Boots a server that proxies every route to `upstream`.
async fn spawn_proxy(upstream: &MockServer) -> String {
    let backend = DashboardClient::builder()
        .base_url(upstream.uri())
        .build()
        .unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(Arc::new(backend), false);
    let _handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn client() -> DashboardClient {
    DashboardClient::builder()
        .base_url(spawn_server().await)
        .build()
        .unwrap()
}

fn api_status(err: &DashboardError) -> u16 {
    match *err {
        DashboardError::Api { status, .. } => status,
        ref other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn lists_demo_catalogue() {
    let client = client().await;
    let merchants = client.list_merchants().await.unwrap();
    assert_eq!(merchants.len(), 2);
    assert_eq!(merchants[0].products.len(), 2);

    let products = client.list_products().await.unwrap();
    let mut view = ListView::with_items(products);
    view.set_query("shoe");
    assert_eq!(view.filtered_len(), 1);
    assert_eq!(view.page_items()[0].name, "Lovely Red Shoes");
}

#[tokio::test]
async fn merchant_crud_round() {
    let client = client().await;

    let created = client
        .create_merchant(NewMerchant::new(
            "Myntra",
            "https://www.myntra.com/logo",
            "https://www.myntra.com",
        ))
        .await
        .unwrap();
    assert_eq!(created.id.as_inner(), "M000003");

    let read = client.read_merchant(&created.id).await.unwrap();
    assert_eq!(read, created);

    let patch = MerchantPatch {
        description: Some("Fashion".to_owned()),
        ..MerchantPatch::default()
    };
    let updated = client.update_merchant(&created.id, patch).await.unwrap();
    assert_eq!(updated.description, "Fashion");
    assert_eq!(updated.name, "Myntra");

    client.delete_merchant(&created.id).await.unwrap();
    let err = client.read_merchant(&created.id).await.unwrap_err();
    assert_eq!(api_status(&err), 404);
}

#[tokio::test]
async fn product_price_string_is_coerced_and_owner_updated() {
    let base = spawn_server().await;
    let http = reqwest::Client::new();
    let response = http
        .post(format!("{base}/product/create"))
        .json(&serde_json::json!({
            "merchant_id": "M000002",
            "merchantProductName": "Running Shoes",
            "merchantProductDescription": "Light",
            "merchantProductPrice": "15000",
            "merchantProductTag": ["Sport", "Sport", "Mesh"]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);

    let client = DashboardClient::builder().base_url(base).build().unwrap();
    let product = client.read_product(&ProductId::from("P000003")).await.unwrap();
    assert!((product.price - 15000.0).abs() < f64::EPSILON);
    assert_eq!(product.tags, vec!["Sport".to_owned(), "Mesh".to_owned()]);

    let owner = client.read_merchant(&MerchantId::from("M000002")).await.unwrap();
    assert_eq!(owner.products.len(), 1);
}

#[tokio::test]
async fn missing_fields_are_bad_request() {
    let client = client().await;
    let err = client
        .create_merchant(NewMerchant::new("Nameless", "", ""))
        .await
        .unwrap_err();
    assert_eq!(api_status(&err), 400);

    let err = client
        .create_product(NewProduct::new(
            MerchantId::from("M000001"),
            "",
            "desc",
            1.0,
        ))
        .await
        .unwrap_err();
    assert_eq!(api_status(&err), 400);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let base = spawn_server().await;
    let response = reqwest::Client::new()
        .post(format!("{base}/merchant/create"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn duplicate_explicit_id_conflicts() {
    let client = client().await;
    let input = NewMerchant {
        id: Some(MerchantId::from("M000001")),
        ..NewMerchant::new("Again", "https://a.test/logo", "https://a.test")
    };
    let err = client.create_merchant(input).await.unwrap_err();
    assert_eq!(api_status(&err), 409);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let client = client().await;
    let err = client
        .update_product(&ProductId::from("P000999"), ProductPatch::default())
        .await
        .unwrap_err();
    assert_eq!(api_status(&err), 404);

    let err = client
        .delete_merchant(&MerchantId::from("M000999"))
        .await
        .unwrap_err();
    assert_eq!(api_status(&err), 404);
}

#[tokio::test]
async fn actions_over_live_server() {
    let actions = Actions::new(client().await);
    let deleted = actions.delete_product(&ProductId::from("P000002")).await;
    assert_eq!(deleted.data().map(ProductId::as_inner), Some("P000002"));

    let products = actions.fetch_products().await.unwrap_or_default();
    assert_eq!(products.len(), 1);

    let failed = actions.fetch_product(&ProductId::from("P000002")).await;
    assert!(failed.error().unwrap().starts_with("Failed to fetch merchant product"));
}

#[tokio::test]
async fn health_endpoint_answers() {
    let base = spawn_server().await;
    let response = reqwest::get(format!("{base}/health")).await.unwrap();
    assert!(response.status().is_success());
}

#[tokio::test]
async fn proxy_passes_upstream_errors_through() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/merchant/read/M000404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"error":"Merchant not found"}"#),
        )
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/merchant/create"))
        .respond_with(
            ResponseTemplate::new(409).set_body_string(r#"{"error":"duplicate id: M000001"}"#),
        )
        .mount(&upstream)
        .await;

    let base = spawn_proxy(&upstream).await;
    let http = reqwest::Client::new();

    let response = http
        .get(format!("{base}/merchant/read/M000404"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "error": "Merchant not found" }));

    let response = http
        .post(format!("{base}/merchant/create"))
        .json(&NewMerchant::new("Amazon", "https://a.test/logo", "https://a.test"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 409);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "error": "duplicate id: M000001" }));
}

#[tokio::test]
async fn proxy_answers_bad_gateway_for_unreadable_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/merchant/list"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&upstream)
        .await;

    let base = spawn_proxy(&upstream).await;
    let response = reqwest::get(format!("{base}/merchant/list")).await.unwrap();
    assert_eq!(response.status().as_u16(), 502);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body.get("error").is_some());
}
