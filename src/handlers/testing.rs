//! Shared helpers for handler tests: an in-memory app and request shortcuts.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tower::ServiceExt;

use crate::auth::API_KEY_HEADER;
use crate::config::Config;
use crate::routes;
use crate::state::AppState;
use crate::store::ItemStore;

pub const TEST_API_KEY: &str = "test-api-key";

pub async fn setup_test_app() -> (Router, ItemStore) {
    let config = Config {
        api_key: TEST_API_KEY.to_string(),
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        service_port: 5000,
        service_host: "127.0.0.1".to_string(),
    };

    let store = ItemStore::in_memory()
        .await
        .expect("Failed to open in-memory store");

    let state = AppState {
        store: store.clone(),
        config: Arc::new(config),
    };

    (routes::router(state), store)
}

/// Send a request and return the status with the parsed JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    api_key: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = api_key {
        builder = builder.header(API_KEY_HEADER, key);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_string(&json).unwrap())
        }
        None => Body::empty(),
    };

    read_response(app, builder.body(body).unwrap()).await
}

/// Send a JSON-typed request whose body is taken verbatim, valid or not.
pub async fn send_raw_json(
    app: &Router,
    method: &str,
    uri: &str,
    api_key: Option<&str>,
    body: &str,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = api_key {
        builder = builder.header(API_KEY_HEADER, key);
    }
    read_response(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

async fn read_response(app: &Router, request: Request<Body>) -> (StatusCode, JsonValue) {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Create an item through the API and return its id.
pub async fn create_item(app: &Router, body: JsonValue) -> i64 {
    let (status, json) = send(app, "POST", "/create", Some(TEST_API_KEY), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", json);
    json["id"].as_i64().expect("create response should carry a numeric id")
}

pub fn widget() -> JsonValue {
    serde_json::json!({"name": "Widget", "description": "A widget", "price": 9.99})
}
