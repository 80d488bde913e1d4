#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Common helpers for stockroom integration tests

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use stockroom::StockroomModule;

pub fn app() -> Router {
    StockroomModule::in_memory().router()
}

/// Send one request and decode the JSON response body.
pub async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            req = req.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(req.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse JSON body")
    };
    (status, value)
}

pub fn item_payload(email: &str, quantity: i64) -> Value {
    serde_json::json!({
        "name": "n",
        "email": email,
        "item_name": "widget",
        "quantity": quantity,
        "expiry_date": "2025-01-01T00:00:00Z"
    })
}

pub async fn create_item(app: &Router, email: &str, quantity: i64) -> Value {
    let (status, body) = call(app, "POST", "/items", Some(item_payload(email, quantity))).await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    body
}
