//! Tests for payload sanitization

use super::sanitize::{sanitize_json_body, sanitize_text, sanitize_value};
use crate::config::{Config, Mode};
use crate::state::AppState;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    middleware,
    routing::post,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn test_state() -> Arc<AppState> {
    AppState::new(Config {
        mode: Mode::Development,
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "redis://127.0.0.1:6379".to_string(),
        cors_origin: "http://localhost:3000".parse().expect("origin"),
        api_prefix: "/api".to_string(),
        rate_limit_max: 1000,
        rate_limit_window: Duration::from_secs(15 * 60),
        body_limit: 10 * 1024 * 1024,
        request_timeout: Duration::from_secs(30),
    })
}

#[test]
fn escapes_html_in_nested_strings() {
    let mut value = json!({
        "name": "<script>alert(1)</script>",
        "nested": { "bio": "a & b" },
        "tags": ["\"quoted\""]
    });
    sanitize_value(&mut value);

    assert_eq!(value["name"], "&lt;script&gt;alert(1)&lt;&#x2F;script&gt;");
    assert_eq!(value["nested"]["bio"], "a &amp; b");
    assert_eq!(value["tags"][0], "&quot;quoted&quot;");
}

#[test]
fn strips_operator_tokens() {
    assert_eq!(sanitize_text("$where"), "");
    assert_eq!(sanitize_text("a $gt b"), "a  b");
    assert_eq!(sanitize_text("price: $100"), "price: ");
    assert_eq!(sanitize_text("dollar $ alone"), "dollar $ alone");
}

#[test]
fn leaves_non_string_values_untouched() {
    let mut value = json!({"count": 3, "active": true, "ratio": 1.5, "none": null});
    let before = value.clone();
    sanitize_value(&mut value);
    assert_eq!(value, before);
}

#[tokio::test]
async fn middleware_rewrites_json_bodies() {
    let app = Router::new()
        .route("/echo", post(|body: String| async move { body }))
        .layer(middleware::from_fn_with_state(
            test_state(),
            sanitize_json_body,
        ));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/echo")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"name":"<b>$where</b>"}"#))
                .expect("build request"),
        )
        .await
        .expect("middleware response");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(value["name"], "&lt;b&gt;&lt;&#x2F;b&gt;");
}

#[tokio::test]
async fn non_json_bodies_pass_through() {
    let app = Router::new()
        .route("/echo", post(|body: String| async move { body }))
        .layer(middleware::from_fn_with_state(
            test_state(),
            sanitize_json_body,
        ));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/echo")
                .header("content-type", "text/plain")
                .body(Body::from("<b>$where</b>"))
                .expect("build request"),
        )
        .await
        .expect("middleware response");

    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    assert_eq!(&bytes[..], &b"<b>$where</b>"[..]);
}
