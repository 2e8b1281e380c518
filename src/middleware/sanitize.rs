//! Request payload sanitization
//!
//! HTML-escapes string values and strips `$`-prefixed operator tokens from
//! JSON request bodies before they reach a handler. Non-JSON payloads and
//! malformed JSON pass through untouched; rejecting them is the handler's
//! job.

use crate::state::AppState;
use axum::{
    body::{to_bytes, Body, Bytes},
    extract::{Request, State},
    http::header::{CONTENT_LENGTH, CONTENT_TYPE},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::sync::Arc;

pub async fn sanitize_json_body(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let is_json = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("application/json"))
        .unwrap_or(false);
    if !is_json {
        return next.run(req).await;
    }

    let (mut parts, body) = req.into_parts();
    let bytes = match to_bytes(body, state.config.body_limit).await {
        Ok(bytes) => bytes,
        Err(_) => return StatusCode::PAYLOAD_TOO_LARGE.into_response(),
    };

    let bytes = match serde_json::from_slice::<Value>(&bytes) {
        Ok(mut value) => {
            sanitize_value(&mut value);
            match serde_json::to_vec(&value) {
                Ok(sanitized) => Bytes::from(sanitized),
                Err(_) => bytes,
            }
        }
        Err(_) => bytes,
    };

    // Length may have changed.
    parts.headers.remove(CONTENT_LENGTH);

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

pub fn sanitize_value(value: &mut Value) {
    match value {
        Value::String(text) => *text = sanitize_text(text),
        Value::Array(items) => items.iter_mut().for_each(sanitize_value),
        Value::Object(map) => map.values_mut().for_each(sanitize_value),
        _ => {}
    }
}

pub fn sanitize_text(input: &str) -> String {
    escape_html(&strip_operators(input))
}

/// Remove `$`-prefixed operator tokens (`$where`, `$gt`, ...)
fn strip_operators(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '$' && chars.peek().is_some_and(|next| next.is_ascii_alphanumeric()) {
            while chars
                .peek()
                .is_some_and(|next| next.is_ascii_alphanumeric())
            {
                chars.next();
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}
