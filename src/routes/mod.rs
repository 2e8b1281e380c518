//! Router assembly
//!
//! Outermost to innermost: security headers, CORS, compression, body
//! limit, timeout, sanitization, request logging, error handling, then the
//! routes themselves. The rate limiter applies only under the API prefix.
//! Every unmatched path falls through to a NotFound fault handled by the
//! central classifier.

use crate::error::{self, AppError};
use crate::middleware::{rate_limit, request_log, sanitize};
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method, Uri},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    set_header::SetResponseHeaderLayer, timeout::TimeoutLayer,
};

pub mod health;

pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/health", get(health::health_check))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::rate_limit,
        ));

    let cors = CorsLayer::new()
        .allow_origin(state.config.cors_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .nest(&state.config.api_prefix, api)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            error::error_handler,
        ))
        .layer(middleware::from_fn(request_log::request_log))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            sanitize::sanitize_json_body,
        ))
        .layer(TimeoutLayer::new(state.config.request_timeout))
        .layer(RequestBodyLimitLayer::new(state.config.body_limit))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}

/// Catch-all for undefined routes
async fn not_found(method: Method, uri: Uri) -> AppError {
    AppError::not_found(format!("Route {} {} not found", method, uri.path()))
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_tests;

#[cfg(test)]
#[path = "health_test.rs"]
mod health_tests;
