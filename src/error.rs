//! Central fault taxonomy and error classification
//!
//! Every fault in the service is one variant of [`AppError`], a closed set
//! dispatched by a single exhaustive match. Handlers never resolve faults
//! themselves; they return `Result<_, AppError>` and the fault rides the
//! response back to [`error_handler`], the one place that knows the request
//! path, where it is classified into the stable wire shape and logged.
//!
//! Business-kind faults (Business, Validation, Authentication,
//! Authorization, NotFound) are *operational*: their message is safe to
//! surface verbatim in any mode. Database and Internal faults are not, and
//! in production their message is replaced by [`GENERIC_MESSAGE`].

use crate::config::Mode;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use std::error::Error as StdError;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};

/// Message returned for non-operational faults in production
pub const GENERIC_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Error)]
pub enum AppError {
    /// Application-raised fault carrying its own status code
    #[error("{message}")]
    Business { message: String, status: StatusCode },

    /// Input failed validation; `field` names the offending input
    #[error("{message}")]
    Validation { message: String, field: String },

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Authorization(String),

    #[error("{0}")]
    NotFound(String),

    /// Data-layer failure
    #[error(transparent)]
    Database(#[from] redis::RedisError),

    /// Anything unrecognized; details are suppressed in production
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn business(message: impl Into<String>, status: StatusCode) -> Self {
        Self::Business {
            message: message.into(),
            status,
        }
    }

    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: field.into(),
        }
    }

    pub fn authentication() -> Self {
        Self::Authentication("Authentication failed".to_string())
    }

    pub fn authorization() -> Self {
        Self::Authorization("Access denied".to_string())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Fault kind name as it appears in the `error` field of the wire body
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Business { .. } => "BusinessError",
            Self::Validation { .. } => "ValidationError",
            Self::Authentication(_) => "AuthenticationError",
            Self::Authorization(_) => "AuthorizationError",
            Self::NotFound(_) => "NotFoundError",
            Self::Database(_) => "DatabaseError",
            Self::Internal(_) => "InternalServerError",
        }
    }

    /// An explicit status wins; every other kind maps to a fixed code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Business { status, .. } => *status,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Authentication(_) => StatusCode::UNAUTHORIZED,
            Self::Authorization(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Operational faults carry a user-safe message even in production
    pub fn is_operational(&self) -> bool {
        !matches!(self, Self::Database(_) | Self::Internal(_))
    }

    /// Source chain rendered for the non-production `stack` field
    pub fn chain(&self) -> String {
        let mut rendered = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            rendered.push_str("\n  caused by: ");
            rendered.push_str(&cause.to_string());
            source = cause.source();
        }
        rendered
    }
}

/// Wire shape of every error response
///
/// `stack` and `field` are present only outside production.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    pub timestamp: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Map a fault to its HTTP status and response body
///
/// Pure apart from the timestamp: classifying the same fault twice yields
/// identical output except for `timestamp`.
pub fn classify(err: &AppError, path: &str, mode: Mode) -> (StatusCode, ErrorBody) {
    let status = err.status_code();

    let message = if mode.is_production() && !err.is_operational() {
        GENERIC_MESSAGE.to_string()
    } else {
        err.to_string()
    };

    let mut body = ErrorBody {
        error: err.kind(),
        message,
        timestamp: Utc::now().to_rfc3339(),
        path: path.to_string(),
        stack: None,
        field: None,
    };

    if !mode.is_production() {
        body.stack = Some(err.chain());
        if let AppError::Validation { field, .. } = err {
            body.field = Some(field.clone());
        }
    }

    (status, body)
}

/// Server faults log with their source chain; client faults without it.
fn log_classification(err: &AppError, status: StatusCode, path: &str) {
    if status.is_server_error() {
        error!(
            kind = err.kind(),
            status = status.as_u16(),
            path,
            chain = %err.chain(),
            "{err}"
        );
    } else if status.is_client_error() {
        warn!(kind = err.kind(), status = status.as_u16(), path, "{err}");
    }
}

/// Funnel faults raised anywhere below this middleware into one response
/// shape carrying the request path.
pub async fn error_handler(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();

    let mut response = next.run(req).await;

    if let Some(err) = response.extensions_mut().remove::<Arc<AppError>>() {
        let (status, body) = classify(&err, &path, state.config.mode);
        log_classification(&err, status, &path);
        return (status, Json(body)).into_response();
    }
    response
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // The body is built by `error_handler`, which knows the request
        // path and runtime mode; the fault itself rides along in the
        // response extensions.
        let status = self.status_code();
        let mut response = status.into_response();
        response.extensions_mut().insert(Arc::new(self));
        response
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
