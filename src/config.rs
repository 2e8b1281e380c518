//! Environment-driven configuration
//!
//! Everything the service reads from the environment is collected here once
//! at startup. Required values missing or malformed make `from_env` fail,
//! which is fatal: startup errors are never retried.

use axum::http::HeaderValue;
use std::env;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {value:?}")]
    InvalidVar { var: &'static str, value: String },
}

/// Runtime mode, read from `APP_ENV`
///
/// Gates log verbosity and how much fault detail reaches clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Development,
    Production,
    Test,
}

impl Mode {
    /// Read `APP_ENV`; anything unrecognized falls back to development.
    pub fn from_env() -> Self {
        Self::parse(env::var("APP_ENV").as_deref().unwrap_or("development"))
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "production" => Mode::Production,
            "test" => Mode::Test,
            _ => Mode::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Mode::Production
    }

    pub fn is_development(self) -> bool {
        self == Mode::Development
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
            Mode::Test => "test",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub host: String,
    pub port: u16,
    /// Connection string for the outbound dependency. Required.
    pub database_url: String,
    pub cors_origin: HeaderValue,
    pub api_prefix: String,
    /// Requests allowed per client per window under the API prefix
    pub rate_limit_max: u32,
    pub rate_limit_window: Duration,
    /// Maximum accepted request body size in bytes
    pub body_limit: usize,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mode = Mode::from_env();

        let cors_origin = or_default("CORS_ORIGIN", "http://localhost:3000");
        let cors_origin =
            cors_origin
                .parse::<HeaderValue>()
                .map_err(|_| ConfigError::InvalidVar {
                    var: "CORS_ORIGIN",
                    value: cors_origin,
                })?;

        Ok(Self {
            mode,
            host: or_default("HOST", "0.0.0.0"),
            port: parsed("PORT", 5001)?,
            database_url: required("DATABASE_URL")?,
            cors_origin,
            api_prefix: "/api".to_string(),
            // Stricter in production
            rate_limit_max: if mode.is_production() { 100 } else { 1000 },
            rate_limit_window: Duration::from_secs(15 * 60),
            body_limit: 10 * 1024 * 1024,
            request_timeout: Duration::from_secs(30),
        })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingVar(key))
}

fn or_default(key: &'static str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn parsed<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidVar {
            var: key,
            value,
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
