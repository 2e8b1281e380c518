//! Tests for environment-driven configuration

use super::*;

#[test]
fn mode_parses_known_values() {
    assert_eq!(Mode::parse("production"), Mode::Production);
    assert_eq!(Mode::parse("test"), Mode::Test);
    assert_eq!(Mode::parse("development"), Mode::Development);
}

#[test]
fn mode_defaults_to_development() {
    assert_eq!(Mode::parse("staging"), Mode::Development);
    assert_eq!(Mode::parse(""), Mode::Development);
}

#[test]
fn mode_predicates() {
    assert!(Mode::Production.is_production());
    assert!(!Mode::Production.is_development());
    assert!(Mode::Development.is_development());
    assert_eq!(Mode::Test.as_str(), "test");
}

/// One test owns the `DATABASE_URL` mutations so parallel tests never race
/// on the process environment.
#[test]
fn from_env_requires_database_url_and_fills_defaults() {
    env::remove_var("DATABASE_URL");
    let err = Config::from_env().expect_err("missing DATABASE_URL must fail");
    assert!(matches!(err, ConfigError::MissingVar("DATABASE_URL")));

    env::set_var("DATABASE_URL", "redis://127.0.0.1:6379");
    let config = Config::from_env().expect("config loads once DATABASE_URL is set");

    assert_eq!(config.database_url, "redis://127.0.0.1:6379");
    assert_eq!(config.api_prefix, "/api");
    assert_eq!(config.rate_limit_window, Duration::from_secs(15 * 60));
    assert_eq!(config.body_limit, 10 * 1024 * 1024);
    assert_eq!(config.request_timeout, Duration::from_secs(30));
}
