//! Tests for the fixed-window rate limiter

use super::rate_limit::{client_key, RateLimiter};
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::Request;
use std::net::SocketAddr;
use std::time::Duration;

#[test]
fn allows_requests_under_the_limit() {
    let limiter = RateLimiter::new(3, Duration::from_secs(60));
    for _ in 0..3 {
        assert!(limiter.check("10.0.0.1").is_ok());
    }
}

#[test]
fn rejects_requests_over_the_limit() {
    let limiter = RateLimiter::new(2, Duration::from_secs(60));
    assert!(limiter.check("10.0.0.1").is_ok());
    assert!(limiter.check("10.0.0.1").is_ok());

    let retry_after = limiter
        .check("10.0.0.1")
        .expect_err("third request must be rejected");
    assert!(retry_after >= 1);
}

#[test]
fn keys_are_rate_limited_independently() {
    let limiter = RateLimiter::new(1, Duration::from_secs(60));
    assert!(limiter.check("10.0.0.1").is_ok());
    assert!(limiter.check("10.0.0.2").is_ok());
    assert!(limiter.check("10.0.0.1").is_err());
}

#[test]
fn window_resets_after_elapsing() {
    let limiter = RateLimiter::new(1, Duration::from_millis(50));
    assert!(limiter.check("10.0.0.1").is_ok());
    assert!(limiter.check("10.0.0.1").is_err());

    std::thread::sleep(Duration::from_millis(60));
    assert!(limiter.check("10.0.0.1").is_ok());
}

#[test]
fn client_key_prefers_forwarded_address() {
    let req = Request::builder()
        .uri("/api/health")
        .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
        .body(Body::empty())
        .expect("build request");
    assert_eq!(client_key(&req), "203.0.113.9");
}

#[test]
fn client_key_falls_back_to_socket_peer() {
    let addr: SocketAddr = "192.0.2.7:55555".parse().expect("addr");
    let mut req = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .expect("build request");
    req.extensions_mut().insert(ConnectInfo(addr));
    assert_eq!(client_key(&req), "192.0.2.7");
}

#[test]
fn client_key_defaults_to_unknown() {
    let req = Request::builder()
        .uri("/")
        .body(Body::empty())
        .expect("build request");
    assert_eq!(client_key(&req), "unknown");
}
