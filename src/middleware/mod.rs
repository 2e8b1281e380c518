//! Request-path middleware
//!
//! - rate limiting per client address under the API prefix
//! - request logging with per-request ids
//! - JSON payload sanitization

pub mod rate_limit;
pub mod request_log;
pub mod sanitize;

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod rate_limit_tests;

#[cfg(test)]
#[path = "sanitize_test.rs"]
mod sanitize_tests;
