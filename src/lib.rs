//! Backend scaffold for a progressive web app starter
//!
//! A single-binary HTTP service: one health-check route behind the usual
//! middleware chain (security headers, CORS, rate limiting, compression,
//! body limits, payload sanitization, request logging), centralized error
//! classification, and a graceful-shutdown lifecycle with a fixed grace
//! period.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod monitor;
pub mod routes;
pub mod server;
pub mod state;
