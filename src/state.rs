//! Shared application state
//!
//! No per-request mutable state lives here: the rate limiter is the only
//! cross-request structure and it synchronizes internally.

use crate::config::Config;
use crate::middleware::rate_limit::RateLimiter;
use std::sync::Arc;
use std::time::Instant;

pub struct AppState {
    pub config: Config,
    pub limiter: RateLimiter,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let limiter = RateLimiter::new(config.rate_limit_max, config.rate_limit_window);
        Arc::new(Self {
            config,
            limiter,
            started_at: Instant::now(),
        })
    }
}
