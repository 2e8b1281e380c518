//! Periodic health heartbeat
//!
//! Production-only background task that logs process status and the
//! database connection state at a fixed interval. Development runs get the
//! same information on demand from the health route instead.

use crate::state::AppState;
use redis::aio::ConnectionManager;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const INTERVAL: Duration = Duration::from_secs(5 * 60);

pub fn spawn(state: Arc<AppState>, db: ConnectionManager) {
    if !state.config.mode.is_production() {
        return;
    }

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(INTERVAL);
        // The first tick completes immediately; skip it so the heartbeat
        // starts one full interval after startup.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let mut db = db.clone();
            let reply: redis::RedisResult<String> = redis::cmd("PING").query_async(&mut db).await;
            let healthy = reply.is_ok();
            let uptime_secs = state.started_at.elapsed().as_secs();

            if healthy {
                info!(status = "healthy", uptime_secs, "System health check");
            } else {
                warn!(status = "unhealthy", uptime_secs, "System health check");
            }
        }
    });
}
