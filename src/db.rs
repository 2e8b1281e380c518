//! Outbound dependency connection
//!
//! One Redis connection manager, opened at startup and shared for the
//! process lifetime. The connection is attempted exactly once; failure is
//! fatal to startup, never retried.

use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{Client, RedisError};
use std::time::Duration;
use tracing::info;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn connect(url: &str) -> Result<ConnectionManager, RedisError> {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(CONNECT_TIMEOUT);

    let client = Client::open(url)?;
    let connection = client.get_connection_manager_with_config(config).await?;

    info!("Database connection established");
    Ok(connection)
}
