//! HTTP server and process lifecycle
//!
//! Binds the listening socket, serves the router, and hands shutdown
//! coordination to the lifecycle machinery in [`shutdown`].

pub mod shutdown;

pub use shutdown::{
    drain, shutdown_channel, wait_for_signal, DrainOutcome, Phase, ShutdownController,
    ShutdownSignal, GRACE_PERIOD,
};

use axum::Router;
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// Bind the listening socket
///
/// Failure here is a startup failure: fatal, never retried.
pub async fn bind(host: &str, port: u16) -> io::Result<TcpListener> {
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    // Log after successful bind - server is actually listening
    info!(%addr, "Server listening");
    Ok(listener)
}

/// Serve `app` until the shutdown signal fires, then stop accepting new
/// connections and let in-flight requests finish.
pub async fn run(
    listener: TcpListener,
    app: Router,
    mut shutdown: ShutdownSignal,
) -> io::Result<()> {
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move { shutdown.wait().await })
    .await
}

#[cfg(test)]
#[path = "shutdown_test.rs"]
mod shutdown_tests;
