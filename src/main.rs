use groundwork::config::{Config, Mode};
use groundwork::server::shutdown::{self, DrainOutcome};
use groundwork::state::AppState;
use groundwork::{db, logging, monitor, routes, server};
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init(Mode::from_env());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Launching groundwork backend"
    );

    // Startup failures are fatal: exit 1 immediately, no retries and no
    // drain protocol.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Configuration missing or invalid");
            return ExitCode::FAILURE;
        }
    };

    let db = match db::connect(&config.database_url).await {
        Ok(connection) => connection,
        Err(e) => {
            error!(error = %e, "Database connection failed");
            return ExitCode::FAILURE;
        }
    };

    let host = config.host.clone();
    let port = config.port;
    let mode = config.mode;

    let state = AppState::new(config);
    let app = routes::router(state.clone());

    let listener = match server::bind(&host, port).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, host = %host, port, "Failed to bind server socket");
            return ExitCode::FAILURE;
        }
    };

    monitor::spawn(state, db);

    let (controller, signal) = shutdown::shutdown_channel();
    let mut server = tokio::spawn(server::run(listener, app, signal));

    info!(mode = mode.as_str(), "Startup complete");

    // Run until a termination signal arrives or the accept loop dies on its
    // own (server fault or panic). Only the signal path enters the drain.
    let received = tokio::select! {
        signal_name = shutdown::wait_for_signal() => Some(signal_name),
        result = &mut server => {
            match result {
                Ok(Ok(())) => error!("Server stopped unexpectedly"),
                Ok(Err(e)) => error!(error = %e, "Server crashed"),
                Err(e) => error!(error = %e, "Server task panicked"),
            }
            None
        }
    };

    let Some(signal_name) = received else {
        return ExitCode::FAILURE;
    };

    controller.begin_drain(signal_name);
    let outcome = shutdown::drain(server, shutdown::GRACE_PERIOD).await;
    match outcome {
        DrainOutcome::Graceful => info!("Shut down gracefully"),
        DrainOutcome::DeadlineExceeded => error!("Shutdown forced after grace period"),
    }
    outcome.exit_code()
}
