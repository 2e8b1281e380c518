//! Process lifecycle: Running -> Draining -> Exited
//!
//! Termination signals (SIGTERM, SIGINT, SIGUSR2) move the process from
//! Running to Draining: the listener stops accepting connections and a
//! fixed grace period is armed. In-flight requests finishing first is the
//! graceful path (exit 0); the deadline elapsing first forces exit (exit
//! 1). Exactly one of the two arms wins and cancels the other, and there
//! is no path from Draining back to Running.

use std::io;
use std::process::ExitCode;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Maximum wall-clock time allowed for draining before forced exit
pub const GRACE_PERIOD: Duration = Duration::from_secs(30);

/// Lifecycle phase observed by components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Draining,
}

/// Receiver half: cloned and passed to components that wait for the drain
#[derive(Clone)]
pub struct ShutdownSignal {
    receiver: watch::Receiver<Phase>,
}

impl ShutdownSignal {
    /// Wait until the process enters Draining
    pub async fn wait(&mut self) {
        while *self.receiver.borrow() == Phase::Running {
            if self.receiver.changed().await.is_err() {
                // Sender dropped, treat as shutdown
                break;
            }
        }
    }

    /// Current phase (non-blocking)
    pub fn phase(&self) -> Phase {
        *self.receiver.borrow()
    }

    pub fn is_draining(&self) -> bool {
        self.phase() == Phase::Draining
    }
}

/// Sender half: owned by the startup path, fires the transition once
pub struct ShutdownController {
    sender: watch::Sender<Phase>,
}

impl ShutdownController {
    /// Move the process into Draining. Idempotent; there is no way back.
    pub fn begin_drain(&self, reason: &str) {
        let _ = self.sender.send(Phase::Draining);
        info!(reason, "Draining started");
    }
}

/// Create a new lifecycle channel pair
///
/// Returns (controller, signal) where:
/// - controller: Used to trigger the drain
/// - signal: Cloned and passed to components that need to listen
pub fn shutdown_channel() -> (ShutdownController, ShutdownSignal) {
    let (sender, receiver) = watch::channel(Phase::Running);
    (ShutdownController { sender }, ShutdownSignal { receiver })
}

/// Outcome of the drain race
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// All in-flight connections finished inside the grace period
    Graceful,
    /// The deadline elapsed first
    DeadlineExceeded,
}

impl DrainOutcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            DrainOutcome::Graceful => ExitCode::SUCCESS,
            DrainOutcome::DeadlineExceeded => ExitCode::FAILURE,
        }
    }
}

/// Race the draining server against the grace-period deadline
///
/// Exactly one side completes; the winner cancels the loser. On the forced
/// path the server task is aborted so the process can exit without waiting
/// on hung connections.
pub async fn drain(mut server: JoinHandle<io::Result<()>>, grace: Duration) -> DrainOutcome {
    match tokio::time::timeout(grace, &mut server).await {
        Ok(result) => {
            match result {
                Ok(Ok(())) => info!("Server closed"),
                Ok(Err(e)) => error!(error = %e, "Server ended with error during drain"),
                Err(e) => error!(error = %e, "Server task failed during drain"),
            }
            DrainOutcome::Graceful
        }
        Err(_) => {
            server.abort();
            error!("Forcing shutdown after timeout");
            DrainOutcome::DeadlineExceeded
        }
    }
}

/// Wait for SIGTERM, SIGINT, or SIGUSR2
///
/// This function blocks until a termination signal is received.
/// Returns the signal name that was received.
///
/// # Panics
/// Panics if signal handlers cannot be registered (OS resource exhaustion).
#[cfg(unix)]
pub async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Failed to register SIGTERM handler");
            panic!("Cannot register SIGTERM handler: {}", e);
        }
    };
    let mut sigint = match signal(SignalKind::interrupt()) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Failed to register SIGINT handler");
            panic!("Cannot register SIGINT handler: {}", e);
        }
    };
    let mut sigusr2 = match signal(SignalKind::user_defined2()) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Failed to register SIGUSR2 handler");
            panic!("Cannot register SIGUSR2 handler: {}", e);
        }
    };

    tokio::select! {
        _ = sigterm.recv() => {
            info!("Received SIGTERM");
            "SIGTERM"
        }
        _ = sigint.recv() => {
            info!("Received SIGINT");
            "SIGINT"
        }
        _ = sigusr2.recv() => {
            info!("Received SIGUSR2");
            "SIGUSR2"
        }
    }
}

/// Wait for Ctrl+C signal (Windows)
///
/// # Panics
/// Panics if Ctrl+C handler cannot be registered.
#[cfg(not(unix))]
pub async fn wait_for_signal() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to wait for Ctrl+C");
        panic!("Cannot wait for Ctrl+C: {}", e);
    }
    info!("Received Ctrl+C");
    "CTRL_C"
}
