//! Process-wide logging setup
//!
//! Configured exactly once at startup. The default verbosity derives from
//! the runtime mode and can always be overridden with `RUST_LOG`:
//! development gets human-readable output at `debug`, production gets
//! structured JSON at `warn`, tests stay quiet at `error`.
//!
//! The fmt writer goes to stdout and flushes per event, so no explicit
//! teardown is needed before exit.

use crate::config::Mode;
use tracing_subscriber::EnvFilter;

pub fn init(mode: Mode) {
    let default_directive = match mode {
        Mode::Development => "debug",
        Mode::Production => "warn",
        Mode::Test => "error",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    if mode.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
