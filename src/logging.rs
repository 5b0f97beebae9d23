use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Once;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

static SETUP: Once = Once::new();

/// File to write logs into. Logging stays disabled when it is not set.
pub const SCARD_BRIDGE_LOG_PATH_ENV: &str = "SCARD_BRIDGE_LOG_PATH";
/// `EnvFilter` directives, e.g. `scard_bridge=debug`.
pub const SCARD_BRIDGE_LOG_LEVEL_ENV: &str = "SCARD_BRIDGE_LOG_LEVEL";

/// Installs the file logger once per process.
///
/// This function can be called multiple times safely.
pub fn setup_logger() {
    SETUP.call_once(|| {
        let path = if let Ok(path) = std::env::var(SCARD_BRIDGE_LOG_PATH_ENV) {
            PathBuf::from(path)
        } else {
            return;
        };

        let file = match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("[scard-bridge] couldn't open log file {}: {e}", path.display());
                return;
            }
        };

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_thread_names(true)
            .with_ansi(false)
            .with_writer(file);

        let registry = tracing_subscriber::registry()
            .with(fmt_layer)
            .with(EnvFilter::from_env(SCARD_BRIDGE_LOG_LEVEL_ENV));

        if registry.try_init().is_err() {
            eprintln!("[scard-bridge] a global tracing subscriber is already installed");
        }
    })
}
