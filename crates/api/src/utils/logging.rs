//! Logging bootstrap and per-command outcome logging

use std::time::Duration;

use copion_domain::{CopionError, LogFormat, LoggingConfig, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `config.level` is the filter.
///
/// # Errors
/// `CopionError::Config` if the filter does not parse or a subscriber is
/// already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| CopionError::Config(format!("invalid log level '{}': {e}", config.level)))?,
    };

    let installed = match config.format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).try_init(),
    };

    installed.map_err(|e| CopionError::Config(format!("failed to install subscriber: {e}")))
}

/// Log the outcome of a command execution with structured fields.
///
/// `command` is a stable identifier such as `"profiles::create"`; callers
/// must not forward request data through it.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}

/// Convert a `CopionError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &CopionError) -> &'static str {
    match error {
        CopionError::NotFound(_) => "not_found",
        CopionError::InvalidInput(_) => "invalid_input",
        CopionError::Io(_) => "io",
        CopionError::Database(_) => "database",
        CopionError::Config(_) => "config",
        CopionError::Internal(_) => "internal",
    }
}
