//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use silowatch_config::ConfigError;
use silowatch_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const UNSUPPORTED: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Cannot reach backend at {url}")]
    #[diagnostic(
        code(silowatch::connection_failed),
        help(
            "Check that the backend services are running on the plant host.\n\
             URL: {url}\n\
             Override with --host or --gateway/--mirror."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(silowatch::timeout),
        help("Increase --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Operations ───────────────────────────────────────────────────
    #[error("PLC sync failed for {device}: {message}")]
    #[diagnostic(
        code(silowatch::sync_failed),
        help(
            "The backend could not refresh this device from the PLC.\n\
             The last stored state is unchanged; nothing was substituted."
        )
    )]
    SyncFailed { device: String, message: String },

    #[error("{device} has no PLC sync endpoint")]
    #[diagnostic(
        code(silowatch::sync_unsupported),
        help("Only 'bridge' and 'transfer-car' support sync.")
    )]
    SyncUnsupported { device: String },

    #[error("Alarm '{id}' not found")]
    #[diagnostic(
        code(silowatch::alarm_not_found),
        help("Run: silowatch alarms list to see current alarm ids.")
    )]
    AlarmNotFound { id: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Backend error: {message}")]
    #[diagnostic(code(silowatch::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    // ── Validation / configuration ───────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(silowatch::validation))]
    Validation { field: String, reason: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(silowatch::config),
        help("Check the config file and SILOWATCH_* environment variables.")
    )]
    Config { message: String },

    // ── IO / serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(silowatch::json))]
    Json(#[from] serde_json::Error),

    // ── Catch-all ────────────────────────────────────────────────────
    #[error("{0}")]
    #[diagnostic(code(silowatch::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::SyncUnsupported { .. } => exit_code::UNSUPPORTED,
            Self::Validation { .. } | Self::AlarmNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError / ConfigError mapping ──────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::BackendUnreachable { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }
            CoreError::Timeout => CliError::Timeout,
            CoreError::SyncFailed { device, message } => CliError::SyncFailed {
                device: device.to_string(),
                message,
            },
            CoreError::SyncUnsupported { device } => CliError::SyncUnsupported {
                device: device.to_string(),
            },
            CoreError::Api { message, status } => CliError::ApiError { message, status },
            CoreError::Config { message } => CliError::Config { message },
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
