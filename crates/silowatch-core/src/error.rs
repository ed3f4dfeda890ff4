// ── Core error types ──
//
// User-facing errors from silowatch-core. Consumers never see raw
// reqwest errors or JSON parse failures; the `From<silowatch_api::Error>`
// impl translates transport-layer errors into domain variants.
//
// Note the asymmetry with the read path: `fetch_status` never returns
// these at all (it degrades to `Reading::Stale`/`Unavailable`), while
// the sync path propagates them -- a masked sync failure would let an
// operator believe a PLC refresh happened when it did not.

use thiserror::Error;

use crate::model::DeviceClass;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    BackendUnreachable { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    // ── Operation errors ─────────────────────────────────────────────
    #[error("PLC sync failed for {device}: {message}")]
    SyncFailed {
        device: DeviceClass,
        message: String,
    },

    #[error("{device} has no PLC sync endpoint")]
    SyncUnsupported { device: DeviceClass },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Backend error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<silowatch_api::Error> for CoreError {
    fn from(err: silowatch_api::Error) -> Self {
        match err {
            silowatch_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::BackendUnreachable {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            silowatch_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            silowatch_api::Error::Http { status, body } => CoreError::Api {
                message: body,
                status: Some(status),
            },
            silowatch_api::Error::Backend { message } => CoreError::Api {
                message,
                status: None,
            },
            silowatch_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
