use thiserror::Error;

/// Top-level error type for the `silowatch-api` crate.
///
/// Covers every failure mode of both backend surfaces: transport,
/// non-success HTTP statuses, backend-reported failure (`success: false`),
/// and malformed payloads. `silowatch-core` maps these into its own
/// user-facing variants.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Application ─────────────────────────────────────────────────
    /// Non-2xx HTTP status from a backend.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The backend reported failure through its `{success, data}` envelope.
    #[error("Backend reported failure: {message}")]
    Backend { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth falling back on.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
