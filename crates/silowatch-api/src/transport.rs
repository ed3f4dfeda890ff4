// Shared transport configuration for building reqwest::Client instances.
//
// Both backends are plain HTTP on the plant network, so there is no TLS
// or credential handling here -- just timeout and user-agent settings
// shared by every client instance.

use std::time::Duration;

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        Ok(reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("silowatch/0.1.0")
            .build()?)
    }
}
