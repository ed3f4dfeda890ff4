// Raw HTTP client for the warehouse status backends.
//
// Wraps `reqwest::Client` with base-URL construction for the two
// backends and envelope normalization. The per-device endpoint methods
// (cranes, bridge, transfer car) live as inherent methods in separate
// files to keep this module focused on transport mechanics.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::envelope;
use crate::error::Error;
use crate::transport::TransportConfig;

/// The two backend base URLs, resolved once at startup.
///
/// `gateway` is the PLC gateway API (legacy unit records, alarm feed,
/// bridge fallback routes); `mirror` is the database mirror API that
/// serves the PLC-synchronized status rows.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub gateway: Url,
    pub mirror: Url,
}

impl Endpoints {
    pub fn new(gateway: Url, mirror: Url) -> Self {
        Self { gateway, mirror }
    }
}

/// Raw HTTP client for both status backends.
///
/// All methods return unwrapped payloads -- the optional
/// `{ success, data }` envelope is stripped before the caller sees it,
/// and a `success` flag that is not `true` surfaces as
/// [`Error::Backend`].
#[derive(Clone)]
pub struct StatusClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl StatusClient {
    /// Create a new client from a [`TransportConfig`].
    pub fn new(endpoints: Endpoints, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, endpoints })
    }

    /// Create a client with a pre-built `reqwest::Client` (used by tests).
    pub fn with_client(http: reqwest::Client, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }

    /// The configured backend base URLs.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL under the PLC gateway base: `{gateway}/{path}`.
    pub(crate) fn gateway_url(&self, path: &str) -> Url {
        let base = self.endpoints.gateway.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{path}")).expect("invalid gateway URL")
    }

    /// Build a full URL under the database mirror base: `{mirror}/{path}`.
    pub(crate) fn mirror_url(&self, path: &str) -> Url {
        let base = self.endpoints.mirror.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{path}")).expect("invalid mirror URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the normalized payload.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let body = Self::read_body(resp).await?;
        envelope::decode(&body)
    }

    /// Send a body-less POST request and decode the normalized payload.
    pub(crate) async fn post_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("POST {url}");
        let resp = self.http.post(url).send().await.map_err(Error::Transport)?;
        let body = Self::read_body(resp).await?;
        envelope::decode(&body)
    }

    /// Send a body-less POST request expecting an `{ success }` ack.
    pub(crate) async fn post_ack(&self, url: Url) -> Result<(), Error> {
        debug!("POST {url}");
        let resp = self.http.post(url).send().await.map_err(Error::Transport)?;
        let body = Self::read_body(resp).await?;
        envelope::decode_ack(&body)
    }

    /// Check the HTTP status and return the response body.
    async fn read_body(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                body: envelope::preview(&body).to_owned(),
            });
        }

        resp.text().await.map_err(Error::Transport)
    }
}
