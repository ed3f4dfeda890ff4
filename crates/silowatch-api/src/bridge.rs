// Transfer bridge (PT) endpoints.
//
// The bridge is the one device with routes on both backends: the
// database mirror under `/puente` and the PLC gateway under `/pt`.
// This module only exposes both surfaces; the fallback ordering
// between them is policy and lives in `silowatch-core`.

use tracing::debug;

use crate::client::StatusClient;
use crate::error::Error;
use crate::models::BridgeStatusRow;

impl StatusClient {
    /// Latest bridge status from the database mirror.
    ///
    /// `GET {mirror}/puente`
    pub async fn bridge_status(&self) -> Result<BridgeStatusRow, Error> {
        let url = self.mirror_url("puente");
        debug!("fetching bridge status (mirror)");
        self.get_json(url).await
    }

    /// Latest bridge status from the PLC gateway.
    ///
    /// `GET {gateway}/pt` -- may arrive wrapped as `{ success, data }`.
    pub async fn bridge_status_gateway(&self) -> Result<BridgeStatusRow, Error> {
        let url = self.gateway_url("pt");
        debug!("fetching bridge status (gateway)");
        self.get_json(url).await
    }

    /// Recent bridge status history from the database mirror.
    ///
    /// `GET {mirror}/puente/historial?limit={limit}`
    pub async fn bridge_history(&self, limit: usize) -> Result<Vec<BridgeStatusRow>, Error> {
        let url = self.mirror_url(&format!("puente/historial?limit={limit}"));
        debug!(limit, "fetching bridge history (mirror)");
        self.get_json(url).await
    }

    /// Recent bridge status history from the PLC gateway.
    ///
    /// `GET {gateway}/pt/historial?limit={limit}`
    pub async fn bridge_history_gateway(&self, limit: usize) -> Result<Vec<BridgeStatusRow>, Error> {
        let url = self.gateway_url(&format!("pt/historial?limit={limit}"));
        debug!(limit, "fetching bridge history (gateway)");
        self.get_json(url).await
    }

    /// Trigger a bridge refresh from the PLC through the mirror.
    ///
    /// `POST {mirror}/puente/sync` -- returns the freshly synchronized row.
    pub async fn bridge_sync(&self) -> Result<BridgeStatusRow, Error> {
        let url = self.mirror_url("puente/sync");
        debug!("requesting bridge sync (mirror)");
        self.post_json(url).await
    }

    /// Trigger a bridge refresh from the PLC through the gateway.
    ///
    /// `POST {gateway}/pt/sync`
    pub async fn bridge_sync_gateway(&self) -> Result<BridgeStatusRow, Error> {
        let url = self.gateway_url("pt/sync");
        debug!("requesting bridge sync (gateway)");
        self.post_json(url).await
    }
}
