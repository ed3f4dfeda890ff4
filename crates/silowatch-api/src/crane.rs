// Stacker crane endpoints (TLV1 / TLV2).
//
// Status and history come from the database mirror; the older unit
// record and the alarm feed come from the PLC gateway.

use tracing::debug;

use crate::client::StatusClient;
use crate::error::Error;
use crate::models::{AlarmEntry, CraneStatusRow, CraneUnit};

impl StatusClient {
    /// Latest status row for crane `unit` (1 or 2).
    ///
    /// `GET {mirror}/tlv{unit}`
    pub async fn crane_status(&self, unit: u8) -> Result<CraneStatusRow, Error> {
        let url = self.mirror_url(&format!("tlv{unit}"));
        debug!(unit, "fetching crane status");
        self.get_json(url).await
    }

    /// Recent status history for crane `unit`, newest first.
    ///
    /// `GET {mirror}/tlv{unit}/historial?limit={limit}`
    pub async fn crane_history(&self, unit: u8, limit: usize) -> Result<Vec<CraneStatusRow>, Error> {
        let url = self.mirror_url(&format!("tlv{unit}/historial?limit={limit}"));
        debug!(unit, limit, "fetching crane history");
        self.get_json(url).await
    }

    /// Unit record for a crane from the PLC gateway.
    ///
    /// `GET {gateway}/transelevadores/{id}`
    pub async fn crane_unit(&self, id: &str) -> Result<CraneUnit, Error> {
        let url = self.gateway_url(&format!("transelevadores/{id}"));
        debug!(id, "fetching crane unit record");
        self.get_json(url).await
    }

    /// Alarm feed for a crane from the PLC gateway.
    ///
    /// `GET {gateway}/transelevadores/{id}/alarmas`
    pub async fn crane_alarms(&self, id: &str) -> Result<Vec<AlarmEntry>, Error> {
        let url = self.gateway_url(&format!("transelevadores/{id}/alarmas"));
        debug!(id, "fetching crane alarm feed");
        self.get_json(url).await
    }
}
