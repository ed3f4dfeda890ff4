// ── Tiered device status client ──
//
// Wraps the raw `StatusClient` with the fallback policy and the
// `StatusBoard`. The read path never returns an error: a fetch that
// fails on every tier degrades the published reading to `Stale` or
// `Unavailable`. The sync path is the opposite and propagates every
// failure, so an operator never believes a PLC refresh happened when
// it did not.

use std::sync::Arc;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use tracing::{debug, warn};

use silowatch_api::{StatusClient, TransportConfig};

use crate::config::MonitorConfig;
use crate::convert;
use crate::error::CoreError;
use crate::model::{Alarm, DeviceClass, Origin, Reading, Snapshot};
use crate::store::StatusBoard;

/// Device status client with tiered fallback.
///
/// Primary tier for every class is the database mirror; the transfer
/// bridge additionally falls back to the PLC gateway. Results are
/// published to the shared [`StatusBoard`] as they arrive.
#[derive(Clone)]
pub struct DeviceStatusClient {
    api: StatusClient,
    board: Arc<StatusBoard>,
}

impl DeviceStatusClient {
    /// Build a client from a monitor configuration.
    pub fn new(config: &MonitorConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
        };
        let api = StatusClient::new(config.endpoints.clone(), &transport)?;
        Ok(Self::with_api(api))
    }

    /// Wrap an existing raw client (used by tests).
    pub fn with_api(api: StatusClient) -> Self {
        Self {
            api,
            board: Arc::new(StatusBoard::new()),
        }
    }

    /// The shared reading board.
    pub fn board(&self) -> Arc<StatusBoard> {
        Arc::clone(&self.board)
    }

    // ── Status (read path, never errors) ─────────────────────────────

    /// Fetch the current status for a device and publish the result.
    ///
    /// On success the snapshot becomes the device's last-known-good
    /// state and is published as [`Reading::Fresh`]. On failure the
    /// published reading is [`Reading::Stale`] around the last good
    /// snapshot, or [`Reading::Unavailable`] if nothing ever succeeded.
    pub async fn fetch_status(&self, device: DeviceClass) -> Reading {
        let reading = match self.fetch_snapshot(device).await {
            Ok(snapshot) => {
                debug!(%device, origin = ?snapshot.origin, "status fetch succeeded");
                self.board.record_success(snapshot.clone());
                Reading::Fresh(snapshot)
            }
            Err(err) => {
                warn!(%device, error = %err, "status fetch failed on every tier");
                self.board.degraded(device)
            }
        };
        self.board.publish(device, reading.clone());
        reading
    }

    async fn fetch_snapshot(&self, device: DeviceClass) -> Result<Snapshot, CoreError> {
        let fetched_at = Utc::now();
        match device {
            DeviceClass::Crane1 => {
                let row = self.api.crane_status(1).await?;
                Ok(convert::crane_snapshot(device, &row, Origin::Mirror, fetched_at))
            }
            DeviceClass::Crane2 => {
                let row = self.api.crane_status(2).await?;
                Ok(convert::crane_snapshot(device, &row, Origin::Mirror, fetched_at))
            }
            DeviceClass::Bridge => match self.api.bridge_status().await {
                Ok(row) => Ok(convert::bridge_snapshot(&row, Origin::Mirror, fetched_at)),
                Err(primary) => {
                    warn!(error = %primary, "mirror bridge status failed, trying gateway");
                    let row = self.api.bridge_status_gateway().await?;
                    Ok(convert::bridge_snapshot(&row, Origin::Gateway, fetched_at))
                }
            },
            DeviceClass::TransferCar => {
                let row = self.api.transfer_car_status().await?;
                Ok(convert::transfer_car_snapshot(&row, Origin::Mirror, fetched_at))
            }
        }
    }

    // ── Sync (write path, always propagates) ─────────────────────────

    /// Ask the backend to refresh a device's state from the PLC.
    ///
    /// The bridge sync returns the freshly synchronized snapshot, which
    /// is also published to the board; the transfer car sync is only
    /// acknowledged. Cranes have no sync endpoint.
    pub async fn request_sync(&self, device: DeviceClass) -> Result<Option<Snapshot>, CoreError> {
        match device {
            DeviceClass::Crane1 | DeviceClass::Crane2 => {
                Err(CoreError::SyncUnsupported { device })
            }
            DeviceClass::Bridge => {
                let fetched_at = Utc::now();
                let (row, origin) = match self.api.bridge_sync().await {
                    Ok(row) => (row, Origin::Mirror),
                    Err(primary) => {
                        warn!(error = %primary, "mirror bridge sync failed, trying gateway");
                        let row = self.api.bridge_sync_gateway().await.map_err(|err| {
                            CoreError::SyncFailed {
                                device,
                                message: err.to_string(),
                            }
                        })?;
                        (row, Origin::Gateway)
                    }
                };
                let snapshot = convert::bridge_snapshot(&row, origin, fetched_at);
                self.board.record_success(snapshot.clone());
                self.board.publish(device, Reading::Fresh(snapshot.clone()));
                Ok(Some(snapshot))
            }
            DeviceClass::TransferCar => {
                self.api
                    .transfer_car_sync()
                    .await
                    .map_err(|err| CoreError::SyncFailed {
                        device,
                        message: err.to_string(),
                    })?;
                Ok(None)
            }
        }
    }

    // ── History ──────────────────────────────────────────────────────

    /// Recent status history for a device, newest first.
    ///
    /// Cranes and the bridge have real history endpoints; the transfer
    /// car does not, so its history is synthesized from the current
    /// reading (one entry per minute, origin marks synthesized data).
    /// The bridge falls back mirror, then gateway, then synthesized.
    pub async fn fetch_history(
        &self,
        device: DeviceClass,
        limit: usize,
    ) -> Result<Vec<Snapshot>, CoreError> {
        let fetched_at = Utc::now();
        match device {
            DeviceClass::Crane1 => {
                let rows = self.api.crane_history(1, limit).await?;
                Ok(rows
                    .iter()
                    .map(|row| convert::crane_snapshot(device, row, Origin::Mirror, fetched_at))
                    .collect())
            }
            DeviceClass::Crane2 => {
                let rows = self.api.crane_history(2, limit).await?;
                Ok(rows
                    .iter()
                    .map(|row| convert::crane_snapshot(device, row, Origin::Mirror, fetched_at))
                    .collect())
            }
            DeviceClass::Bridge => {
                let (rows, origin) = match self.api.bridge_history(limit).await {
                    Ok(rows) => (rows, Origin::Mirror),
                    Err(primary) => {
                        warn!(error = %primary, "mirror bridge history failed, trying gateway");
                        match self.api.bridge_history_gateway(limit).await {
                            Ok(rows) => (rows, Origin::Gateway),
                            Err(secondary) => {
                                warn!(error = %secondary, "gateway bridge history failed too");
                                return Ok(self.synthesized_history(device, limit, fetched_at));
                            }
                        }
                    }
                };
                Ok(rows
                    .iter()
                    .map(|row| convert::bridge_snapshot(row, origin, fetched_at))
                    .collect())
            }
            DeviceClass::TransferCar => Ok(self.synthesized_history(device, limit, fetched_at)),
        }
    }

    /// A newest-first series derived from the current reading, spaced
    /// one minute apart. Falls back to the documented placeholder when
    /// no reading exists, in which case `origin` says so.
    fn synthesized_history(
        &self,
        device: DeviceClass,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<Snapshot> {
        let base = self.board.latest(device).snapshot_or_placeholder(device, now);
        (0..limit as i64)
            .map(|i| {
                let mut snap = base.clone();
                snap.captured_at = base.captured_at - ChronoDuration::minutes(i);
                snap
            })
            .collect()
    }

    // ── Alarms ───────────────────────────────────────────────────────

    /// The real alarm feed for a device, newest entries as the backend
    /// returns them. Only the cranes have a feed; other classes yield
    /// an empty list.
    pub async fn fetch_alarms(&self, device: DeviceClass) -> Result<Vec<Alarm>, CoreError> {
        let now = Utc::now();
        match device {
            DeviceClass::Crane1 | DeviceClass::Crane2 => {
                let entries = self.api.crane_alarms(device.unit_id()).await?;
                Ok(entries
                    .iter()
                    .map(|entry| convert::alarm_from_entry(entry, device, now))
                    .collect())
            }
            DeviceClass::Bridge | DeviceClass::TransferCar => Ok(Vec::new()),
        }
    }
}
