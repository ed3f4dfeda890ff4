// Domain model for the warehouse devices.
//
// Wire rows (silowatch_api::models) are converted into these types by
// `convert`; consumers never see raw PLC integer flags.

mod alarm;
mod status;

pub use alarm::{Alarm, Severity};
pub use status::{BridgeState, CarMode, CraneState, DeviceState, TransferCarState};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

// ── Device classes ───────────────────────────────────────────────────

/// The physical units with a status endpoint.
///
/// The elevator has none; it only appears in the alarm catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceClass {
    /// Stacker crane 1 (TLV1).
    #[strum(serialize = "crane1")]
    Crane1,
    /// Stacker crane 2 (TLV2).
    #[strum(serialize = "crane2")]
    Crane2,
    /// Transfer bridge (PT).
    #[strum(serialize = "bridge")]
    Bridge,
    /// Transfer car (CT).
    #[strum(serialize = "transfer-car")]
    TransferCar,
}

impl DeviceClass {
    pub const ALL: [DeviceClass; 4] = [
        DeviceClass::Crane1,
        DeviceClass::Crane2,
        DeviceClass::Bridge,
        DeviceClass::TransferCar,
    ];

    /// Human-readable unit name for operator-facing output.
    pub fn unit_name(self) -> &'static str {
        match self {
            Self::Crane1 => "Stacker crane 1",
            Self::Crane2 => "Stacker crane 2",
            Self::Bridge => "Transfer bridge",
            Self::TransferCar => "Transfer car",
        }
    }

    /// The stable device identifier used in alarms and logs.
    pub fn unit_id(self) -> &'static str {
        match self {
            Self::Crane1 => "TRANS-001",
            Self::Crane2 => "TRANS-002",
            Self::Bridge => "PUENTE-001",
            Self::TransferCar => "TRANSF-001",
        }
    }
}

// ── Snapshots ────────────────────────────────────────────────────────

/// Which tier produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Database mirror (primary for every class).
    Mirror,
    /// PLC gateway (secondary, bridge only).
    Gateway,
    /// Documented default values; no backend produced this.
    Placeholder,
}

/// A point-in-time read of one device's state.
///
/// Immutable once built; a newer fetch supersedes it, nothing mutates
/// it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub device: DeviceClass,
    /// When the backend captured or last synchronized this state.
    pub captured_at: DateTime<Utc>,
    /// Wall-clock time of the fetch ("last updated" display).
    pub fetched_at: DateTime<Utc>,
    pub origin: Origin,
    pub state: DeviceState,
}

impl Snapshot {
    /// The documented placeholder snapshot for a device class.
    ///
    /// Values are the fixed development defaults; `origin` is
    /// [`Origin::Placeholder`] so presentation code can mark them.
    pub fn placeholder(device: DeviceClass, now: DateTime<Utc>) -> Self {
        Self {
            device,
            captured_at: now,
            fetched_at: now,
            origin: Origin::Placeholder,
            state: DeviceState::placeholder(device),
        }
    }
}

// ── Readings ─────────────────────────────────────────────────────────

/// The tri-state result of a status fetch.
///
/// Presentation code can distinguish fresh data, last-known-good data,
/// and never-succeeded instead of only ever seeing plausible-looking
/// numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Reading {
    /// The fetch that produced this reading succeeded.
    Fresh(Snapshot),
    /// The latest fetch failed; this is the last snapshot that succeeded.
    Stale(Snapshot),
    /// No fetch has ever succeeded for this device.
    Unavailable,
}

impl Reading {
    /// The carried snapshot, if any.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            Self::Fresh(s) | Self::Stale(s) => Some(s),
            Self::Unavailable => None,
        }
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, Self::Fresh(_))
    }

    /// A snapshot suitable for display regardless of tier: the carried
    /// one, or the documented placeholder when nothing ever succeeded.
    pub fn snapshot_or_placeholder(
        &self,
        device: DeviceClass,
        now: DateTime<Utc>,
    ) -> Snapshot {
        match self.snapshot() {
            Some(s) => s.clone(),
            None => Snapshot::placeholder(device, now),
        }
    }
}
