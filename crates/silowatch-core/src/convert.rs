// ── Wire-to-domain conversion ──
//
// Maps silowatch-api rows into domain snapshots. PLC integer flags
// become bools here; anything nonzero counts as set, matching how the
// operator dashboard always treated them.

use chrono::{DateTime, NaiveDateTime, Utc};

use silowatch_api::models::{
    AlarmEntry, AlarmKind, BridgeStatusRow, CraneStatusRow, TransferCarStatusRow,
};

use crate::model::{
    Alarm, BridgeState, CarMode, CraneState, DeviceClass, DeviceState, Origin, Severity, Snapshot,
    TransferCarState,
};

/// Parse a backend timestamp leniently.
///
/// The mirror emits RFC 3339 with offset; the gateway sometimes emits
/// naive local-ish timestamps (`2025-05-03T14:35:23`). Naive values are
/// taken as UTC. Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    None
}

fn flag(v: i32) -> bool {
    v != 0
}

// ── Snapshot constructors ────────────────────────────────────────────

/// Build a crane snapshot from a mirror row.
pub fn crane_snapshot(
    device: DeviceClass,
    row: &CraneStatusRow,
    origin: Origin,
    fetched_at: DateTime<Utc>,
) -> Snapshot {
    Snapshot {
        device,
        captured_at: parse_timestamp(&row.timestamp).unwrap_or(fetched_at),
        fetched_at,
        origin,
        state: DeviceState::Crane(CraneState {
            mode: row.mode,
            occupied: flag(row.occupied),
            fault: flag(row.fault),
            pallet_id: row.pallet_id,
            aisle: row.aisle,
            x: row.x,
            y: row.y,
            z: row.z,
            order_state: row.order_state,
            order_result: row.order_result,
        }),
    }
}

/// Build a bridge snapshot from a mirror or gateway row.
pub fn bridge_snapshot(
    row: &BridgeStatusRow,
    origin: Origin,
    fetched_at: DateTime<Utc>,
) -> Snapshot {
    Snapshot {
        device: DeviceClass::Bridge,
        captured_at: parse_timestamp(&row.timestamp).unwrap_or(fetched_at),
        fetched_at,
        origin,
        state: DeviceState::Bridge(BridgeState {
            occupied: flag(row.occupied),
            state: row.state,
            situation: row.situation,
            position: row.position,
        }),
    }
}

/// Build a transfer car snapshot from a mirror row.
pub fn transfer_car_snapshot(
    row: &TransferCarStatusRow,
    origin: Origin,
    fetched_at: DateTime<Utc>,
) -> Snapshot {
    let mode = if flag(row.auto_mode) {
        CarMode::Auto
    } else if flag(row.semi_mode) {
        CarMode::Semi
    } else if flag(row.manual_mode) {
        CarMode::Manual
    } else {
        CarMode::Unknown
    };

    Snapshot {
        device: DeviceClass::TransferCar,
        captured_at: parse_timestamp(&row.timestamp).unwrap_or(fetched_at),
        fetched_at,
        origin,
        state: DeviceState::TransferCar(TransferCarState {
            connected: flag(row.connected),
            fault: flag(row.fault),
            mode,
            door_open: flag(row.door_open),
            data_ok: flag(row.data_ok),
            inbound_pallet: row.inbound_pallet,
            outbound_pallet: row.outbound_pallet,
            target_aisle: row.target_aisle,
            work_cycle: row.work_cycle,
            aisle: row.aisle,
            car_state: row.car_state,
        }),
    }
}

// ── Alarm feed mapping ───────────────────────────────────────────────

/// Map a gateway alarm feed entry onto a domain alarm.
///
/// The feed's `success` entries (completed cycles etc.) are
/// informational, not faults, so they land on `Info` alongside `info`.
pub fn alarm_from_entry(entry: &AlarmEntry, device: DeviceClass, now: DateTime<Utc>) -> Alarm {
    let severity = match entry.kind {
        AlarmKind::Error => Severity::Critical,
        AlarmKind::Warning => Severity::Warning,
        AlarmKind::Info | AlarmKind::Success => Severity::Info,
    };

    Alarm {
        id: entry.id.clone(),
        device_id: device.unit_id().to_owned(),
        device_name: device.unit_name().to_owned(),
        message: format!("{}: {}", entry.title, entry.description),
        severity,
        timestamp: parse_timestamp(&entry.timestamp).unwrap_or(now),
        acknowledged: false,
    }
}
