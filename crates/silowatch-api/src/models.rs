// Wire models for both backends.
//
// Field names on the wire are the backend's database column names
// (Spanish); they are renamed to English here and converted into domain
// types by `silowatch-core`. Numeric flags stay numeric at this layer --
// the PLC exports booleans as 0/1 integers and the mirror passes them
// through untouched. Timestamps stay as strings because the mirror is
// not consistent about offsets; core parses them leniently.

use serde::{Deserialize, Serialize};

// ── Stacker cranes (TLV1 / TLV2) ─────────────────────────────────────

/// Crane status row from the database mirror (`/tlv1`, `/tlv2`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CraneStatusRow {
    pub id: i64,
    #[serde(rename = "modo")]
    pub mode: i32,
    #[serde(rename = "ocupacion")]
    pub occupied: i32,
    #[serde(rename = "averia")]
    pub fault: i32,
    #[serde(rename = "matricula")]
    pub pallet_id: i64,
    #[serde(rename = "pasillo_actual")]
    pub aisle: i32,
    #[serde(rename = "x_actual")]
    pub x: i32,
    #[serde(rename = "y_actual")]
    pub y: i32,
    #[serde(rename = "z_actual")]
    pub z: i32,
    pub timestamp: String,
    #[serde(rename = "estadoFinOrden", default)]
    pub order_state: i32,
    #[serde(rename = "resultadoFinOrden", default)]
    pub order_result: i32,
}

/// Crane unit record from the PLC gateway (`/transelevadores/{id}`).
///
/// An older, flatter schema than the mirror rows -- kept for the unit
/// metadata (name, daily cycles, efficiency) the mirror does not carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CraneUnit {
    pub id: String,
    pub name: String,
    pub status: String,
    pub position_x: f64,
    pub position_y: f64,
    pub position_z: f64,
    pub last_activity: String,
    pub cycles_today: i64,
    pub efficiency: f64,
}

// ── Transfer bridge (PT) ─────────────────────────────────────────────

/// Bridge status row (`{mirror}/puente`, fallback `{gateway}/pt`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeStatusRow {
    pub id: i64,
    #[serde(rename = "ocupacion")]
    pub occupied: i32,
    #[serde(rename = "estado")]
    pub state: i32,
    #[serde(rename = "situacion")]
    pub situation: i32,
    #[serde(rename = "posicion")]
    pub position: i32,
    pub timestamp: String,
}

// ── Transfer car (CT, PLC data block DB112) ──────────────────────────

/// Transfer car status row (`{mirror}/db112/read`).
///
/// Wire names follow the PLC data block tags rather than database
/// columns, hence the `St`/`Mat`/`Pas` prefixes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferCarStatusRow {
    pub id: i64,
    pub timestamp: String,
    #[serde(rename = "StConectado")]
    pub connected: i32,
    #[serde(rename = "StDefecto")]
    pub fault: i32,
    #[serde(rename = "St_Auto")]
    pub auto_mode: i32,
    #[serde(rename = "St_Semi")]
    pub semi_mode: i32,
    #[serde(rename = "St_Manual")]
    pub manual_mode: i32,
    #[serde(rename = "St_Puerta")]
    pub door_open: i32,
    #[serde(rename = "St_Datos")]
    pub data_ok: i32,
    #[serde(rename = "MatEntrada")]
    pub inbound_pallet: i64,
    #[serde(rename = "MatSalida")]
    pub outbound_pallet: i64,
    #[serde(rename = "PasDestino")]
    pub target_aisle: i32,
    #[serde(rename = "CicloTrabajo")]
    pub work_cycle: i32,
    #[serde(rename = "PasActual")]
    pub aisle: i32,
    #[serde(rename = "St_Carro")]
    pub car_state: i32,
}

// ── Alarm feed ───────────────────────────────────────────────────────

/// Alarm entry from the gateway feed (`/transelevadores/{id}/alarmas`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmEntry {
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    pub timestamp: String,
    #[serde(rename = "tipo")]
    pub kind: AlarmKind,
}

/// Alarm classification used by the gateway feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlarmKind {
    Error,
    Warning,
    Info,
    Success,
}
