// Per-class device state.
//
// PLC 0/1 flags become bools, the three transfer-car mode bits collapse
// into one enum. Raw state codes whose meaning the PLC does not publish
// (crane `mode`, bridge `state`/`situation`) stay as integers.

use serde::{Deserialize, Serialize};

use super::DeviceClass;

/// Stacker crane state (TLV1 / TLV2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraneState {
    pub mode: i32,
    pub occupied: bool,
    pub fault: bool,
    /// Pallet license number currently carried (0 = none).
    pub pallet_id: i64,
    pub aisle: i32,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub order_state: i32,
    pub order_result: i32,
}

/// Transfer bridge state (PT).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeState {
    pub occupied: bool,
    pub state: i32,
    pub situation: i32,
    /// Aisle the bridge currently faces.
    pub position: i32,
}

/// Transfer car operating mode, from the three exclusive PLC mode bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarMode {
    Auto,
    Semi,
    Manual,
    Unknown,
}

/// Transfer car state (CT, data block DB112).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferCarState {
    pub connected: bool,
    pub fault: bool,
    pub mode: CarMode,
    pub door_open: bool,
    pub data_ok: bool,
    pub inbound_pallet: i64,
    pub outbound_pallet: i64,
    pub target_aisle: i32,
    pub work_cycle: i32,
    pub aisle: i32,
    /// 0 = free, 1 = occupied, 2 = fault.
    pub car_state: i32,
}

/// Class-specific state carried by a [`Snapshot`](super::Snapshot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename_all = "kebab-case")]
pub enum DeviceState {
    Crane(CraneState),
    Bridge(BridgeState),
    TransferCar(TransferCarState),
}

impl DeviceState {
    /// The documented placeholder state per class.
    ///
    /// Fixed development defaults: crane 1 parked in aisle 1 with pallet
    /// 1001, crane 2 in aisle 4 with pallet 2001, bridge idle at aisle 8,
    /// transfer car disconnected with everything zeroed.
    pub(crate) fn placeholder(device: DeviceClass) -> Self {
        match device {
            DeviceClass::Crane1 => Self::Crane(CraneState {
                mode: 1,
                occupied: false,
                fault: false,
                pallet_id: 1001,
                aisle: 1,
                x: 10,
                y: 5,
                z: 3,
                order_state: 0,
                order_result: 0,
            }),
            DeviceClass::Crane2 => Self::Crane(CraneState {
                mode: 1,
                occupied: false,
                fault: false,
                pallet_id: 2001,
                aisle: 4,
                x: 30,
                y: 8,
                z: 2,
                order_state: 0,
                order_result: 0,
            }),
            DeviceClass::Bridge => Self::Bridge(BridgeState {
                occupied: false,
                state: 0,
                situation: 0,
                position: 8,
            }),
            DeviceClass::TransferCar => Self::TransferCar(TransferCarState {
                connected: false,
                fault: false,
                mode: CarMode::Unknown,
                door_open: false,
                data_ok: false,
                inbound_pallet: 0,
                outbound_pallet: 0,
                target_aisle: 0,
                work_cycle: 0,
                aisle: 0,
                car_state: 0,
            }),
        }
    }
}
