// silowatch-core: Device status polling, tiered fallback, and alarm
// handling between silowatch-api and consumers (CLI).

pub mod client;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod monitor;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use client::DeviceStatusClient;
pub use config::MonitorConfig;
pub use error::CoreError;
pub use monitor::Monitor;
pub use store::{AlarmSimulator, AlarmStore, StatusBoard};
pub use stream::{AlarmListStream, ReadingStream};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Alarm, BridgeState, CarMode, CraneState, DeviceClass, DeviceState, Origin, Reading, Severity,
    Snapshot, TransferCarState,
};

// Re-export the endpoint pair so consumers rarely need silowatch-api
// directly.
pub use silowatch_api::Endpoints;
