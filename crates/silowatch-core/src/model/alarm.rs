// Operator alarms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Alarm severity. Ordered so that `Critical > Warning > Info`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// A notification surfaced to the operator.
///
/// `acknowledged` only ever transitions false -> true; nothing resets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: String,
    /// Stable identifier of the physical unit (e.g. `TRANS-001`).
    pub device_id: String,
    pub device_name: String,
    pub message: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub acknowledged: bool,
}

impl Alarm {
    /// Build a fresh, unacknowledged alarm stamped `now`.
    pub fn new(
        device_id: impl Into<String>,
        device_name: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("alarm-{}", uuid::Uuid::new_v4()),
            device_id: device_id.into(),
            device_name: device_name.into(),
            message: message.into(),
            severity,
            timestamp: now,
            acknowledged: false,
        }
    }
}
