// ── Runtime monitor configuration ──
//
// These types describe *how* to reach the status backends and how the
// polling loop behaves. They never touch disk -- silowatch-config
// resolves files/env/hostname into a `MonitorConfig` and hands it in,
// so there is no hidden global endpoint state.

use std::time::Duration;

use silowatch_api::Endpoints;
use url::Url;

use crate::model::DeviceClass;

/// Configuration for one monitor instance.
///
/// Built by the CLI (via silowatch-config), passed to [`Monitor`] --
/// core never reads config files.
///
/// [`Monitor`]: crate::monitor::Monitor
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// The two backend base URLs.
    pub endpoints: Endpoints,
    /// Request timeout.
    pub timeout: Duration,
    /// How often each device's status is polled.
    pub status_interval: Duration,
    /// Device classes the monitor polls.
    pub devices: Vec<DeviceClass>,
    /// Bounded alarm list capacity.
    pub alarm_capacity: usize,
    /// Whether the local alarm simulator runs (no real alarm feed yet
    /// for most devices).
    pub simulate_alarms: bool,
    /// Alarm simulator tick interval.
    pub alarm_interval: Duration,
    /// Per-tick probability that the simulator raises one alarm.
    pub alarm_probability: f64,
    /// Default history depth for history fetches.
    pub history_limit: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            timeout: Duration::from_secs(10),
            status_interval: Duration::from_secs(10),
            devices: DeviceClass::ALL.to_vec(),
            alarm_capacity: 10,
            simulate_alarms: true,
            alarm_interval: Duration::from_secs(15),
            alarm_probability: 0.1,
            history_limit: 10,
        }
    }
}

/// The fixed fallback endpoints (a developer workstation next to the
/// plant backends).
fn default_endpoints() -> Endpoints {
    Endpoints::new(
        Url::parse("http://localhost:3000/api").expect("default gateway URL"),
        Url::parse("http://localhost:3003/api/mariadb").expect("default mirror URL"),
    )
}
