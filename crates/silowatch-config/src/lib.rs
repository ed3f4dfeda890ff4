//! Shared configuration for the silowatch CLI.
//!
//! TOML file + environment loading, backend endpoint resolution from a
//! plant hostname, and translation to `silowatch_core::MonitorConfig`.
//! Endpoints are always resolved here and passed down explicitly --
//! nothing in the lower crates reads ambient state to find a backend.

use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use silowatch_core::{DeviceClass, Endpoints, MonitorConfig};

/// Port the PLC gateway API listens on.
pub const GATEWAY_PORT: u16 = 3000;
/// Port the database mirror API listens on.
pub const MIRROR_PORT: u16 = 3003;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub backend: Backend,

    #[serde(default)]
    pub polling: Polling,

    #[serde(default)]
    pub alarms: Alarms,
}

/// Where the two status backends live.
///
/// `host` is the usual knob: both base URLs derive from it using the
/// fixed plant ports. The full-URL overrides exist for port forwards
/// and test rigs.
#[derive(Debug, Deserialize, Serialize)]
pub struct Backend {
    /// Plant host serving both APIs (e.g. "192.168.131.50").
    #[serde(default = "default_host")]
    pub host: String,

    /// Full gateway base URL override.
    pub gateway: Option<String>,

    /// Full mirror base URL override.
    pub mirror: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            host: default_host(),
            gateway: None,
            mirror: None,
            timeout: default_timeout(),
        }
    }
}

fn default_host() -> String {
    "localhost".into()
}
fn default_timeout() -> u64 {
    10
}

/// Status polling behavior.
#[derive(Debug, Deserialize, Serialize)]
pub struct Polling {
    /// Seconds between status polls.
    #[serde(default = "default_status_interval")]
    pub status_interval: u64,

    /// Device classes to poll.
    #[serde(default = "all_devices")]
    pub devices: Vec<DeviceClass>,

    /// Default history depth.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for Polling {
    fn default() -> Self {
        Self {
            status_interval: default_status_interval(),
            devices: all_devices(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_status_interval() -> u64 {
    10
}
fn all_devices() -> Vec<DeviceClass> {
    DeviceClass::ALL.to_vec()
}
fn default_history_limit() -> usize {
    10
}

/// Alarm list and simulator behavior.
#[derive(Debug, Deserialize, Serialize)]
pub struct Alarms {
    /// Bounded alarm list capacity.
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Whether the local alarm simulator runs.
    #[serde(default = "default_simulate")]
    pub simulate: bool,

    /// Seconds between simulator ticks.
    #[serde(default = "default_alarm_interval")]
    pub interval: u64,

    /// Per-tick probability of raising one alarm (0.0 to 1.0).
    #[serde(default = "default_probability")]
    pub probability: f64,
}

impl Default for Alarms {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            simulate: default_simulate(),
            interval: default_alarm_interval(),
            probability: default_probability(),
        }
    }
}

fn default_capacity() -> usize {
    10
}
fn default_simulate() -> bool {
    true
}
fn default_alarm_interval() -> u64 {
    15
}
fn default_probability() -> f64 {
    0.1
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "silowatch", "silowatch").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("silowatch");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from a specific file + environment.
///
/// Environment variables use the `SILOWATCH_` prefix with `_`-separated
/// sections (`SILOWATCH_BACKEND_HOST`, `SILOWATCH_BACKEND_TIMEOUT`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SILOWATCH_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(&config_path(), cfg)
}

// ── Endpoint resolution ─────────────────────────────────────────────

/// Resolve the backend base URLs from a plant hostname.
///
/// `localhost`, `127.0.0.1`, and addresses on the plant subnet
/// (`192.168.131.0/24`) map onto the fixed API ports on that host.
/// Anything else falls back to localhost, so a stray hostname cannot
/// aim the monitor at an arbitrary machine.
pub fn resolve_endpoints(host: &str) -> Endpoints {
    let host = if is_known_host(host) { host } else { "localhost" };

    // These cannot fail for validated hosts.
    let gateway = Url::parse(&format!("http://{host}:{GATEWAY_PORT}/api"))
        .expect("gateway URL from validated host");
    let mirror = Url::parse(&format!("http://{host}:{MIRROR_PORT}/api/mariadb"))
        .expect("mirror URL from validated host");
    Endpoints::new(gateway, mirror)
}

fn is_known_host(host: &str) -> bool {
    if host == "localhost" {
        return true;
    }
    match host.parse::<Ipv4Addr>() {
        Ok(addr) => {
            addr.is_loopback() || matches!(addr.octets(), [192, 168, 131, _])
        }
        Err(_) => false,
    }
}

// ── Translation to MonitorConfig ────────────────────────────────────

/// Build a `MonitorConfig` from the loaded configuration.
///
/// Full-URL overrides win over hostname resolution, per base.
pub fn monitor_config(cfg: &Config) -> Result<MonitorConfig, ConfigError> {
    let resolved = resolve_endpoints(&cfg.backend.host);

    let gateway = match cfg.backend.gateway {
        Some(ref raw) => parse_base("backend.gateway", raw)?,
        None => resolved.gateway,
    };
    let mirror = match cfg.backend.mirror {
        Some(ref raw) => parse_base("backend.mirror", raw)?,
        None => resolved.mirror,
    };

    if !(0.0..=1.0).contains(&cfg.alarms.probability) {
        return Err(ConfigError::Validation {
            field: "alarms.probability".into(),
            reason: format!("expected 0.0 to 1.0, got {}", cfg.alarms.probability),
        });
    }

    if cfg.polling.devices.is_empty() {
        return Err(ConfigError::Validation {
            field: "polling.devices".into(),
            reason: "at least one device class is required".into(),
        });
    }

    Ok(MonitorConfig {
        endpoints: Endpoints::new(gateway, mirror),
        timeout: Duration::from_secs(cfg.backend.timeout),
        status_interval: Duration::from_secs(cfg.polling.status_interval),
        devices: cfg.polling.devices.clone(),
        alarm_capacity: cfg.alarms.capacity,
        simulate_alarms: cfg.alarms.simulate,
        alarm_interval: Duration::from_secs(cfg.alarms.interval),
        alarm_probability: cfg.alarms.probability,
        history_limit: cfg.polling.history_limit,
    })
}

fn parse_base(field: &str, raw: &str) -> Result<Url, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL: {raw}"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn known_hosts_resolve_to_their_own_ports() {
        let eps = resolve_endpoints("192.168.131.50");
        assert_eq!(eps.gateway.as_str(), "http://192.168.131.50:3000/api");
        assert_eq!(
            eps.mirror.as_str(),
            "http://192.168.131.50:3003/api/mariadb"
        );

        let eps = resolve_endpoints("localhost");
        assert_eq!(eps.gateway.as_str(), "http://localhost:3000/api");

        let eps = resolve_endpoints("127.0.0.1");
        assert_eq!(eps.mirror.as_str(), "http://127.0.0.1:3003/api/mariadb");
    }

    #[test]
    fn unknown_hosts_fall_back_to_localhost() {
        for host in ["example.com", "10.0.0.5", "192.168.130.50", "", "bad host"] {
            let eps = resolve_endpoints(host);
            assert_eq!(eps.gateway.as_str(), "http://localhost:3000/api", "{host}");
        }
    }

    #[test]
    fn defaults_produce_a_usable_monitor_config() {
        let cfg = Config::default();
        let monitor = monitor_config(&cfg).unwrap();

        assert_eq!(monitor.status_interval, Duration::from_secs(10));
        assert_eq!(monitor.devices, DeviceClass::ALL.to_vec());
        assert_eq!(monitor.alarm_capacity, 10);
        assert!(monitor.simulate_alarms);
    }

    #[test]
    fn full_url_overrides_win_per_base() {
        let cfg = Config {
            backend: Backend {
                host: "192.168.131.50".into(),
                gateway: Some("http://testrig:8080/api".into()),
                mirror: None,
                timeout: 10,
            },
            ..Config::default()
        };
        let monitor = monitor_config(&cfg).unwrap();

        assert_eq!(monitor.endpoints.gateway.as_str(), "http://testrig:8080/api");
        assert_eq!(
            monitor.endpoints.mirror.as_str(),
            "http://192.168.131.50:3003/api/mariadb"
        );
    }

    #[test]
    fn bad_override_and_bad_probability_are_rejected() {
        let cfg = Config {
            backend: Backend {
                gateway: Some("not a url".into()),
                ..Backend::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            monitor_config(&cfg),
            Err(ConfigError::Validation { field, .. }) if field == "backend.gateway"
        ));

        let cfg = Config {
            alarms: Alarms {
                probability: 1.5,
                ..Alarms::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            monitor_config(&cfg),
            Err(ConfigError::Validation { field, .. }) if field == "alarms.probability"
        ));
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config {
            backend: Backend {
                host: "192.168.131.7".into(),
                ..Backend::default()
            },
            ..Config::default()
        };
        save_config_to(&path, &cfg).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.backend.host, "192.168.131.7");
        assert_eq!(loaded.polling.devices, DeviceClass::ALL.to_vec());
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [backend]
            host = "192.168.131.60"

            [polling]
            status_interval = 5
            devices = ["bridge", "transfer-car"]

            [alarms]
            simulate = false
            "#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.backend.host, "192.168.131.60");
        assert_eq!(cfg.polling.status_interval, 5);
        assert_eq!(
            cfg.polling.devices,
            vec![DeviceClass::Bridge, DeviceClass::TransferCar]
        );
        assert!(!cfg.alarms.simulate);
        // Untouched sections keep their defaults.
        assert_eq!(cfg.alarms.capacity, 10);
    }
}
