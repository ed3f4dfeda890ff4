// ── Monitor abstraction ──
//
// Full lifecycle management for the status monitor: the per-device
// polling loops, the alarm simulator, and reactive access to the
// resulting readings. Start spawns the background tasks; shutdown
// cancels and joins every one of them, so no request fires afterwards.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::client::DeviceStatusClient;
use crate::config::MonitorConfig;
use crate::error::CoreError;
use crate::model::{Alarm, DeviceClass, Reading, Snapshot};
use crate::store::{AlarmSimulator, AlarmStore, StatusBoard};
use crate::stream::{AlarmListStream, ReadingStream};

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<MonitorInner>`. Owns the polling loops
/// and the alarm store; consumers observe readings through snapshot
/// accessors or subscriptions.
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    config: MonitorConfig,
    client: DeviceStatusClient,
    board: Arc<StatusBoard>,
    alarms: Arc<AlarmStore>,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Monitor {
    /// Create a new monitor from configuration. Does NOT poll -- call
    /// [`start()`](Self::start) to load initial data and spawn the
    /// background loops.
    pub fn new(config: MonitorConfig) -> Result<Self, CoreError> {
        let client = DeviceStatusClient::new(&config)?;
        let board = client.board();
        let alarms = Arc::new(AlarmStore::new(config.alarm_capacity));

        Ok(Self {
            inner: Arc::new(MonitorInner {
                config,
                client,
                board,
                alarms,
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        })
    }

    /// Access the monitor configuration.
    pub fn config(&self) -> &MonitorConfig {
        &self.inner.config
    }

    /// Access the underlying status client (one-shot fetches, sync).
    pub fn client(&self) -> &DeviceStatusClient {
        &self.inner.client
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Start monitoring.
    ///
    /// Performs one immediate fetch per configured device so consumers
    /// see data (or a degraded reading) right away, then spawns one
    /// polling task per device class plus the alarm simulator.
    pub async fn start(&self) {
        let config = &self.inner.config;

        for &device in &config.devices {
            self.inner.client.fetch_status(device).await;
        }

        let mut handles = self.inner.task_handles.lock().await;

        for &device in &config.devices {
            let client = self.inner.client.clone();
            let cancel = self.inner.cancel.clone();
            let interval = config.status_interval;
            handles.push(tokio::spawn(poll_task(client, device, interval, cancel)));
        }

        if config.simulate_alarms {
            let simulator = AlarmSimulator::new(config.alarm_probability);
            let store = Arc::clone(&self.inner.alarms);
            let cancel = self.inner.cancel.clone();
            let interval = config.alarm_interval;
            handles.push(tokio::spawn(alarm_task(simulator, store, interval, cancel)));
        }

        info!(
            devices = config.devices.len(),
            interval = ?config.status_interval,
            "monitor started"
        );
    }

    /// Stop monitoring.
    ///
    /// Cancels background tasks and joins them; once this returns, no
    /// further request leaves the process.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        debug!("monitor stopped");
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    /// The freshest reading for a device.
    pub fn latest(&self, device: DeviceClass) -> Reading {
        self.inner.board.latest(device)
    }

    /// The last snapshot that ever succeeded for a device.
    pub fn last_known(&self, device: DeviceClass) -> Option<Snapshot> {
        self.inner.board.last_known(device)
    }

    /// Current alarms, newest first.
    pub fn alarms(&self) -> Arc<Vec<Alarm>> {
        self.inner.alarms.snapshot()
    }

    /// The alarm store (raise, acknowledge).
    pub fn alarm_store(&self) -> &Arc<AlarmStore> {
        &self.inner.alarms
    }

    // ── Stream accessors ─────────────────────────────────────────────

    /// Subscribe to reading changes for a device.
    pub fn subscribe(&self, device: DeviceClass) -> ReadingStream {
        ReadingStream::new(self.inner.board.subscribe(device))
    }

    /// Subscribe to alarm list changes.
    pub fn subscribe_alarms(&self) -> AlarmListStream {
        AlarmListStream::new(self.inner.alarms.subscribe())
    }
}

// ── Background tasks ─────────────────────────────────────────────────

/// Periodically poll one device's status.
///
/// The fetch is awaited inline, so at most one request per device class
/// is ever in flight; a slow backend delays the next tick instead of
/// stacking requests.
async fn poll_task(
    client: DeviceStatusClient,
    device: DeviceClass,
    period: std::time::Duration,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                let reading = client.fetch_status(device).await;
                if !reading.is_fresh() {
                    warn!(%device, "poll produced a degraded reading");
                }
            }
        }
    }
}

/// Periodically roll the alarm simulator.
async fn alarm_task(
    simulator: AlarmSimulator,
    store: Arc<AlarmStore>,
    period: std::time::Duration,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                simulator.tick(&store);
            }
        }
    }
}
