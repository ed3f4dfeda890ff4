// ── Bounded alarm store + local simulator ──
//
// Newest-first list with a fixed capacity: raising an alarm past
// capacity evicts the oldest entry. Acknowledgement is the only other
// mutation, and it is monotonic (false -> true, never back).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rand::Rng;
use tokio::sync::watch;
use tracing::debug;

use crate::model::{Alarm, Severity};

/// Bounded, newest-first alarm list with change notification.
pub struct AlarmStore {
    inner: Mutex<VecDeque<Alarm>>,
    capacity: usize,
    snapshot: watch::Sender<Arc<Vec<Alarm>>>,
}

impl AlarmStore {
    /// Create a store holding at most `capacity` alarms.
    pub fn new(capacity: usize) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            snapshot,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insert a new alarm at the front, evicting the oldest entry once
    /// at capacity. Returns the evicted alarm, if any.
    pub fn raise(&self, alarm: Alarm) -> Option<Alarm> {
        let evicted = {
            let mut list = self.inner.lock().expect("alarm lock poisoned");
            list.push_front(alarm);
            if list.len() > self.capacity {
                list.pop_back()
            } else {
                None
            }
        };
        self.rebuild_snapshot();
        evicted
    }

    /// Mark an alarm acknowledged. Idempotent; an absent id is a no-op
    /// (the alarm may already have been evicted). Returns whether the
    /// id was found.
    pub fn acknowledge(&self, id: &str) -> bool {
        let found = {
            let mut list = self.inner.lock().expect("alarm lock poisoned");
            match list.iter_mut().find(|a| a.id == id) {
                Some(alarm) => {
                    alarm.acknowledged = true;
                    true
                }
                None => false,
            }
        };
        if found {
            self.rebuild_snapshot();
        }
        found
    }

    /// Current alarms, newest first (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Vec<Alarm>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to list changes via a `watch::Receiver`.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Alarm>>> {
        self.snapshot.subscribe()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("alarm lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many alarms are still unacknowledged.
    pub fn unacknowledged(&self) -> usize {
        self.inner
            .lock()
            .expect("alarm lock poisoned")
            .iter()
            .filter(|a| !a.acknowledged)
            .count()
    }

    fn rebuild_snapshot(&self) {
        let values: Vec<Alarm> = self
            .inner
            .lock()
            .expect("alarm lock poisoned")
            .iter()
            .cloned()
            .collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }
}

// ── Simulator ────────────────────────────────────────────────────────

/// One catalog entry the simulator can draw.
struct CatalogEntry {
    device_id: &'static str,
    device_name: &'static str,
}

const DEVICES: [CatalogEntry; 5] = [
    CatalogEntry { device_id: "TRANS-001", device_name: "Stacker crane 1" },
    CatalogEntry { device_id: "TRANS-002", device_name: "Stacker crane 2" },
    CatalogEntry { device_id: "TRANSF-001", device_name: "Transfer car" },
    CatalogEntry { device_id: "PUENTE-001", device_name: "Transfer bridge" },
    CatalogEntry { device_id: "ELEV-001", device_name: "Elevator" },
];

const MESSAGES: [(&str, Severity); 5] = [
    ("Speed outside nominal range", Severity::Warning),
    ("Momentary communication loss", Severity::Info),
    ("Proximity sensor triggered unexpectedly", Severity::Warning),
    ("Error in operation sequence", Severity::Critical),
    ("Motor temperature high", Severity::Warning),
];

/// Synthesizes alarm arrivals while no real alarm feed exists for most
/// devices. Each tick fires with a fixed probability and draws one
/// (device, message) pair uniformly from the catalog.
pub struct AlarmSimulator {
    probability: f64,
}

impl AlarmSimulator {
    pub fn new(probability: f64) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
        }
    }

    /// Roll the dice once; on a hit, raise one synthesized alarm.
    pub fn tick(&self, store: &AlarmStore) -> Option<Alarm> {
        let mut rng = rand::rng();
        if rng.random::<f64>() >= self.probability {
            return None;
        }

        let device = &DEVICES[rng.random_range(0..DEVICES.len())];
        let (message, severity) = MESSAGES[rng.random_range(0..MESSAGES.len())];

        let alarm = Alarm::new(device.device_id, device.device_name, message, severity, Utc::now());
        debug!(id = %alarm.id, device = device.device_id, "simulated alarm raised");
        store.raise(alarm.clone());
        Some(alarm)
    }
}
