// ── Latest-reading board ──
//
// One slot per device class holding the freshest Reading, plus the
// last snapshot that ever succeeded (used to degrade to Stale instead
// of fabricating data). Slots are created up front for every class, so
// lookups never allocate channels.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::watch;

use crate::model::{DeviceClass, Reading, Snapshot};

/// Thread-safe board of the freshest reading per device class.
///
/// Each successful fetch supersedes the previous snapshot; a failed
/// fetch publishes `Stale` (carrying the last good snapshot) or
/// `Unavailable` when nothing ever succeeded.
pub struct StatusBoard {
    slots: DashMap<DeviceClass, watch::Sender<Reading>>,
    last_known: DashMap<DeviceClass, Snapshot>,
    last_poll: DashMap<DeviceClass, DateTime<Utc>>,
}

impl StatusBoard {
    pub fn new() -> Self {
        let slots = DashMap::new();
        for device in DeviceClass::ALL {
            let (tx, _) = watch::channel(Reading::Unavailable);
            slots.insert(device, tx);
        }
        Self {
            slots,
            last_known: DashMap::new(),
            last_poll: DashMap::new(),
        }
    }

    /// Record a successful snapshot as last-known-good.
    pub(crate) fn record_success(&self, snapshot: Snapshot) {
        self.last_known.insert(snapshot.device, snapshot);
    }

    /// Publish a reading to this device's slot and stamp the poll time.
    pub(crate) fn publish(&self, device: DeviceClass, reading: Reading) {
        self.last_poll.insert(device, Utc::now());
        if let Some(tx) = self.slots.get(&device) {
            // `send_modify` updates unconditionally, even with zero receivers.
            tx.send_modify(|slot| *slot = reading);
        }
    }

    /// The reading to publish after a failed fetch: `Stale` around the
    /// last good snapshot, or `Unavailable` if there never was one.
    pub(crate) fn degraded(&self, device: DeviceClass) -> Reading {
        match self.last_known.get(&device) {
            Some(snap) => Reading::Stale(snap.clone()),
            None => Reading::Unavailable,
        }
    }

    /// The freshest reading for a device.
    pub fn latest(&self, device: DeviceClass) -> Reading {
        self.slots
            .get(&device)
            .map_or(Reading::Unavailable, |tx| tx.borrow().clone())
    }

    /// The last snapshot that ever succeeded for a device.
    pub fn last_known(&self, device: DeviceClass) -> Option<Snapshot> {
        self.last_known.get(&device).map(|s| s.clone())
    }

    /// When this device was last polled (successfully or not).
    pub fn last_polled(&self, device: DeviceClass) -> Option<DateTime<Utc>> {
        self.last_poll.get(&device).map(|t| *t)
    }

    /// Subscribe to reading changes for a device.
    pub fn subscribe(&self, device: DeviceClass) -> watch::Receiver<Reading> {
        self.slots
            .get(&device)
            .map(|tx| tx.subscribe())
            .expect("board slots cover every device class")
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Origin, Reading, Snapshot};

    #[test]
    fn starts_unavailable_for_every_class() {
        let board = StatusBoard::new();
        for device in DeviceClass::ALL {
            assert_eq!(board.latest(device), Reading::Unavailable);
            assert!(board.last_known(device).is_none());
        }
    }

    #[test]
    fn degraded_is_stale_after_a_success() {
        let board = StatusBoard::new();
        let snap = Snapshot::placeholder(DeviceClass::Bridge, Utc::now());

        assert_eq!(board.degraded(DeviceClass::Bridge), Reading::Unavailable);

        board.record_success(snap.clone());
        assert_eq!(board.degraded(DeviceClass::Bridge), Reading::Stale(snap));
        // Other classes are unaffected.
        assert_eq!(board.degraded(DeviceClass::Crane1), Reading::Unavailable);
    }

    #[test]
    fn publish_supersedes_and_notifies() {
        let board = StatusBoard::new();
        let mut rx = board.subscribe(DeviceClass::Crane1);

        let snap = Snapshot::placeholder(DeviceClass::Crane1, Utc::now());
        board.publish(DeviceClass::Crane1, Reading::Fresh(snap.clone()));

        assert!(rx.has_changed().unwrap());
        assert_eq!(board.latest(DeviceClass::Crane1), Reading::Fresh(snap));
        assert_eq!(
            rx.borrow_and_update().snapshot().map(|s| s.origin),
            Some(Origin::Placeholder)
        );
        assert!(board.last_polled(DeviceClass::Crane1).is_some());
    }
}
