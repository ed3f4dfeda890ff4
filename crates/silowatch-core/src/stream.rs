// ── Reactive subscription streams ──
//
// Subscription types for consuming board and alarm changes.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::model::{Alarm, Reading};

/// A subscription to one device's reading slot.
///
/// Provides both point-in-time access and reactive change notification
/// via `changed()` or by converting to a `Stream`.
pub struct ReadingStream {
    receiver: watch::Receiver<Reading>,
}

impl ReadingStream {
    pub(crate) fn new(receiver: watch::Receiver<Reading>) -> Self {
        Self { receiver }
    }

    /// The latest reading.
    pub fn latest(&self) -> Reading {
        self.receiver.borrow().clone()
    }

    /// Wait for the next published reading.
    /// Returns `None` if the board has been dropped.
    pub async fn changed(&mut self) -> Option<Reading> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> WatchStream<Reading> {
        WatchStream::new(self.receiver)
    }
}

/// A subscription to the alarm list.
pub struct AlarmListStream {
    receiver: watch::Receiver<Arc<Vec<Alarm>>>,
}

impl AlarmListStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<Vec<Alarm>>>) -> Self {
        Self { receiver }
    }

    /// The latest alarm list, newest first.
    pub fn latest(&self) -> Arc<Vec<Alarm>> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next list change, returning the new list.
    /// Returns `None` if the store has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<Vec<Alarm>>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> WatchStream<Arc<Vec<Alarm>>> {
        WatchStream::new(self.receiver)
    }
}
