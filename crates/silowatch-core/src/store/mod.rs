// ── Reactive state stores ──
//
// Latest readings per device and the bounded alarm list. Mutations are
// broadcast to subscribers via `watch` channels.

mod alarms;
mod board;

pub use alarms::{AlarmSimulator, AlarmStore};
pub use board::StatusBoard;
