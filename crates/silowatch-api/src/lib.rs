// silowatch-api: Async Rust client for the warehouse status backends
// (PLC gateway API + database mirror API).

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod bridge;
mod crane;
mod envelope;
mod transfer_car;

pub use client::{Endpoints, StatusClient};
pub use error::Error;
pub use transport::TransportConfig;
