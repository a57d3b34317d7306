//! Record store for parkwx.
//!
//! Holds readings, alerts, and users behind the `WeatherStore` trait.
//! `MemStore` is the in-memory implementation used by the server; it keeps
//! each collection under its own lock and caps readings at a retention
//! ceiling, evicting the oldest by id.

pub mod error;
pub mod memory;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::{MemStore, DEFAULT_RETENTION};
pub use store::{SharedStore, WeatherStore};
