//! Core domain types for the parkwx weather dashboard.
//!
//! This crate provides the records shared by every other crate:
//! - `Reading`, `NewReading`: one synthetic weather observation
//! - `Alert`, `NewAlert`: operator-facing notifications with an active flag
//! - `User`, `NewUser`: account records kept for store completeness
//! - Fixed catalogs (park locations, sky conditions, alert templates)
//! - `BlobStorageConfig`: optional external storage credentials

pub mod alert;
pub mod blob;
pub mod catalog;
pub mod error;
pub mod reading;
pub mod user;

pub use alert::{Alert, AlertSeverity, AlertTemplate, NewAlert, ALERT_TEMPLATES};
pub use blob::BlobStorageConfig;
pub use catalog::{CONDITIONS, DEFAULT_LOCATION, LOCATIONS};
pub use error::{CoreError, Result};
pub use reading::{round_to, NewReading, Reading, ReadingStatus, WindDirection};
pub use user::{NewUser, User};

/// Sequential record identifier assigned by the store.
pub type RecordId = u64;
