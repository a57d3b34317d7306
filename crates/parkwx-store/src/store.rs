//! Storage contract.

use std::sync::Arc;

use parkwx_core::{Alert, NewAlert, NewReading, NewUser, Reading, RecordId, User};

use crate::error::StoreResult;

/// Read/write contract over readings, alerts, and users.
///
/// Every method returns a `StoreResult` so a durable backend can report
/// I/O failures. Lookups signal absence with `None`, never with an error.
pub trait WeatherStore: Send + Sync {
    /// Insert a user. Username uniqueness is the caller's concern.
    fn create_user(&self, user: NewUser) -> StoreResult<User>;

    fn get_user(&self, id: RecordId) -> StoreResult<Option<User>>;

    /// First user (in id order) with this exact username.
    fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Insert a reading, evicting the oldest by id past the retention ceiling.
    fn create_reading(&self, reading: NewReading) -> StoreResult<Reading>;

    /// Readings sorted newest-first by timestamp, at most `limit`.
    fn list_readings(&self, limit: usize) -> StoreResult<Vec<Reading>>;

    /// Reading with the greatest timestamp.
    fn latest_reading(&self) -> StoreResult<Option<Reading>>;

    fn reading_count(&self) -> StoreResult<usize>;

    fn create_alert(&self, alert: NewAlert) -> StoreResult<Alert>;

    /// Active alerts sorted newest-first by timestamp.
    fn list_active_alerts(&self) -> StoreResult<Vec<Alert>>;

    fn active_alert_count(&self) -> StoreResult<usize> {
        Ok(self.list_active_alerts()?.len())
    }

    /// Clear the active flag. Unknown ids are ignored.
    fn deactivate_alert(&self, id: RecordId) -> StoreResult<()>;
}

/// Store handle shared between the feed and the HTTP layer.
pub type SharedStore = Arc<dyn WeatherStore>;
