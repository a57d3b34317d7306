//! In-memory store.
//!
//! Each collection sits behind its own `RwLock`; no operation touches more
//! than one collection, so there is no cross-collection locking order to
//! worry about.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, trace};

use parkwx_core::{Alert, NewAlert, NewReading, NewUser, Reading, RecordId, User};

use crate::error::StoreResult;
use crate::store::WeatherStore;

/// Maximum number of readings kept before the oldest is evicted.
pub const DEFAULT_RETENTION: usize = 1000;

/// Id-keyed container with its own sequence.
#[derive(Debug)]
struct Collection<T> {
    /// Next id to hand out. Ids start at 1 and never repeat.
    next_id: RecordId,
    records: BTreeMap<RecordId, T>,
}

impl<T: Clone> Collection<T> {
    fn new() -> Self {
        Self {
            next_id: 1,
            records: BTreeMap::new(),
        }
    }

    /// Assign the next id, build the record, store it, return a copy.
    fn insert_with(&mut self, build: impl FnOnce(RecordId) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let record = build(id);
        self.records.insert(id, record.clone());
        record
    }
}

/// Newest timestamp first; equal timestamps fall back to newest id first.
fn newest_first(a: &Reading, b: &Reading) -> Ordering {
    b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id))
}

/// Process-lifetime in-memory store.
pub struct MemStore {
    users: RwLock<Collection<User>>,
    readings: RwLock<Collection<Reading>>,
    alerts: RwLock<Collection<Alert>>,
    retention: usize,
}

impl MemStore {
    /// Create an empty store with the default retention ceiling.
    pub fn new() -> Self {
        Self::with_retention(DEFAULT_RETENTION)
    }

    /// Create an empty store keeping at most `retention` readings (min 1).
    pub fn with_retention(retention: usize) -> Self {
        Self {
            users: RwLock::new(Collection::new()),
            readings: RwLock::new(Collection::new()),
            alerts: RwLock::new(Collection::new()),
            retention: retention.max(1),
        }
    }

    pub fn retention(&self) -> usize {
        self.retention
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherStore for MemStore {
    fn create_user(&self, user: NewUser) -> StoreResult<User> {
        user.validate()?;
        Ok(self.users.write().insert_with(|id| user.into_user(id)))
    }

    fn get_user(&self, id: RecordId) -> StoreResult<Option<User>> {
        Ok(self.users.read().records.get(&id).cloned())
    }

    fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .read()
            .records
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    fn create_reading(&self, reading: NewReading) -> StoreResult<Reading> {
        reading.validate()?;
        let now = Utc::now();

        let mut readings = self.readings.write();
        let stored = readings.insert_with(|id| reading.into_reading(id, now));

        // One insert can only push the count one past the ceiling.
        if readings.records.len() > self.retention {
            if let Some((evicted, _)) = readings.records.pop_first() {
                trace!(evicted_id = evicted, "Evicted oldest reading");
            }
        }

        debug!(
            id = stored.id,
            location = %stored.location,
            status = %stored.status,
            "Reading stored"
        );
        Ok(stored)
    }

    fn list_readings(&self, limit: usize) -> StoreResult<Vec<Reading>> {
        let mut readings: Vec<Reading> = self.readings.read().records.values().cloned().collect();
        readings.sort_by(newest_first);
        readings.truncate(limit);
        Ok(readings)
    }

    fn latest_reading(&self) -> StoreResult<Option<Reading>> {
        Ok(self
            .readings
            .read()
            .records
            .values()
            .min_by(|a, b| newest_first(a, b))
            .cloned())
    }

    fn reading_count(&self) -> StoreResult<usize> {
        Ok(self.readings.read().records.len())
    }

    fn create_alert(&self, alert: NewAlert) -> StoreResult<Alert> {
        alert.validate()?;
        let now = Utc::now();
        let stored = self.alerts.write().insert_with(|id| alert.into_alert(id, now));
        debug!(
            id = stored.id,
            severity = %stored.severity,
            title = %stored.title,
            "Alert stored"
        );
        Ok(stored)
    }

    fn list_active_alerts(&self) -> StoreResult<Vec<Alert>> {
        let mut alerts: Vec<Alert> = self
            .alerts
            .read()
            .records
            .values()
            .filter(|a| a.is_active)
            .cloned()
            .collect();
        alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(alerts)
    }

    fn active_alert_count(&self) -> StoreResult<usize> {
        Ok(self
            .alerts
            .read()
            .records
            .values()
            .filter(|a| a.is_active)
            .count())
    }

    fn deactivate_alert(&self, id: RecordId) -> StoreResult<()> {
        if let Some(alert) = self.alerts.write().records.get_mut(&id) {
            alert.is_active = false;
            debug!(id, "Alert deactivated");
        }
        Ok(())
    }
}

impl std::fmt::Debug for MemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemStore")
            .field("users", &self.users.read().records.len())
            .field("readings", &self.readings.read().records.len())
            .field("alerts", &self.alerts.read().records.len())
            .field("retention", &self.retention)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration};
    use parkwx_core::{AlertSeverity, ReadingStatus, WindDirection, ALERT_TEMPLATES};

    fn reading_at(timestamp: Option<DateTime<Utc>>, temperature: f64) -> NewReading {
        NewReading {
            timestamp,
            temperature,
            humidity: 50,
            wind_speed: 4.2,
            wind_direction: WindDirection::North,
            visibility: 10.0,
            pressure: 30.1,
            conditions: "Clear".to_string(),
            status: None,
            location: None,
        }
    }

    fn alert_at(timestamp: DateTime<Utc>) -> NewAlert {
        ALERT_TEMPLATES[0].instantiate(timestamp)
    }

    #[test]
    fn test_reading_ids_increase_by_one() {
        let store = MemStore::new();
        let ids: Vec<RecordId> = (0..25)
            .map(|_| store.create_reading(reading_at(None, 70.0)).unwrap().id)
            .collect();
        for pair in ids.windows(2) {
            assert_eq!(pair[1], pair[0] + 1);
        }
        assert_eq!(ids[0], 1);
    }

    #[test]
    fn test_retention_evicts_smallest_id() {
        let store = MemStore::new();
        for _ in 0..1001 {
            store.create_reading(reading_at(None, 70.0)).unwrap();
        }

        let readings = store.list_readings(1001).unwrap();
        assert_eq!(readings.len(), 1000);
        assert!(readings.iter().all(|r| r.id != 1));
        assert_eq!(store.reading_count().unwrap(), 1000);
    }

    #[test]
    fn test_eviction_uses_id_not_timestamp() {
        let store = MemStore::with_retention(2);
        let base = Utc::now();
        // id 1 carries the newest timestamp, yet it is still the one evicted.
        store.create_reading(reading_at(Some(base), 70.0)).unwrap();
        store
            .create_reading(reading_at(Some(base - Duration::hours(2)), 71.0))
            .unwrap();
        store
            .create_reading(reading_at(Some(base - Duration::hours(1)), 72.0))
            .unwrap();

        let ids: Vec<RecordId> = store.list_readings(10).unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_latest_reading() {
        let store = MemStore::new();
        assert!(store.latest_reading().unwrap().is_none());

        let base = Utc::now();
        let first = store.create_reading(reading_at(Some(base), 70.0)).unwrap();
        assert_eq!(store.latest_reading().unwrap(), Some(first));

        let second = store
            .create_reading(reading_at(Some(base + Duration::seconds(4)), 71.0))
            .unwrap();
        assert_eq!(store.latest_reading().unwrap(), Some(second));
    }

    #[test]
    fn test_latest_ignores_insertion_order() {
        let store = MemStore::new();
        let base = Utc::now();
        let newest = store.create_reading(reading_at(Some(base), 70.0)).unwrap();
        store
            .create_reading(reading_at(Some(base - Duration::minutes(1)), 71.0))
            .unwrap();
        assert_eq!(store.latest_reading().unwrap().unwrap().id, newest.id);
    }

    #[test]
    fn test_list_readings_sorted_and_limited() {
        let store = MemStore::new();
        let base = Utc::now();
        for offset in [3, 1, 4, 0, 2] {
            store
                .create_reading(reading_at(Some(base + Duration::seconds(offset)), 70.0))
                .unwrap();
        }

        let readings = store.list_readings(3).unwrap();
        assert_eq!(readings.len(), 3);
        assert!(readings.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
        assert_eq!(readings[0].timestamp, base + Duration::seconds(4));
    }

    #[test]
    fn test_missing_timestamp_is_stamped() {
        let store = MemStore::new();
        let before = Utc::now();
        let reading = store.create_reading(reading_at(None, 70.0)).unwrap();
        assert!(reading.timestamp >= before);
        assert_eq!(reading.status, ReadingStatus::Normal);
        assert_eq!(reading.location, "Main Plaza");
    }

    #[test]
    fn test_invalid_reading_rejected_without_consuming_id() {
        let store = MemStore::new();
        let mut bad = reading_at(None, 70.0);
        bad.humidity = -1;
        assert!(store.create_reading(bad).is_err());
        assert_eq!(store.reading_count().unwrap(), 0);

        let ok = store.create_reading(reading_at(None, 70.0)).unwrap();
        assert_eq!(ok.id, 1);
    }

    #[test]
    fn test_active_alerts_sorted_newest_first() {
        let store = MemStore::new();
        let base = Utc::now();
        store.create_alert(alert_at(base - Duration::minutes(2))).unwrap();
        store.create_alert(alert_at(base)).unwrap();
        store.create_alert(alert_at(base - Duration::minutes(1))).unwrap();

        let ids: Vec<RecordId> = store
            .list_active_alerts()
            .unwrap()
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_deactivate_alert() {
        let store = MemStore::new();
        let a = store.create_alert(alert_at(Utc::now())).unwrap();
        let b = store.create_alert(alert_at(Utc::now())).unwrap();

        store.deactivate_alert(a.id).unwrap();
        let active = store.list_active_alerts().unwrap();
        assert!(active.iter().all(|alert| alert.id != a.id));
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, b.id);
        assert_eq!(store.active_alert_count().unwrap(), 1);
    }

    #[test]
    fn test_deactivate_unknown_alert_is_noop() {
        let store = MemStore::new();
        store.create_alert(alert_at(Utc::now())).unwrap();
        let before = store.list_active_alerts().unwrap();

        assert!(store.deactivate_alert(999).is_ok());
        assert_eq!(store.list_active_alerts().unwrap(), before);
    }

    #[test]
    fn test_alert_defaults() {
        let store = MemStore::new();
        let alert = store
            .create_alert(NewAlert {
                alert_type: "system".to_string(),
                title: "Check".to_string(),
                message: "Sensor sweep".to_string(),
                severity: AlertSeverity::Info,
                timestamp: None,
                is_active: None,
            })
            .unwrap();
        assert!(alert.is_active);
        assert_eq!(alert.id, 1);
    }

    #[test]
    fn test_users() {
        let store = MemStore::new();
        assert!(store.get_user(1).unwrap().is_none());

        let ops = store.create_user(NewUser::new("ops", "pw")).unwrap();
        let guest = store.create_user(NewUser::new("guest", "pw")).unwrap();
        assert_eq!(guest.id, ops.id + 1);

        assert_eq!(store.get_user(ops.id).unwrap(), Some(ops.clone()));
        assert_eq!(store.get_user_by_username("guest").unwrap(), Some(guest));
        assert!(store.get_user_by_username("nobody").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_username_returns_first() {
        let store = MemStore::new();
        let first = store.create_user(NewUser::new("ops", "a")).unwrap();
        store.create_user(NewUser::new("ops", "b")).unwrap();
        assert_eq!(store.get_user_by_username("ops").unwrap(), Some(first));
    }

    #[test]
    fn test_collections_have_independent_sequences() {
        let store = MemStore::new();
        store.create_reading(reading_at(None, 70.0)).unwrap();
        store.create_reading(reading_at(None, 70.0)).unwrap();
        let alert = store.create_alert(alert_at(Utc::now())).unwrap();
        let user = store.create_user(NewUser::new("ops", "pw")).unwrap();
        assert_eq!(alert.id, 1);
        assert_eq!(user.id, 1);
    }

    #[test]
    fn test_concurrent_inserts_keep_ids_contiguous() {
        let store = std::sync::Arc::new(MemStore::new());
        let per_thread = 50;
        let threads = 8;

        let mut ids: Vec<RecordId> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..threads)
                .map(|_| {
                    let store = &store;
                    s.spawn(move || {
                        (0..per_thread)
                            .map(|_| store.create_reading(reading_at(None, 72.0)).unwrap().id)
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });

        ids.sort_unstable();
        let expected: Vec<RecordId> = (1..=(threads * per_thread) as RecordId).collect();
        assert_eq!(ids, expected);
        assert_eq!(store.reading_count().unwrap(), threads * per_thread);
    }
}
