//! Recurring feed task.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use parkwx_core::{Alert, Reading};
use parkwx_store::SharedStore;
use parkwx_telemetry::Metrics;

use crate::config::GeneratorConfig;
use crate::error::GeneratorResult;
use crate::sink::BlobSink;
use crate::synth::{maybe_alert, random_reading};

/// What one successful tick stored.
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub reading: Reading,
    pub alert: Option<Alert>,
}

/// Synthetic feed writing into a shared store.
pub struct WeatherGenerator {
    store: SharedStore,
    config: GeneratorConfig,
    sink: Option<Arc<dyn BlobSink>>,
    rng: StdRng,
}

impl WeatherGenerator {
    pub fn new(store: SharedStore, config: GeneratorConfig) -> Self {
        Self {
            store,
            config,
            sink: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Mirror every stored reading to `sink`.
    pub fn with_sink(mut self, sink: Arc<dyn BlobSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Replace the entropy-seeded RNG (deterministic runs in tests).
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Run one tick: store a reading, mirror it, maybe store an alert.
    ///
    /// A reading failure skips the alert for this tick. Must be called from
    /// within a tokio runtime when a sink is attached.
    pub fn tick(&mut self) -> GeneratorResult<TickOutcome> {
        let now = Utc::now();

        let reading = self.store_reading(now).map_err(|e| {
            Metrics::tick_failed("reading");
            e
        })?;
        match self.store.reading_count() {
            Ok(stored) => Metrics::reading_generated(stored),
            Err(e) => warn!(error = %e, "Failed to count stored readings, gauge not updated"),
        }

        if let Some(sink) = &self.sink {
            spawn_upload(Arc::clone(sink), reading.clone());
        }

        let alert = self.store_alert(now).map_err(|e| {
            Metrics::tick_failed("alert");
            e
        })?;
        if let Some(alert) = &alert {
            Metrics::alert_generated(&alert.severity.to_string());
            info!(id = alert.id, title = %alert.title, severity = %alert.severity, "Alert raised");
        }

        debug!(
            id = reading.id,
            temperature = reading.temperature,
            location = %reading.location,
            "Tick complete"
        );
        Ok(TickOutcome { reading, alert })
    }

    fn store_reading(&mut self, now: DateTime<Utc>) -> GeneratorResult<Reading> {
        let reading = random_reading(&mut self.rng, self.config.watch_chance(), now);
        reading.validate()?;
        Ok(self.store.create_reading(reading)?)
    }

    fn store_alert(&mut self, now: DateTime<Utc>) -> GeneratorResult<Option<Alert>> {
        let Some(alert) = maybe_alert(&mut self.rng, self.config.alert_chance(), now) else {
            return Ok(None);
        };
        alert.validate()?;
        Ok(Some(self.store.create_alert(alert)?))
    }

    /// Tick every `interval` until `shutdown` is cancelled.
    ///
    /// The first tick fires one full period after start. Tick errors are
    /// logged and never end the loop.
    pub async fn run(mut self, shutdown: CancellationToken) {
        let period = self.config.interval();
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_ms = period.as_millis() as u64,
            blob_sink = self.sink.is_some(),
            "Weather generator started"
        );

        let mut ticks = 0u64;
        let mut failures = 0u64;
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!(ticks, failures, "Weather generator stopping");
                    break;
                }
                _ = interval.tick() => {
                    ticks += 1;
                    if let Err(e) = self.tick() {
                        failures += 1;
                        warn!(error = %e, tick = ticks, "Error generating weather data");
                    }
                }
            }
        }
    }
}

/// Hand a reading to the sink on its own task; failures are only logged.
fn spawn_upload(sink: Arc<dyn BlobSink>, reading: Reading) {
    tokio::spawn(async move {
        let id = reading.id;
        match sink.upload(reading).await {
            Ok(()) => Metrics::blob_upload(true),
            Err(e) => {
                Metrics::blob_upload(false);
                warn!(id, error = %e, "Blob upload failed, reading kept in memory only");
            }
        }
    });
}

impl std::fmt::Debug for WeatherGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherGenerator")
            .field("config", &self.config)
            .field("blob_sink", &self.sink.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeneratorError;
    use futures_util::future::BoxFuture;
    use parking_lot::Mutex;
    use parkwx_core::{NewAlert, NewReading, NewUser, RecordId, User};
    use parkwx_store::{MemStore, StoreError, StoreResult, WeatherStore};
    use std::time::Duration;

    /// Store whose writes always fail.
    struct FailingStore;

    impl WeatherStore for FailingStore {
        fn create_user(&self, _: NewUser) -> StoreResult<User> {
            Err(StoreError::Unavailable("down".to_string()))
        }
        fn get_user(&self, _: RecordId) -> StoreResult<Option<User>> {
            Ok(None)
        }
        fn get_user_by_username(&self, _: &str) -> StoreResult<Option<User>> {
            Ok(None)
        }
        fn create_reading(&self, _: NewReading) -> StoreResult<Reading> {
            Err(StoreError::Unavailable("down".to_string()))
        }
        fn list_readings(&self, _: usize) -> StoreResult<Vec<Reading>> {
            Ok(Vec::new())
        }
        fn latest_reading(&self) -> StoreResult<Option<Reading>> {
            Ok(None)
        }
        fn reading_count(&self) -> StoreResult<usize> {
            Ok(0)
        }
        fn create_alert(&self, _: NewAlert) -> StoreResult<Alert> {
            Err(StoreError::Unavailable("down".to_string()))
        }
        fn list_active_alerts(&self) -> StoreResult<Vec<Alert>> {
            Ok(Vec::new())
        }
        fn deactivate_alert(&self, _: RecordId) -> StoreResult<()> {
            Ok(())
        }
    }

    /// In-memory store whose count query fails.
    struct UncountableStore(MemStore);

    impl WeatherStore for UncountableStore {
        fn create_user(&self, user: NewUser) -> StoreResult<User> {
            self.0.create_user(user)
        }
        fn get_user(&self, id: RecordId) -> StoreResult<Option<User>> {
            self.0.get_user(id)
        }
        fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
            self.0.get_user_by_username(username)
        }
        fn create_reading(&self, reading: NewReading) -> StoreResult<Reading> {
            self.0.create_reading(reading)
        }
        fn list_readings(&self, limit: usize) -> StoreResult<Vec<Reading>> {
            self.0.list_readings(limit)
        }
        fn latest_reading(&self) -> StoreResult<Option<Reading>> {
            self.0.latest_reading()
        }
        fn reading_count(&self) -> StoreResult<usize> {
            Err(StoreError::Unavailable("count timed out".to_string()))
        }
        fn create_alert(&self, alert: NewAlert) -> StoreResult<Alert> {
            self.0.create_alert(alert)
        }
        fn list_active_alerts(&self) -> StoreResult<Vec<Alert>> {
            self.0.list_active_alerts()
        }
        fn deactivate_alert(&self, id: RecordId) -> StoreResult<()> {
            self.0.deactivate_alert(id)
        }
    }

    /// Sink that records uploaded ids, optionally failing.
    #[derive(Default)]
    struct RecordingSink {
        uploaded: Mutex<Vec<RecordId>>,
        fail: bool,
    }

    impl BlobSink for RecordingSink {
        fn upload(&self, reading: Reading) -> BoxFuture<'_, GeneratorResult<()>> {
            Box::pin(async move {
                self.uploaded.lock().push(reading.id);
                if self.fail {
                    Err(GeneratorError::Sink("unreachable".to_string()))
                } else {
                    Ok(())
                }
            })
        }
    }

    fn config(alert_probability: f64) -> GeneratorConfig {
        GeneratorConfig {
            interval_ms: 10,
            alert_probability,
            ..Default::default()
        }
    }

    fn generator(store: SharedStore, alert_probability: f64) -> WeatherGenerator {
        WeatherGenerator::new(store, config(alert_probability)).with_rng(StdRng::seed_from_u64(1))
    }

    #[tokio::test]
    async fn test_tick_stores_reading() {
        let store: SharedStore = Arc::new(MemStore::new());
        let mut gen = generator(store.clone(), 0.0);

        let outcome = tokio_test::assert_ok!(gen.tick());
        assert_eq!(outcome.reading.id, 1);
        assert!(outcome.alert.is_none());
        assert_eq!(store.latest_reading().unwrap(), Some(outcome.reading));
        assert!(store.list_active_alerts().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tick_raises_alert() {
        let store: SharedStore = Arc::new(MemStore::new());
        let mut gen = generator(store.clone(), 1.0);

        let outcome = gen.tick().unwrap();
        let alert = outcome.alert.unwrap();
        assert!(alert.is_active);
        assert_eq!(store.list_active_alerts().unwrap(), vec![alert]);
    }

    #[tokio::test]
    async fn test_tick_failure_is_reported() {
        let store: SharedStore = Arc::new(FailingStore);
        let mut gen = generator(store, 1.0);
        assert!(matches!(gen.tick(), Err(GeneratorError::Store(_))));
        // The next tick is unaffected by the previous failure.
        assert!(matches!(gen.tick(), Err(GeneratorError::Store(_))));
    }

    #[tokio::test]
    async fn test_count_failure_does_not_fail_tick() {
        let store = Arc::new(UncountableStore(MemStore::new()));
        let mut gen = generator(store.clone(), 1.0);

        let outcome = tokio_test::assert_ok!(gen.tick());
        assert!(outcome.alert.is_some());
        assert_eq!(store.0.latest_reading().unwrap(), Some(outcome.reading));
    }

    #[tokio::test]
    async fn test_sink_receives_reading() {
        let store: SharedStore = Arc::new(MemStore::new());
        let sink = Arc::new(RecordingSink::default());
        let mut gen = generator(store, 0.0).with_sink(sink.clone());

        let outcome = gen.tick().unwrap();
        for _ in 0..50 {
            if !sink.uploaded.lock().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(*sink.uploaded.lock(), vec![outcome.reading.id]);
    }

    #[tokio::test]
    async fn test_sink_failure_does_not_fail_tick() {
        let store: SharedStore = Arc::new(MemStore::new());
        let sink = Arc::new(RecordingSink {
            fail: true,
            ..Default::default()
        });
        let mut gen = generator(store.clone(), 0.0).with_sink(sink);

        assert!(gen.tick().is_ok());
        assert!(gen.tick().is_ok());
        assert_eq!(store.reading_count().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_run_ticks_until_cancelled() {
        let store: SharedStore = Arc::new(MemStore::new());
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(generator(store.clone(), 0.5).run(shutdown.clone()));

        tokio::time::sleep(Duration::from_millis(100)).await;
        shutdown.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("generator should stop after cancel")
            .unwrap();

        let count = store.reading_count().unwrap();
        assert!(count >= 1);

        // Nothing is written after shutdown.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(store.reading_count().unwrap(), count);
    }

    #[tokio::test]
    async fn test_run_survives_failing_store() {
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(generator(Arc::new(FailingStore), 1.0).run(shutdown.clone()));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(!handle.is_finished());

        shutdown.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("generator should stop after cancel")
            .unwrap();
    }
}
