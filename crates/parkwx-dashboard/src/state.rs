//! Dashboard state.
//!
//! `DashboardState` reads from the shared store and the blob credentials and
//! assembles the derived response bodies.

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;

use parkwx_core::{Alert, BlobStorageConfig, Reading};
use parkwx_store::{SharedStore, StoreResult};

use crate::types::{MonitoringMetrics, SystemStatus, WeatherAnalytics};

/// Read-side view over the store shared with the generator.
#[derive(Clone)]
pub struct DashboardState {
    store: SharedStore,
    blob: Arc<BlobStorageConfig>,
}

impl DashboardState {
    pub fn new(store: SharedStore, blob: BlobStorageConfig) -> Self {
        Self {
            store,
            blob: Arc::new(blob),
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn blob(&self) -> &BlobStorageConfig {
        &self.blob
    }

    /// Newest readings first, at most `limit`.
    pub fn recent_readings(&self, limit: usize) -> StoreResult<Vec<Reading>> {
        self.store.list_readings(limit)
    }

    pub fn latest_reading(&self) -> StoreResult<Option<Reading>> {
        self.store.latest_reading()
    }

    pub fn active_alerts(&self) -> StoreResult<Vec<Alert>> {
        self.store.list_active_alerts()
    }

    /// Analytics over the `window` most recent readings.
    pub fn collect_analytics(&self, window: usize) -> StoreResult<WeatherAnalytics> {
        let readings = self.store.list_readings(window)?;
        Ok(WeatherAnalytics::from_readings(&readings))
    }

    /// Operational status.
    ///
    /// `latestDataTimestamp` is the newest reading's timestamp, or the current
    /// time when nothing has been stored yet.
    pub fn collect_status(&self) -> StoreResult<SystemStatus> {
        let latest = self.store.latest_reading()?;
        let active_alerts_count = self.store.active_alert_count()?;

        Ok(SystemStatus {
            blob_storage_status: self.blob.status_label().to_string(),
            data_refresh_status: "active".to_string(),
            data_quality_status: "good".to_string(),
            latest_data_timestamp: latest.map_or_else(Utc::now, |r| r.timestamp),
            active_alerts_count,
            is_operational: true,
        })
    }

    /// Synthetic metrics with the real active alert count.
    pub fn collect_metrics<R: Rng + ?Sized>(&self, rng: &mut R) -> StoreResult<MonitoringMetrics> {
        let active_alerts = self.store.active_alert_count()?;
        Ok(MonitoringMetrics::sample(rng, active_alerts))
    }
}

impl std::fmt::Debug for DashboardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardState")
            .field("blob", &self.blob)
            .finish_non_exhaustive()
    }
}
