//! Prometheus metrics for parkwx.
//!
//! Covers:
//! - Synthetic feed output (readings, alerts)
//! - Feed tick failures by stage
//! - Blob sink upload outcomes
//! - HTTP endpoint failures
//!
//! # Panics
//!
//! Metric registration uses `unwrap()`. A failure means duplicate metric
//! names, a programming error that should crash at first use rather than
//! silently drop data. Registration happens once per process.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_int_counter, register_int_gauge, CounterVec, Encoder,
    IntCounter, IntGauge, TextEncoder,
};

use crate::error::TelemetryResult;

/// Total readings produced by the feed and accepted by the store.
pub static READINGS_GENERATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "parkwx_readings_generated_total",
        "Total synthetic readings stored"
    )
    .unwrap()
});

/// Total alerts produced by the feed, by severity.
pub static ALERTS_GENERATED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "parkwx_alerts_generated_total",
        "Total synthetic alerts stored",
        &["severity"]
    )
    .unwrap()
});

/// Feed ticks that failed at some stage.
/// Labels: stage (reading/alert)
pub static TICK_FAILURES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "parkwx_tick_failures_total",
        "Total feed tick failures",
        &["stage"]
    )
    .unwrap()
});

/// Blob sink uploads.
/// Labels: outcome (ok/error)
pub static BLOB_UPLOADS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "parkwx_blob_uploads_total",
        "Total blob sink uploads",
        &["outcome"]
    )
    .unwrap()
});

/// Readings currently held by the store.
pub static STORED_READINGS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("parkwx_stored_readings", "Readings currently retained").unwrap()
});

/// HTTP requests answered with a server error.
pub static HTTP_ERRORS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "parkwx_http_errors_total",
        "Total HTTP requests that failed with 5xx",
        &["endpoint"]
    )
    .unwrap()
});

/// Metrics facade for easy access.
pub struct Metrics;

impl Metrics {
    /// Record a stored reading and the resulting store size.
    pub fn reading_generated(stored: usize) {
        READINGS_GENERATED_TOTAL.inc();
        STORED_READINGS.set(stored as i64);
    }

    /// Record a stored alert.
    pub fn alert_generated(severity: &str) {
        ALERTS_GENERATED_TOTAL.with_label_values(&[severity]).inc();
    }

    /// Record a failed tick stage.
    pub fn tick_failed(stage: &str) {
        TICK_FAILURES_TOTAL.with_label_values(&[stage]).inc();
    }

    /// Record a blob upload attempt.
    pub fn blob_upload(success: bool) {
        let outcome = if success { "ok" } else { "error" };
        BLOB_UPLOADS_TOTAL.with_label_values(&[outcome]).inc();
    }

    /// Record a 5xx response.
    pub fn http_error(endpoint: &str) {
        HTTP_ERRORS_TOTAL.with_label_values(&[endpoint]).inc();
    }
}

/// Render all registered metrics in Prometheus text format.
pub fn render_metrics() -> TelemetryResult<String> {
    let encoder = TextEncoder::new();
    let families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
