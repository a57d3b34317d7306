//! Response bodies served by the dashboard API.
//!
//! Every body is camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary over the most recent readings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAnalytics {
    /// Mean temperature, one decimal place.
    pub average_temperature: f64,
    pub max_temperature: f64,
    pub min_temperature: f64,
    /// Mean humidity rounded to the nearest integer.
    pub average_humidity: i64,
    pub total_logs: usize,
    /// Readings whose status is not `Normal`.
    pub extreme_weather_events: usize,
}

/// Operational summary for the status panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    /// `connected` or `disconnected`.
    pub blob_storage_status: String,
    pub data_refresh_status: String,
    pub data_quality_status: String,
    pub latest_data_timestamp: DateTime<Utc>,
    pub active_alerts_count: usize,
    pub is_operational: bool,
}

/// Synthetic monitoring figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringMetrics {
    pub container_health: ContainerHealth,
    pub weather_data_metrics: WeatherDataMetrics,
    pub performance_metrics: PerformanceMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerHealth {
    pub cpu_usage: u32,
    pub memory_usage: u32,
    pub request_count: u32,
    pub error_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherDataMetrics {
    pub data_ingestion_rate: u32,
    pub storage_latency: u32,
    /// Count of currently active alerts, not a random figure.
    pub alerts_generated: usize,
    pub system_uptime: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub response_time: u32,
    pub throughput: u32,
    pub availability_percentage: f64,
}

/// Body of every non-2xx API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
