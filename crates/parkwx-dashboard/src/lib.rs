//! parkwx-dashboard - HTTP API and dashboard page for the parkwx feed.
//!
//! Serves the readings and alerts held in the shared store, plus derived
//! analytics, operational status, and synthetic monitoring figures:
//!
//! ```text
//! GET /                        → Static HTML/JS dashboard
//! GET /api/weather/logs        → Newest readings (?limit=N, default 50)
//! GET /api/weather/latest      → Newest reading or 404
//! GET /api/weather/alerts      → Active alerts
//! GET /api/weather/analytics   → Summary of the last 100 readings
//! GET /api/system/status       → Blob connectivity, alert count
//! GET /api/monitoring/metrics  → Synthetic monitoring figures
//! GET /metrics                 → Prometheus exposition
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use parkwx_dashboard::{run_server, DashboardConfig, DashboardState};
//!
//! let state = DashboardState::new(store.clone(), BlobStorageConfig::from_env());
//! run_server(state, DashboardConfig::default(), shutdown.clone()).await?;
//! ```

mod analytics;
mod config;
mod error;
mod monitoring;
mod server;
mod state;
mod types;

pub use config::DashboardConfig;
pub use error::{ApiError, ApiResult, NO_WEATHER_DATA};
pub use monitoring::REPORTED_AVAILABILITY;
pub use server::{create_router, run_server, serve, AppState};
pub use state::DashboardState;
pub use types::{
    ContainerHealth, ErrorBody, MonitoringMetrics, PerformanceMetrics, SystemStatus,
    WeatherAnalytics, WeatherDataMetrics,
};
