//! HTTP server implementation using axum.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info};

use parkwx_core::{Alert, Reading};
use parkwx_telemetry::render_metrics;

use crate::config::DashboardConfig;
use crate::error::{ApiError, ApiResult, NO_WEATHER_DATA};
use crate::state::DashboardState;
use crate::types::{MonitoringMetrics, SystemStatus, WeatherAnalytics};

/// Shared application state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    dashboard_state: DashboardState,
    config: Arc<DashboardConfig>,
}

impl AppState {
    pub fn new(dashboard_state: DashboardState, config: DashboardConfig) -> Self {
        Self {
            dashboard_state,
            config: Arc::new(config),
        }
    }
}

/// Create the axum router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/api/weather/logs", get(get_logs))
        .route("/api/weather/latest", get(get_latest))
        .route("/api/weather/alerts", get(get_alerts))
        .route("/api/weather/analytics", get(get_analytics))
        .route("/api/system/status", get(get_status))
        .route("/api/monitoring/metrics", get(get_monitoring_metrics))
        .route("/metrics", get(get_prometheus))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the index HTML page.
async fn serve_index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// `limit` stays a string so bad input falls back instead of rejecting.
#[derive(Debug, Deserialize)]
struct LogsQuery {
    limit: Option<String>,
}

/// Parse a page size from its leading digits, so `2abc` and `1.5` read as
/// 2 and 1. Missing, non-numeric, negative, and zero values use `default`.
fn parse_limit(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|s| {
        let s = s.trim_start();
        let s = s.strip_prefix('+').unwrap_or(s);
        let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        s[..end].parse::<usize>().ok()
    })
    .filter(|&n| n > 0)
    .unwrap_or(default)
}

async fn get_logs(
    State(state): State<AppState>,
    Query(query): Query<LogsQuery>,
) -> ApiResult<Json<Vec<Reading>>> {
    let limit = parse_limit(query.limit.as_deref(), state.config.default_logs_limit);
    let readings = state
        .dashboard_state
        .recent_readings(limit)
        .map_err(|e| ApiError::internal("weather_logs", "Failed to fetch weather logs", e))?;
    debug!(limit, returned = readings.len(), "Served weather logs");
    Ok(Json(readings))
}

async fn get_latest(State(state): State<AppState>) -> ApiResult<Json<Reading>> {
    state
        .dashboard_state
        .latest_reading()
        .map_err(|e| {
            ApiError::internal("weather_latest", "Failed to fetch latest weather data", e)
        })?
        .map(Json)
        .ok_or(ApiError::NotFound(NO_WEATHER_DATA))
}

async fn get_alerts(State(state): State<AppState>) -> ApiResult<Json<Vec<Alert>>> {
    let alerts = state
        .dashboard_state
        .active_alerts()
        .map_err(|e| ApiError::internal("weather_alerts", "Failed to fetch alerts", e))?;
    Ok(Json(alerts))
}

async fn get_analytics(State(state): State<AppState>) -> ApiResult<Json<WeatherAnalytics>> {
    let analytics = state
        .dashboard_state
        .collect_analytics(state.config.analytics_window)
        .map_err(|e| ApiError::internal("weather_analytics", "Failed to fetch analytics", e))?;
    Ok(Json(analytics))
}

async fn get_status(State(state): State<AppState>) -> ApiResult<Json<SystemStatus>> {
    let status = state
        .dashboard_state
        .collect_status()
        .map_err(|e| ApiError::internal("system_status", "Failed to fetch system status", e))?;
    Ok(Json(status))
}

async fn get_monitoring_metrics(
    State(state): State<AppState>,
) -> ApiResult<Json<MonitoringMetrics>> {
    let metrics = state
        .dashboard_state
        .collect_metrics(&mut rand::thread_rng())
        .map_err(|e| {
            ApiError::internal("monitoring_metrics", "Failed to fetch monitoring metrics", e)
        })?;
    Ok(Json(metrics))
}

/// Prometheus scrape endpoint.
async fn get_prometheus() -> Response {
    match render_metrics() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Serve on an already bound listener until `shutdown` is cancelled.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;
    Ok(())
}

/// Run the dashboard HTTP server.
pub async fn run_server(
    dashboard_state: DashboardState,
    config: DashboardConfig,
    shutdown: CancellationToken,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Starting dashboard server");

    serve(listener, AppState::new(dashboard_state, config), shutdown).await?;

    info!("Dashboard server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(None, 50), 50);
        assert_eq!(parse_limit(Some("2"), 50), 2);
        assert_eq!(parse_limit(Some(" 7 "), 50), 7);
        assert_eq!(parse_limit(Some("0"), 50), 50);
        assert_eq!(parse_limit(Some("abc"), 50), 50);
        assert_eq!(parse_limit(Some("-3"), 50), 50);
        assert_eq!(parse_limit(Some(""), 50), 50);
        assert_eq!(parse_limit(Some("2abc"), 50), 2);
        assert_eq!(parse_limit(Some("1.5"), 50), 1);
        assert_eq!(parse_limit(Some("+4"), 50), 4);
        assert_eq!(parse_limit(Some("0.9"), 50), 50);
        assert_eq!(parse_limit(Some("abc2"), 50), 50);
    }
}
