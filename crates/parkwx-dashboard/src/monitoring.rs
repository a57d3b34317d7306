//! Synthetic monitoring figures for the metrics panel.
//!
//! Only `alertsGenerated` reflects real state; everything else is drawn at
//! random on each request.

use rand::Rng;

use crate::types::{ContainerHealth, MonitoringMetrics, PerformanceMetrics, WeatherDataMetrics};

/// Fixed uptime and availability figure.
pub const REPORTED_AVAILABILITY: f64 = 99.9;

impl MonitoringMetrics {
    /// Draw a fresh sample reporting `active_alerts` as the alert count.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, active_alerts: usize) -> Self {
        Self {
            container_health: ContainerHealth {
                cpu_usage: draw(rng, 50.0),
                memory_usage: draw(rng, 60.0),
                request_count: draw(rng, 1000.0),
                error_rate: draw(rng, 5.0),
            },
            weather_data_metrics: WeatherDataMetrics {
                data_ingestion_rate: draw(rng, 100.0),
                storage_latency: draw(rng, 200.0),
                alerts_generated: active_alerts,
                system_uptime: REPORTED_AVAILABILITY,
            },
            performance_metrics: PerformanceMetrics {
                response_time: draw(rng, 100.0),
                throughput: draw(rng, 500.0),
                availability_percentage: REPORTED_AVAILABILITY,
            },
        }
    }
}

/// Uniform draw in `[0, max)` rounded to the nearest integer.
fn draw<R: Rng + ?Sized>(rng: &mut R, max: f64) -> u32 {
    (rng.gen::<f64>() * max).round() as u32
}
