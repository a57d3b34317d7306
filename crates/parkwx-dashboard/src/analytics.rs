//! Aggregates over recent readings.

use parkwx_core::{round_to, Reading};

use crate::types::WeatherAnalytics;

impl WeatherAnalytics {
    /// Summarize `readings`. An empty slice yields all zeros.
    pub fn from_readings(readings: &[Reading]) -> Self {
        if readings.is_empty() {
            return Self::default();
        }

        let count = readings.len() as f64;
        let temp_sum: f64 = readings.iter().map(|r| r.temperature).sum();
        let humidity_sum: f64 = readings.iter().map(|r| f64::from(r.humidity)).sum();
        let max_temperature = readings
            .iter()
            .map(|r| r.temperature)
            .fold(f64::NEG_INFINITY, f64::max);
        let min_temperature = readings
            .iter()
            .map(|r| r.temperature)
            .fold(f64::INFINITY, f64::min);

        Self {
            average_temperature: round_to(temp_sum / count, 1),
            max_temperature,
            min_temperature,
            average_humidity: (humidity_sum / count).round() as i64,
            total_logs: readings.len(),
            extreme_weather_events: readings.iter().filter(|r| !r.status.is_normal()).count(),
        }
    }
}
