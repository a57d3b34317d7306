//! Generator configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Synthetic feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Run the feed at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Tick period in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Chance per tick of raising an alert (0.0 - 1.0).
    #[serde(default = "default_alert_probability")]
    pub alert_probability: f64,
    /// Chance a reading is flagged "Watch" (0.0 - 1.0).
    #[serde(default = "default_watch_probability")]
    pub watch_probability: f64,
}

fn default_enabled() -> bool {
    true
}

fn default_interval_ms() -> u64 {
    4000
}

fn default_alert_probability() -> f64 {
    0.1
}

fn default_watch_probability() -> f64 {
    0.1
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interval_ms: default_interval_ms(),
            alert_probability: default_alert_probability(),
            watch_probability: default_watch_probability(),
        }
    }
}

impl GeneratorConfig {
    /// Tick period, never shorter than 1ms.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }

    /// Alert probability clamped into [0, 1]; NaN counts as 0.
    pub fn alert_chance(&self) -> f64 {
        clamp_probability(self.alert_probability)
    }

    /// Watch probability clamped into [0, 1]; NaN counts as 0.
    pub fn watch_chance(&self) -> f64 {
        clamp_probability(self.watch_probability)
    }
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}
