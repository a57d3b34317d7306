//! Random reading and alert synthesis.

use chrono::{DateTime, Utc};
use rand::Rng;

use parkwx_core::{
    round_to, NewAlert, NewReading, ReadingStatus, WindDirection, ALERT_TEMPLATES, CONDITIONS,
    LOCATIONS,
};

/// Draw one reading stamped at `now`.
///
/// | field       | range           | precision |
/// |-------------|-----------------|-----------|
/// | temperature | [65, 90) °F     | 0.1       |
/// | humidity    | [30, 80) %      | integer   |
/// | wind speed  | [0, 15) mph     | 0.1       |
/// | visibility  | [5, 15) mi      | 0.1       |
/// | pressure    | [29.5, 31) inHg | 0.01      |
pub fn random_reading<R: Rng + ?Sized>(
    rng: &mut R,
    watch_probability: f64,
    now: DateTime<Utc>,
) -> NewReading {
    let status = if rng.gen_bool(watch_probability) {
        ReadingStatus::Watch
    } else {
        ReadingStatus::Normal
    };

    NewReading {
        timestamp: Some(now),
        temperature: round_to(rng.gen_range(65.0..90.0), 1),
        humidity: rng.gen_range(30..80),
        wind_speed: round_to(rng.gen_range(0.0..15.0), 1),
        wind_direction: WindDirection::ALL[rng.gen_range(0..WindDirection::ALL.len())],
        visibility: round_to(rng.gen_range(5.0..15.0), 1),
        pressure: round_to(rng.gen_range(29.5..31.0), 2),
        conditions: CONDITIONS[rng.gen_range(0..CONDITIONS.len())].to_string(),
        status: Some(status),
        location: Some(LOCATIONS[rng.gen_range(0..LOCATIONS.len())].to_string()),
    }
}

/// With probability `alert_probability`, draw an alert from the catalog.
pub fn maybe_alert<R: Rng + ?Sized>(
    rng: &mut R,
    alert_probability: f64,
    now: DateTime<Utc>,
) -> Option<NewAlert> {
    if !rng.gen_bool(alert_probability) {
        return None;
    }
    let template = &ALERT_TEMPLATES[rng.gen_range(0..ALERT_TEMPLATES.len())];
    Some(template.instantiate(now))
}
