//! Weather reading types.
//!
//! A reading is one observation from a (simulated) park weather station.
//! Readings are immutable once stored; the store only ever inserts or evicts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::DEFAULT_LOCATION;
use crate::error::{CoreError, Result};
use crate::RecordId;

/// Eight-point compass direction the wind is blowing from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindDirection {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "NE")]
    NorthEast,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "SE")]
    SouthEast,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "SW")]
    SouthWest,
    #[serde(rename = "W")]
    West,
    #[serde(rename = "NW")]
    NorthWest,
}

impl WindDirection {
    /// All directions, clockwise from north.
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Compass label (e.g. "NE").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::North => "N",
            Self::NorthEast => "NE",
            Self::East => "E",
            Self::SouthEast => "SE",
            Self::South => "S",
            Self::SouthWest => "SW",
            Self::West => "W",
            Self::NorthWest => "NW",
        }
    }
}

impl fmt::Display for WindDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownValue {
                field: "windDirection",
                value: s.to_string(),
            })
    }
}

/// Operational status of a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReadingStatus {
    #[default]
    Normal,
    /// Conditions worth keeping an eye on; counted as an extreme weather event.
    Watch,
}

impl ReadingStatus {
    pub fn is_normal(&self) -> bool {
        matches!(self, Self::Normal)
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "Normal"),
            Self::Watch => write!(f, "Watch"),
        }
    }
}

/// A stored weather reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub id: RecordId,
    pub timestamp: DateTime<Utc>,
    /// Degrees Fahrenheit.
    pub temperature: f64,
    /// Relative humidity percentage.
    pub humidity: i32,
    /// Miles per hour.
    pub wind_speed: f64,
    pub wind_direction: WindDirection,
    /// Miles.
    pub visibility: f64,
    /// Inches of mercury.
    pub pressure: f64,
    pub conditions: String,
    pub status: ReadingStatus,
    pub location: String,
}

/// Insert form of a reading. The store assigns the id and fills defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReading {
    /// Stamped with the insertion time when absent.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub temperature: f64,
    pub humidity: i32,
    pub wind_speed: f64,
    pub wind_direction: WindDirection,
    pub visibility: f64,
    pub pressure: f64,
    pub conditions: String,
    #[serde(default)]
    pub status: Option<ReadingStatus>,
    #[serde(default)]
    pub location: Option<String>,
}

impl NewReading {
    /// Check the reading against the schema rules.
    pub fn validate(&self) -> Result<()> {
        let numeric = [
            ("temperature", self.temperature),
            ("windSpeed", self.wind_speed),
            ("visibility", self.visibility),
            ("pressure", self.pressure),
        ];
        for (field, value) in numeric {
            if !value.is_finite() {
                return Err(CoreError::InvalidReading(format!(
                    "{field} must be finite, got {value}"
                )));
            }
        }

        if !(0..=100).contains(&self.humidity) {
            return Err(CoreError::InvalidReading(format!(
                "humidity must be within 0..=100, got {}",
                self.humidity
            )));
        }
        if self.wind_speed < 0.0 {
            return Err(CoreError::InvalidReading(format!(
                "windSpeed must be non-negative, got {}",
                self.wind_speed
            )));
        }
        if self.visibility < 0.0 {
            return Err(CoreError::InvalidReading(format!(
                "visibility must be non-negative, got {}",
                self.visibility
            )));
        }
        if self.pressure <= 0.0 {
            return Err(CoreError::InvalidReading(format!(
                "pressure must be positive, got {}",
                self.pressure
            )));
        }
        if self.conditions.trim().is_empty() {
            return Err(CoreError::InvalidReading(
                "conditions must not be empty".to_string(),
            ));
        }
        if let Some(location) = &self.location {
            if location.trim().is_empty() {
                return Err(CoreError::InvalidReading(
                    "location must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Materialize into a stored reading, filling defaults.
    pub fn into_reading(self, id: RecordId, now: DateTime<Utc>) -> Reading {
        Reading {
            id,
            timestamp: self.timestamp.unwrap_or(now),
            temperature: self.temperature,
            humidity: self.humidity,
            wind_speed: self.wind_speed,
            wind_direction: self.wind_direction,
            visibility: self.visibility,
            pressure: self.pressure,
            conditions: self.conditions,
            status: self.status.unwrap_or_default(),
            location: self
                .location
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        }
    }
}

/// Round `value` to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
