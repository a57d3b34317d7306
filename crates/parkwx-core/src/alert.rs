//! Alert types.
//!
//! Alerts are created by the feed, shown while active, and cleared by
//! deactivation. They are never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, Result};
use crate::RecordId;

/// Alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// A stored alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub alert_type: String,
    pub title: String,
    pub message: String,
    pub severity: AlertSeverity,
    pub timestamp: DateTime<Utc>,
    #[serde(with = "active_flag")]
    pub is_active: bool,
}

/// Insert form of an alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlert {
    #[serde(rename = "type")]
    pub alert_type: String,
    pub title: String,
    pub message: String,
    pub severity: AlertSeverity,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Defaults to active when absent.
    #[serde(default, with = "active_flag::option")]
    pub is_active: Option<bool>,
}

impl NewAlert {
    /// Check the alert against the schema rules.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("type", &self.alert_type),
            ("title", &self.title),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::InvalidAlert(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }

    /// Materialize into a stored alert, filling defaults.
    pub fn into_alert(self, id: RecordId, now: DateTime<Utc>) -> Alert {
        Alert {
            id,
            alert_type: self.alert_type,
            title: self.title,
            message: self.message,
            severity: self.severity,
            timestamp: self.timestamp.unwrap_or(now),
            is_active: self.is_active.unwrap_or(true),
        }
    }
}

/// Static alert shape the feed picks from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertTemplate {
    pub alert_type: &'static str,
    pub title: &'static str,
    pub message: &'static str,
    pub severity: AlertSeverity,
}

impl AlertTemplate {
    /// Instantiate the template as an active alert stamped at `timestamp`.
    pub fn instantiate(&self, timestamp: DateTime<Utc>) -> NewAlert {
        NewAlert {
            alert_type: self.alert_type.to_string(),
            title: self.title.to_string(),
            message: self.message.to_string(),
            severity: self.severity,
            timestamp: Some(timestamp),
            is_active: Some(true),
        }
    }
}

/// Catalog of alerts the synthetic feed can raise.
pub const ALERT_TEMPLATES: [AlertTemplate; 3] = [
    AlertTemplate {
        alert_type: "weather",
        title: "High UV Index",
        message: "Recommend shade stations for guests",
        severity: AlertSeverity::Warning,
    },
    AlertTemplate {
        alert_type: "system",
        title: "All Systems Operational",
        message: "Weather conditions optimal for park operations",
        severity: AlertSeverity::Info,
    },
    AlertTemplate {
        alert_type: "forecast",
        title: "Rain Possible",
        message: "30% chance of light rain in the next 2 hours",
        severity: AlertSeverity::Warning,
    },
];

/// The active flag travels as an integer (1 = active, 0 = inactive).
/// Booleans are accepted on input as well.
mod active_flag {
    use serde::de::{self, Deserializer, Visitor};
    use serde::Serializer;
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        deserializer.deserialize_any(FlagVisitor)
    }

    struct FlagVisitor;

    impl Visitor<'_> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("0, 1, or a boolean")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::invalid_value(de::Unexpected::Unsigned(other), &self)),
            }
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::invalid_value(de::Unexpected::Signed(other), &self)),
            }
        }
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<bool>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => super::serialize(v, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<bool>, D::Error> {
            #[derive(Deserialize)]
            struct Wrapper(#[serde(with = "super")] bool);

            Option::<Wrapper>::deserialize(deserializer).map(|w| w.map(|Wrapper(v)| v))
        }
    }
}
