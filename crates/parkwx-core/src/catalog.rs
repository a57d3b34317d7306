//! Fixed label sets used by the synthetic feed.

/// Location assigned when a reading does not name one.
pub const DEFAULT_LOCATION: &str = "Main Plaza";

/// Park areas a reading can be attributed to.
pub const LOCATIONS: [&str; 5] = [
    DEFAULT_LOCATION,
    "Adventure Zone",
    "Water Park",
    "Sky Deck",
    "Forest Trail",
];

/// Sky condition labels.
pub const CONDITIONS: [&str; 6] = [
    "Sunny",
    "Partly Cloudy",
    "Cloudy",
    "Overcast",
    "Light Rain",
    "Clear",
];
