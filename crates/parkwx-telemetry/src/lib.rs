//! Prometheus metrics and structured logging for parkwx.
//!
//! - Structured logging with tracing (JSON in production, pretty otherwise)
//! - Prometheus counters for the synthetic feed and the HTTP layer
//! - Text exposition for the `/metrics` scrape endpoint

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::{render_metrics, Metrics};
