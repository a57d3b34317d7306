//! Synthetic weather feed for parkwx.
//!
//! There are no real sensors. On a fixed period the generator:
//! 1. Draws a random reading and stores it
//! 2. Optionally mirrors it to a blob sink (fire-and-forget)
//! 3. Occasionally raises an alert picked from a fixed catalog
//!
//! A failed tick is logged and the next tick runs as usual.

pub mod config;
pub mod error;
pub mod sink;
pub mod synth;
pub mod task;

pub use config::GeneratorConfig;
pub use error::{GeneratorError, GeneratorResult};
pub use sink::{BlobSink, DryRunBlobSink};
pub use task::{TickOutcome, WeatherGenerator};
