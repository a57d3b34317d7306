//! Park weather dashboard server.
//!
//! Wires one shared record store into the synthetic weather feed and the
//! HTTP API, and runs both until SIGINT/SIGTERM.

pub mod app;
pub mod config;
pub mod error;
pub mod shutdown;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
