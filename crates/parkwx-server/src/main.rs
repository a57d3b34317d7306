//! Park weather dashboard server - Entry Point

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use parkwx_server::{AppConfig, Application};

/// Synthetic park weather feed with a live HTTP dashboard
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via PARKWX_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read first so its log level can seed the subscriber
    let config_path = AppConfig::resolve_path(args.config);
    let (config, found) = AppConfig::load(&config_path)?;

    parkwx_telemetry::init_logging(config.telemetry.log_level.as_deref())?;

    info!("Starting parkwx-server v{}", env!("CARGO_PKG_VERSION"));
    if found {
        info!(config_path = %config_path, "Configuration loaded");
    } else {
        warn!(config_path = %config_path, "Config file not found, using defaults");
    }

    let app = Application::new(config)?;
    app.run().await?;

    Ok(())
}
