//! Main application orchestration.
//!
//! Builds the record store once and hands the same handle to:
//! - the synthetic weather generator (writer)
//! - the dashboard HTTP server (reader)

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use parkwx_core::BlobStorageConfig;
use parkwx_dashboard::{run_server, DashboardState};
use parkwx_generator::{DryRunBlobSink, WeatherGenerator};
use parkwx_store::{MemStore, SharedStore};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::shutdown::create_shutdown_token;

/// Main application.
pub struct Application {
    config: AppConfig,
    store: SharedStore,
    blob: BlobStorageConfig,
}

impl Application {
    /// Create a new application with blob credentials from the environment.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        Self::with_blob(config, BlobStorageConfig::from_env())
    }

    pub fn with_blob(config: AppConfig, blob: BlobStorageConfig) -> AppResult<Self> {
        config.validate()?;
        let store: SharedStore = Arc::new(MemStore::with_retention(config.store.retention));

        info!(
            retention = config.store.retention,
            blob_storage = blob.status_label(),
            "Application initialized"
        );

        Ok(Self {
            config,
            store,
            blob,
        })
    }

    /// Shared store handle.
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Run until SIGINT or SIGTERM.
    pub async fn run(self) -> AppResult<()> {
        let shutdown = create_shutdown_token();
        self.run_until(shutdown).await
    }

    /// Run the generator and the HTTP server until `shutdown` is cancelled.
    ///
    /// A server failure cancels the token so the generator stops too.
    pub async fn run_until(self, shutdown: CancellationToken) -> AppResult<()> {
        let Self {
            config,
            store,
            blob,
        } = self;

        let generator_handle = if config.generator.enabled {
            let mut generator = WeatherGenerator::new(store.clone(), config.generator.clone());
            if let Some(sink) = DryRunBlobSink::from_config(&blob) {
                info!(account = %sink.account_name(), "Mirroring readings to blob storage");
                generator = generator.with_sink(Arc::new(sink));
            }
            Some(tokio::spawn(generator.run(shutdown.clone())))
        } else {
            info!("Weather generator disabled");
            None
        };

        let dashboard_state = DashboardState::new(store, blob);
        let server_result = run_server(dashboard_state, config.dashboard, shutdown.clone()).await;
        if let Err(e) = &server_result {
            error!(error = %e, "Dashboard server failed");
        }

        shutdown.cancel();
        if let Some(handle) = generator_handle {
            handle.await?;
        }

        info!("Shutdown complete");
        server_result.map_err(|e| AppError::Server(e.to_string()))
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("config", &self.config)
            .field("blob", &self.blob)
            .finish_non_exhaustive()
    }
}
