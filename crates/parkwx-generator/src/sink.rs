//! External blob sink for readings.
//!
//! Uploads are spawned off the tick so the store is never waiting on the
//! network. Only a dry-run sink ships here; it builds the payload and logs
//! where it would have written it.

use futures_util::future::BoxFuture;
use tracing::info;

use parkwx_core::{BlobStorageConfig, Reading};

use crate::error::GeneratorResult;

/// Container readings are written under.
pub const CONTAINER: &str = "weather-logs";

/// Destination for mirrored readings.
pub trait BlobSink: Send + Sync {
    /// Upload one reading.
    fn upload(&self, reading: Reading) -> BoxFuture<'_, GeneratorResult<()>>;
}

/// Blob path for a reading: `weather-logs/YYYY/MM/DD/<id>.json`.
pub fn blob_path(reading: &Reading) -> String {
    format!(
        "{CONTAINER}/{}/{}.json",
        reading.timestamp.format("%Y/%m/%d"),
        reading.id
    )
}

/// Sink that serializes readings and logs the target path without any I/O.
#[derive(Debug, Clone)]
pub struct DryRunBlobSink {
    account_name: String,
}

impl DryRunBlobSink {
    pub fn new(account_name: impl Into<String>) -> Self {
        Self {
            account_name: account_name.into(),
        }
    }

    /// Build a sink when both credentials are present.
    pub fn from_config(config: &BlobStorageConfig) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }
        config.account_name.as_deref().map(Self::new)
    }

    pub fn account_name(&self) -> &str {
        &self.account_name
    }
}

impl BlobSink for DryRunBlobSink {
    fn upload(&self, reading: Reading) -> BoxFuture<'_, GeneratorResult<()>> {
        Box::pin(async move {
            let payload = serde_json::to_vec(&reading)?;
            info!(
                account = %self.account_name,
                path = %blob_path(&reading),
                bytes = payload.len(),
                "Blob upload skipped (dry run)"
            );
            Ok(())
        })
    }
}
