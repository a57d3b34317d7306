//! External blob-storage credentials.
//!
//! The feed can mirror readings to an external blob container. Whether that
//! sink is "connected" is decided purely by the presence of both credentials;
//! their absence is a normal operating mode.

use std::fmt;

/// Environment variable holding the storage account name.
pub const ACCOUNT_NAME_ENV: &str = "AZURE_STORAGE_ACCOUNT_NAME";
/// Environment variable holding the storage account key.
pub const ACCOUNT_KEY_ENV: &str = "AZURE_STORAGE_ACCOUNT_KEY";

/// Blob-storage credentials, both optional.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BlobStorageConfig {
    pub account_name: Option<String>,
    pub account_key: Option<String>,
}

impl BlobStorageConfig {
    pub fn new(account_name: Option<String>, account_key: Option<String>) -> Self {
        Self {
            account_name: account_name.filter(|v| !v.trim().is_empty()),
            account_key: account_key.filter(|v| !v.trim().is_empty()),
        }
    }

    /// Read credentials from the process environment.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var(ACCOUNT_NAME_ENV).ok(),
            std::env::var(ACCOUNT_KEY_ENV).ok(),
        )
    }

    /// True when both credentials are present.
    pub fn is_configured(&self) -> bool {
        self.account_name.is_some() && self.account_key.is_some()
    }

    /// Status label reported by the system status endpoint.
    pub fn status_label(&self) -> &'static str {
        if self.is_configured() {
            "connected"
        } else {
            "disconnected"
        }
    }
}

impl fmt::Debug for BlobStorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlobStorageConfig")
            .field("account_name", &self.account_name)
            .field("account_key", &self.account_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
