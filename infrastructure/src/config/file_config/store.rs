//! Store configuration from TOML (`[store]` section)

use serde::{Deserialize, Serialize};

/// Which question store adapter to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-process store, optionally snapshotted to a JSON file
    #[default]
    Memory,
    /// Remote real-time store over its admin HTTP API
    Hosted,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Hosted => "hosted",
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DEFAULT_API_URI: &str = "https://api.instantdb.com";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;

/// Raw store configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    pub backend: StoreBackend,
    /// JSON file the memory backend loads from and saves to
    pub snapshot_path: Option<String>,
    /// Application id (hosted backend)
    pub app_id: Option<String>,
    pub api_uri: String,
    /// Admin token (hosted backend); prefer `ASKBOARD_STORE__ADMIN_TOKEN`
    pub admin_token: Option<String>,
    /// How often the hosted backend polls for changes
    pub poll_interval_ms: u64,
    /// Upper bound for each store or auth call
    pub timeout_seconds: Option<u64>,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            snapshot_path: None,
            app_id: None,
            api_uri: DEFAULT_API_URI.to_string(),
            admin_token: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            timeout_seconds: None,
        }
    }
}
