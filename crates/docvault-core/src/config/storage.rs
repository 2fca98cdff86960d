//! Blob storage configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for all runtime data.
    #[serde(default = "default_data_root")]
    pub data_root: String,
    /// Maximum upload size in bytes (default 1 GB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Local filesystem blob storage configuration.
    #[serde(default)]
    pub local: LocalBlobConfig,
}

/// Local filesystem blob storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalBlobConfig {
    /// Root path under which blobs are stored.
    #[serde(default = "default_local_root")]
    pub root_path: String,
}

impl Default for LocalBlobConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
        }
    }
}

fn default_data_root() -> String {
    "./data".to_string()
}

fn default_max_upload() -> u64 {
    1_073_741_824 // 1 GB
}

fn default_local_root() -> String {
    "./data/blobs".to_string()
}
