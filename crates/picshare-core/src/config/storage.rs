//! Upload storage configuration.

use serde::{Deserialize, Serialize};

/// Where uploaded image bytes are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Flat directory holding uploads under their original filenames.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
        }
    }
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}
