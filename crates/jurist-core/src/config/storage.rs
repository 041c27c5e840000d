//! Document storage configuration.

use serde::{Deserialize, Serialize};

/// Verification document storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for locally stored documents.
    #[serde(default = "default_local_root")]
    pub local_root: String,
    /// Public base URL that stored paths are appended to.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Serve `local_root` under `/files` from this server. Turn off when a
    /// separate web server or CDN answers `public_base_url`.
    #[serde(default = "default_serve_documents")]
    pub serve_documents: bool,
    /// Maximum accepted document size in bytes (default 20 MB).
    #[serde(default = "default_max_document")]
    pub max_document_bytes: u64,
    /// Accepted document MIME types.
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            local_root: default_local_root(),
            public_base_url: default_public_base_url(),
            serve_documents: default_serve_documents(),
            max_document_bytes: default_max_document(),
            allowed_mime_types: default_allowed_mime_types(),
        }
    }
}

fn default_local_root() -> String {
    "./data/documents".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:3001/files".to_string()
}

fn default_serve_documents() -> bool {
    true
}

fn default_max_document() -> u64 {
    20 * 1024 * 1024 // 20 MB
}

fn default_allowed_mime_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/png".to_string(),
        "application/pdf".to_string(),
    ]
}
