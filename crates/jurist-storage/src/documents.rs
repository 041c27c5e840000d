//! Verification document storage.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, info};
use uuid::Uuid;

use jurist_core::config::StorageConfig;
use jurist_core::error::{AppError, ErrorKind};
use jurist_core::result::AppResult;
use jurist_core::traits::storage::StorageProvider;

/// Stores uploaded documents and hands back their public URLs.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Validate and store `data` under `folder`, returning its public URL.
    ///
    /// Fails with `Validation` for an unsupported MIME type or an
    /// oversized payload and with `DependencyFailure` when the backend
    /// cannot be written.
    async fn store(&self, data: Bytes, mime_type: &str, folder: &str) -> AppResult<String>;

    /// Delete a previously stored document by its public URL.
    async fn delete(&self, url: &str) -> AppResult<()>;
}

/// File extension for an accepted document MIME type.
fn extension_for(mime_type: &str) -> Option<&'static str> {
    match mime_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "application/pdf" => Some("pdf"),
        _ => None,
    }
}

/// [`DocumentStore`] on top of any [`StorageProvider`].
///
/// Objects are written to `{folder}/{uuid}.{ext}`; the public URL is the
/// configured base URL joined with that path.
#[derive(Debug, Clone)]
pub struct ProviderDocumentStore {
    provider: Arc<dyn StorageProvider>,
    public_base_url: String,
    max_bytes: u64,
    allowed_mime_types: Vec<String>,
}

impl ProviderDocumentStore {
    /// Create a document store over `provider`.
    pub fn new(provider: Arc<dyn StorageProvider>, config: &StorageConfig) -> Self {
        Self {
            provider,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
            max_bytes: config.max_document_bytes,
            allowed_mime_types: config.allowed_mime_types.clone(),
        }
    }

    /// Storage path of a URL issued by this store.
    fn path_from_url<'a>(&self, url: &'a str) -> AppResult<&'a str> {
        url.strip_prefix(&self.public_base_url)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|path| !path.is_empty())
            .ok_or_else(|| AppError::validation(format!("URL is not a stored document: {url}")))
    }

    fn validate(&self, data: &Bytes, mime_type: &str) -> AppResult<&'static str> {
        let extension = extension_for(mime_type)
            .filter(|_| self.allowed_mime_types.iter().any(|m| m == mime_type))
            .ok_or_else(|| {
                AppError::invalid_field(
                    "file",
                    format!(
                        "Unsupported file type '{mime_type}'. Allowed: {}",
                        self.allowed_mime_types.join(", ")
                    ),
                )
            })?;

        if data.len() as u64 > self.max_bytes {
            return Err(AppError::invalid_field(
                "file",
                format!(
                    "File is too large ({} bytes). Maximum is {} MB",
                    data.len(),
                    self.max_bytes / (1024 * 1024)
                ),
            ));
        }

        Ok(extension)
    }
}

#[async_trait]
impl DocumentStore for ProviderDocumentStore {
    async fn store(&self, data: Bytes, mime_type: &str, folder: &str) -> AppResult<String> {
        let extension = self.validate(&data, mime_type)?;
        let folder = folder.trim_matches('/');
        let path = format!("{folder}/{}.{extension}", Uuid::new_v4());
        let size = data.len();

        self.provider.write(&path, data).await.map_err(|e| {
            if e.is(ErrorKind::Validation) {
                e
            } else {
                AppError::with_source(
                    ErrorKind::DependencyFailure,
                    "Document storage is unavailable",
                    e,
                )
            }
        })?;

        info!(path = %path, bytes = size, mime_type, "Stored document");
        Ok(format!("{}/{path}", self.public_base_url))
    }

    async fn delete(&self, url: &str) -> AppResult<()> {
        let path = self.path_from_url(url)?;
        self.provider.delete(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::DependencyFailure,
                format!("Failed to delete document {path}"),
                e,
            )
        })?;
        debug!(path, "Deleted document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::LocalStorageProvider;

    async fn store_in(dir: &tempfile::TempDir, max_bytes: u64) -> (ProviderDocumentStore, Arc<LocalStorageProvider>) {
        let provider = Arc::new(
            LocalStorageProvider::new(dir.path().to_str().unwrap())
                .await
                .unwrap(),
        );
        let config = StorageConfig {
            public_base_url: "https://cdn.jurist.kz/docs/".to_string(),
            max_document_bytes: max_bytes,
            ..StorageConfig::default()
        };
        (ProviderDocumentStore::new(provider.clone(), &config), provider)
    }

    #[tokio::test]
    async fn test_store_names_file_by_folder_and_extension() {
        let dir = tempfile::tempdir().unwrap();
        let (store, provider) = store_in(&dir, 1024).await;

        let url = store
            .store(Bytes::from_static(b"%PDF"), "application/pdf", "diplomas")
            .await
            .unwrap();

        let path = url.strip_prefix("https://cdn.jurist.kz/docs/").unwrap();
        assert!(path.starts_with("diplomas/"));
        assert!(path.ends_with(".pdf"));
        assert!(provider.exists(path).await.unwrap());

        store.delete(&url).await.unwrap();
        assert!(!provider.exists(path).await.unwrap());
    }

    #[tokio::test]
    async fn test_rejects_unsupported_mime() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _) = store_in(&dir, 1024).await;
        let err = store
            .store(Bytes::from_static(b"GIF89a"), "image/gif", "photos")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }

    #[tokio::test]
    async fn test_rejects_oversized_payload() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _) = store_in(&dir, 4).await;

        assert!(store.store(Bytes::from_static(b"1234"), "image/png", "photos").await.is_ok());
        let err = store
            .store(Bytes::from_static(b"12345"), "image/png", "photos")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }

    #[tokio::test]
    async fn test_delete_rejects_foreign_url() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _) = store_in(&dir, 1024).await;
        let err = store.delete("https://elsewhere.kz/photos/a.png").await.unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }
}
