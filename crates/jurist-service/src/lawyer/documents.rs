//! Verification document uploads.

use std::collections::HashSet;

use bytes::Bytes;
use tracing::warn;

use jurist_core::error::AppError;
use jurist_core::result::AppResult;
use jurist_entity::lawyer::DocumentKind;
use jurist_storage::DocumentStore;

/// One uploaded verification document.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    /// Which document this is.
    pub kind: DocumentKind,
    /// Declared MIME type.
    pub mime_type: String,
    /// File content.
    pub data: Bytes,
}

/// Rejects a batch that names the same document twice.
pub(crate) fn ensure_distinct(uploads: &[DocumentUpload]) -> AppResult<()> {
    let mut seen = HashSet::new();
    for upload in uploads {
        if !seen.insert(upload.kind) {
            return Err(AppError::invalid_field(
                upload.kind.field_name(),
                format!("{} was uploaded more than once", upload.kind.field_name()),
            ));
        }
    }
    Ok(())
}

/// Stores every upload in its folder.
///
/// On failure the files already stored by this call are removed and the
/// error is returned.
pub(crate) async fn store_all(
    store: &dyn DocumentStore,
    uploads: Vec<DocumentUpload>,
) -> AppResult<Vec<(DocumentKind, String)>> {
    let mut stored = Vec::with_capacity(uploads.len());
    for upload in uploads {
        match store
            .store(upload.data, &upload.mime_type, upload.kind.folder())
            .await
        {
            Ok(url) => stored.push((upload.kind, url)),
            Err(e) => {
                delete_best_effort(store, &urls_of(&stored)).await;
                return Err(e);
            }
        }
    }
    Ok(stored)
}

/// URLs of a stored batch.
pub(crate) fn urls_of(stored: &[(DocumentKind, String)]) -> Vec<String> {
    stored.iter().map(|(_, url)| url.clone()).collect()
}

/// Deletes files, logging instead of failing.
pub(crate) async fn delete_best_effort(store: &dyn DocumentStore, urls: &[String]) {
    for url in urls {
        if let Err(e) = store.delete(url).await {
            warn!(url, error = %e, "Failed to delete document");
        }
    }
}
