//! Multipart form reading shared by registration and document resubmission.

use std::collections::HashMap;

use axum::extract::Multipart;

use jurist_core::error::AppError;
use jurist_entity::lawyer::DocumentKind;
use jurist_service::DocumentUpload;

/// Text fields and document parts of one multipart body.
#[derive(Debug, Default)]
pub(crate) struct UploadForm {
    pub fields: HashMap<String, String>,
    pub documents: Vec<DocumentUpload>,
}

impl UploadForm {
    /// Reads every part. File parts must be named `photo`, `diploma` or
    /// `license`; other parts are kept as text.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
        {
            let name = field.name().unwrap_or("").to_string();

            if let Some(kind) = DocumentKind::from_field_name(&name) {
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                form.documents.push(DocumentUpload {
                    kind,
                    mime_type,
                    data,
                });
            } else if field.file_name().is_some() {
                return Err(AppError::invalid_field(
                    &name,
                    "Unexpected file; expected photo, diploma or license",
                ));
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// A required text field, accepting either camelCase or snake_case.
    pub fn text(&self, camel: &str, snake: &str) -> Result<String, AppError> {
        self.fields
            .get(camel)
            .or_else(|| self.fields.get(snake))
            .cloned()
            .ok_or_else(|| AppError::invalid_field(camel, format!("{camel} is required")))
    }
}
