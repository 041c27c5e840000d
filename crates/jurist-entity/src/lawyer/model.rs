//! Lawyer profile entity model.

use chrono::{DateTime, Utc};
use jurist_core::types::{AdminId, LawyerId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::{DocumentKind, LawyerCategory, LawyerStatus};

/// A lawyer registered on the marketplace.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LawyerProfile {
    /// Unique profile identifier.
    pub id: LawyerId,
    /// Subject of the identity-provider account.
    pub external_ref: String,
    /// Lower-cased e-mail address.
    pub email: String,
    /// Professional category.
    pub category: LawyerCategory,
    /// Full legal name.
    pub full_name: String,
    /// National identification number.
    pub iin: String,
    /// Phone in `+7XXXXXXXXXX` form.
    pub phone: String,
    /// Portrait photo URL.
    pub photo_url: String,
    /// Diploma scan URL.
    pub diploma_url: String,
    /// License scan URL.
    pub license_url: String,
    /// Whether the identity provider confirmed the e-mail.
    pub email_verified: bool,
    /// When the e-mail was confirmed.
    pub email_verified_at: Option<DateTime<Utc>>,
    /// Moderation state.
    pub status: LawyerStatus,
    /// Why the profile was rejected. Present only when `REJECTED`.
    pub rejection_reason: Option<String>,
    /// Administrator who last moderated the profile.
    pub moderated_by: Option<AdminId>,
    /// When the profile was last moderated.
    pub moderated_at: Option<DateTime<Utc>>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last changed.
    pub updated_at: DateTime<Utc>,
}

impl LawyerProfile {
    /// The stored URL of a verification document.
    pub fn document_url(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Photo => &self.photo_url,
            DocumentKind::Diploma => &self.diploma_url,
            DocumentKind::License => &self.license_url,
        }
    }

    /// Replace the stored URL of a verification document.
    pub fn set_document_url(&mut self, kind: DocumentKind, url: String) {
        match kind {
            DocumentKind::Photo => self.photo_url = url,
            DocumentKind::Diploma => self.diploma_url = url,
            DocumentKind::License => self.license_url = url,
        }
    }
}

/// Data required to create a new lawyer profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLawyerProfile {
    /// Identity-provider subject.
    pub external_ref: String,
    /// Lower-cased e-mail.
    pub email: String,
    /// Professional category.
    pub category: LawyerCategory,
    /// Full legal name.
    pub full_name: String,
    /// Checksum-validated IIN.
    pub iin: String,
    /// Normalized phone.
    pub phone: String,
    /// Uploaded photo URL.
    pub photo_url: String,
    /// Uploaded diploma URL.
    pub diploma_url: String,
    /// Uploaded license URL.
    pub license_url: String,
}

/// Editable profile fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LawyerProfileUpdate {
    /// New full name.
    pub full_name: Option<String>,
    /// New normalized phone.
    pub phone: Option<String>,
}

impl LawyerProfileUpdate {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.phone.is_none()
    }
}
