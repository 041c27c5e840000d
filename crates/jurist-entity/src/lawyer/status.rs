//! Lawyer moderation status, category and document kinds.

use std::fmt;
use std::str::FromStr;

use jurist_core::AppError;
use serde::{Deserialize, Serialize};

/// Moderation state of a lawyer profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "lawyer_status", rename_all = "lowercase")]
#[serde(rename_all = "UPPERCASE")]
pub enum LawyerStatus {
    /// Awaiting moderation.
    Pending,
    /// Verified; may work the request pool.
    Approved,
    /// Turned down with a reason; may resubmit documents.
    Rejected,
}

impl LawyerStatus {
    /// Whether the lawyer may act on the request pool.
    pub fn can_access_pool(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Whether an approval would change this status.
    pub fn can_be_approved(&self) -> bool {
        matches!(self, Self::Pending | Self::Rejected)
    }

    /// The status after the lawyer replaces one or more documents.
    pub fn after_resubmission(self) -> Self {
        match self {
            Self::Rejected => Self::Pending,
            other => other,
        }
    }

    /// Return the status as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for LawyerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LawyerStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(AppError::invalid_field(
                "status",
                format!("Invalid lawyer status: '{s}'. Expected one of: PENDING, APPROVED, REJECTED"),
            )),
        }
    }
}

/// Professional category of a lawyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "lawyer_category", rename_all = "lowercase")]
#[serde(rename_all = "UPPERCASE")]
pub enum LawyerCategory {
    /// Licensed advocate (bar member).
    Advocate,
    /// Legal consultant.
    Consultant,
}

impl LawyerCategory {
    /// Return the category as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Advocate => "ADVOCATE",
            Self::Consultant => "CONSULTANT",
        }
    }
}

impl fmt::Display for LawyerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LawyerCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADVOCATE" => Ok(Self::Advocate),
            "CONSULTANT" => Ok(Self::Consultant),
            _ => Err(AppError::invalid_field(
                "category",
                format!("Invalid lawyer category: '{s}'. Expected one of: ADVOCATE, CONSULTANT"),
            )),
        }
    }
}

/// The three verification documents a lawyer supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Portrait photo.
    Photo,
    /// Law degree.
    Diploma,
    /// License or registration proof.
    License,
}

impl DocumentKind {
    /// All kinds in upload order.
    pub const ALL: [Self; 3] = [Self::Photo, Self::Diploma, Self::License];

    /// Storage folder the document lives in.
    pub fn folder(&self) -> &'static str {
        match self {
            Self::Photo => "photos",
            Self::Diploma => "diplomas",
            Self::License => "licenses",
        }
    }

    /// Multipart field name used on upload.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Diploma => "diploma",
            Self::License => "license",
        }
    }

    /// Resolve a multipart field name.
    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.field_name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resubmission_transition() {
        assert_eq!(LawyerStatus::Rejected.after_resubmission(), LawyerStatus::Pending);
        assert_eq!(LawyerStatus::Approved.after_resubmission(), LawyerStatus::Approved);
        assert_eq!(LawyerStatus::Pending.after_resubmission(), LawyerStatus::Pending);
    }

    #[test]
    fn test_only_approved_reaches_pool() {
        assert!(LawyerStatus::Approved.can_access_pool());
        assert!(!LawyerStatus::Pending.can_access_pool());
        assert!(!LawyerStatus::Rejected.can_access_pool());
    }

    #[test]
    fn test_document_folders() {
        assert_eq!(DocumentKind::from_field_name("diploma"), Some(DocumentKind::Diploma));
        assert_eq!(DocumentKind::License.folder(), "licenses");
        assert_eq!(DocumentKind::from_field_name("passport"), None);
    }
}
