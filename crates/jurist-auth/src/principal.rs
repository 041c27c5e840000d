//! Authenticated callers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use jurist_core::error::AppError;
use jurist_core::types::{AdminId, LawyerId};
use jurist_entity::admin::AdminRole;
use jurist_entity::lawyer::LawyerStatus;

use crate::jwt::{Claims, UserType};

/// A verified identity-provider account that may not have a profile yet.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    /// Identity-provider subject.
    pub external_ref: String,
    /// Lower-cased account e-mail.
    pub email: String,
    /// When the e-mail was confirmed, if it was.
    pub email_confirmed_at: Option<DateTime<Utc>>,
    /// Declared account kind.
    pub user_type: Option<UserType>,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email.trim().to_lowercase(),
            external_ref: claims.sub,
            email_confirmed_at: claims.email_confirmed_at,
            user_type: claims.user_metadata.user_type,
        }
    }
}

/// The caller behind a request, resolved once at the HTTP boundary.
///
/// `status` is a snapshot taken at resolution time. Marketplace
/// operations re-read the profile before acting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Principal {
    /// A registered lawyer.
    Lawyer {
        /// Profile ID.
        id: LawyerId,
        /// Moderation status at resolution time.
        status: LawyerStatus,
    },
    /// An active administrator.
    Admin {
        /// Administrator ID.
        id: AdminId,
        /// Administrator role.
        role: AdminRole,
    },
}

impl Principal {
    /// The lawyer profile ID, or `Forbidden` for administrators.
    pub fn require_lawyer(&self) -> Result<LawyerId, AppError> {
        match self {
            Self::Lawyer { id, .. } => Ok(*id),
            Self::Admin { .. } => Err(AppError::forbidden("Lawyer account required")),
        }
    }

    /// The administrator ID, or `Forbidden` for lawyers.
    pub fn require_admin(&self) -> Result<AdminId, AppError> {
        match self {
            Self::Admin { id, .. } => Ok(*id),
            Self::Lawyer { .. } => Err(AppError::forbidden("Administrator access required")),
        }
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Lawyer { .. } => "lawyer",
            Self::Admin { .. } => "admin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jurist_core::error::ErrorKind;

    #[test]
    fn test_role_gates() {
        let lawyer = Principal::Lawyer {
            id: LawyerId::new(),
            status: LawyerStatus::Pending,
        };
        let admin = Principal::Admin {
            id: AdminId::new(),
            role: AdminRole::Moderator,
        };

        assert!(lawyer.require_lawyer().is_ok());
        assert!(lawyer.require_admin().unwrap_err().is(ErrorKind::Forbidden));
        assert!(admin.require_admin().is_ok());
        assert!(admin.require_lawyer().unwrap_err().is(ErrorKind::Forbidden));
    }

    #[test]
    fn test_identity_lowercases_email() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "sub": "s", "exp": 1, "email": " Dana@Mail.KZ "
        }))
        .unwrap();
        assert_eq!(Identity::from(claims).email, "dana@mail.kz");
    }
}
