//! Administrator entity model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use jurist_core::AppError;
use jurist_core::types::AdminId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Administrator role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "admin_role", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminRole {
    /// Full access, including administrator provisioning.
    SuperAdmin,
    /// Moderates lawyers and requests.
    Moderator,
}

impl AdminRole {
    /// Return the role as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::Moderator => "MODERATOR",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AdminRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "SUPER_ADMIN" => Ok(Self::SuperAdmin),
            "MODERATOR" => Ok(Self::Moderator),
            _ => Err(AppError::validation(format!(
                "Invalid admin role: '{s}'. Expected one of: SUPER_ADMIN, MODERATOR"
            ))),
        }
    }
}

/// A marketplace administrator.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    /// Unique administrator identifier.
    pub id: AdminId,
    /// Subject of the identity-provider account.
    pub external_ref: String,
    /// E-mail address.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Role.
    pub role: AdminRole,
    /// Inactive administrators cannot authenticate.
    pub is_active: bool,
    /// When the administrator was provisioned.
    pub created_at: DateTime<Utc>,
}

/// Data required to provision an administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAdminUser {
    /// Identity-provider subject.
    pub external_ref: String,
    /// E-mail address.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Role.
    pub role: AdminRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("super-admin".parse::<AdminRole>().unwrap(), AdminRole::SuperAdmin);
        assert_eq!("MODERATOR".parse::<AdminRole>().unwrap(), AdminRole::Moderator);
        assert!("owner".parse::<AdminRole>().is_err());
    }
}
