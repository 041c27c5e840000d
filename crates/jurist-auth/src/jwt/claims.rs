//! Identity-provider token claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account kind the identity provider stamps into `user_metadata`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// A lawyer account.
    Lawyer,
    /// An administrator account.
    Admin,
}

/// Free-form metadata attached to the identity-provider account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    /// Declared account kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
}

/// Claims carried by an identity-provider access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the identity-provider account ID.
    pub sub: String,
    /// Account e-mail.
    #[serde(default)]
    pub email: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issued-at timestamp (seconds since epoch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Audience.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    /// When the identity provider confirmed the e-mail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_confirmed_at: Option<DateTime<Utc>>,
    /// Account metadata.
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl Claims {
    /// Declared account kind, if any.
    pub fn user_type(&self) -> Option<UserType> {
        self.user_metadata.user_type
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
