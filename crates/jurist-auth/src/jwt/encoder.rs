//! Identity-token signing.
//!
//! Production tokens are minted by the identity provider. The encoder is
//! used by development tooling and tests that need tokens the decoder
//! accepts.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use jurist_core::config::AuthConfig;
use jurist_core::error::AppError;

use super::claims::{Claims, UserMetadata, UserType};

/// Creates signed HS256 tokens with the shared secret.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Audience stamped into issued tokens.
    audience: String,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("audience", &self.audience)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            audience: config.audience.clone(),
        }
    }

    /// Signs arbitrary claims.
    pub fn encode(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }

    /// Issues a token for an identity-provider account.
    pub fn issue(
        &self,
        subject: &str,
        email: &str,
        user_type: Option<UserType>,
        email_confirmed_at: Option<DateTime<Utc>>,
        ttl: Duration,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            email: email.to_string(),
            exp: (now + ttl).timestamp(),
            iat: Some(now.timestamp()),
            aud: (!self.audience.is_empty()).then(|| self.audience.clone()),
            email_confirmed_at,
            user_metadata: UserMetadata { user_type },
        };
        self.encode(&claims)
    }
}
