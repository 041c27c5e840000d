//! Bearer token → [`Principal`] resolution.

use std::sync::Arc;

use tracing::{debug, info, warn};

use jurist_core::error::AppError;
use jurist_database::store::{AdminStore, LawyerStore};
use jurist_entity::admin::AdminUser;
use jurist_entity::lawyer::LawyerProfile;

use crate::jwt::{JwtDecoder, UserType};
use crate::principal::{Identity, Principal};

/// Turns identity-provider tokens into marketplace principals.
#[derive(Clone)]
pub struct PrincipalResolver {
    decoder: Arc<JwtDecoder>,
    lawyers: Arc<dyn LawyerStore>,
    admins: Arc<dyn AdminStore>,
}

impl std::fmt::Debug for PrincipalResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrincipalResolver")
            .field("decoder", &self.decoder)
            .finish()
    }
}

impl PrincipalResolver {
    /// Creates a resolver over the profile and administrator stores.
    pub fn new(
        decoder: Arc<JwtDecoder>,
        lawyers: Arc<dyn LawyerStore>,
        admins: Arc<dyn AdminStore>,
    ) -> Self {
        Self {
            decoder,
            lawyers,
            admins,
        }
    }

    /// Verifies a token without requiring a profile.
    ///
    /// Used by registration, which runs before the profile exists.
    pub fn identity(&self, token: &str) -> Result<Identity, AppError> {
        let identity = Identity::from(self.decoder.decode(token)?);
        if identity.email.is_empty() {
            return Err(AppError::authentication("Token carries no e-mail"));
        }
        Ok(identity)
    }

    /// Resolves a token into a lawyer or administrator.
    ///
    /// A declared `user_type` limits the lookup to that kind; without one
    /// lawyer profiles are tried first. An account with neither profile
    /// fails with `Authentication`.
    pub async fn resolve(&self, token: &str) -> Result<Principal, AppError> {
        let identity = Identity::from(self.decoder.decode(token)?);

        let principal = match identity.user_type {
            Some(UserType::Admin) => self.resolve_admin(&identity).await?,
            Some(UserType::Lawyer) => self.resolve_lawyer(&identity).await?,
            None => match self.resolve_lawyer(&identity).await? {
                Some(p) => Some(p),
                None => self.resolve_admin(&identity).await?,
            },
        };

        principal.ok_or_else(|| {
            debug!(external_ref = %identity.external_ref, "Token subject has no account");
            AppError::authentication("No marketplace account for this identity")
        })
    }

    async fn resolve_lawyer(&self, identity: &Identity) -> Result<Option<Principal>, AppError> {
        let Some(profile) = self
            .lawyers
            .find_by_external_ref(&identity.external_ref)
            .await?
        else {
            return Ok(None);
        };

        let profile = self.sync_email_verification(profile, identity).await?;
        Ok(Some(Principal::Lawyer {
            id: profile.id,
            status: profile.status,
        }))
    }

    async fn resolve_admin(&self, identity: &Identity) -> Result<Option<Principal>, AppError> {
        let Some(admin) = self
            .admins
            .find_by_external_ref(&identity.external_ref)
            .await?
        else {
            return Ok(None);
        };

        Self::ensure_active(&admin)?;
        Ok(Some(Principal::Admin {
            id: admin.id,
            role: admin.role,
        }))
    }

    fn ensure_active(admin: &AdminUser) -> Result<(), AppError> {
        if admin.is_active {
            Ok(())
        } else {
            warn!(admin_id = %admin.id, "Inactive administrator presented a token");
            Err(AppError::authentication("Administrator account is disabled"))
        }
    }

    /// Marks the profile e-mail verified once the provider confirms it.
    async fn sync_email_verification(
        &self,
        profile: LawyerProfile,
        identity: &Identity,
    ) -> Result<LawyerProfile, AppError> {
        let Some(at) = identity.email_confirmed_at else {
            return Ok(profile);
        };
        if profile.email_verified {
            return Ok(profile);
        }

        match self.lawyers.mark_email_verified(profile.id, at).await? {
            Some(updated) => {
                info!(lawyer_id = %updated.id, "Lawyer e-mail verified");
                Ok(updated)
            }
            // Someone else marked it first.
            None => Ok(profile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, TimeZone, Utc};
    use jurist_core::config::AuthConfig;
    use jurist_core::error::ErrorKind;
    use jurist_database::memory::{MemoryAdminStore, MemoryLawyerStore};
    use jurist_entity::admin::{AdminRole, NewAdminUser};
    use jurist_entity::lawyer::{LawyerCategory, LawyerStatus, NewLawyerProfile};

    use crate::jwt::JwtEncoder;

    struct Fixture {
        resolver: PrincipalResolver,
        encoder: JwtEncoder,
        lawyers: Arc<MemoryLawyerStore>,
        admins: Arc<MemoryAdminStore>,
    }

    fn fixture() -> Fixture {
        let config = AuthConfig {
            jwt_secret: "resolver-secret".to_string(),
            ..AuthConfig::default()
        };
        let lawyers = Arc::new(MemoryLawyerStore::new());
        let admins = Arc::new(MemoryAdminStore::new());
        Fixture {
            resolver: PrincipalResolver::new(
                Arc::new(JwtDecoder::new(&config)),
                lawyers.clone(),
                admins.clone(),
            ),
            encoder: JwtEncoder::new(&config),
            lawyers,
            admins,
        }
    }

    fn new_profile(external_ref: &str) -> NewLawyerProfile {
        NewLawyerProfile {
            external_ref: external_ref.to_string(),
            email: "lawyer@jurist.kz".to_string(),
            category: LawyerCategory::Advocate,
            full_name: "Aruzhan Sapar".to_string(),
            iin: "900101300017".to_string(),
            phone: "+77011234567".to_string(),
            photo_url: "http://files/photos/a.jpg".to_string(),
            diploma_url: "http://files/diplomas/a.pdf".to_string(),
            license_url: "http://files/licenses/a.pdf".to_string(),
        }
    }

    #[tokio::test]
    async fn test_lawyer_resolution_syncs_email_verification() {
        let f = fixture();
        let profile = f.lawyers.insert(&new_profile("sub-l"), Utc::now()).await.unwrap();
        let confirmed = Utc.with_ymd_and_hms(2025, 2, 28, 12, 0, 0).unwrap();

        let token = f
            .encoder
            .issue("sub-l", "lawyer@jurist.kz", Some(UserType::Lawyer), Some(confirmed), Duration::minutes(5))
            .unwrap();
        let principal = f.resolver.resolve(&token).await.unwrap();

        assert_eq!(
            principal,
            Principal::Lawyer {
                id: profile.id,
                status: LawyerStatus::Pending
            }
        );
        let stored = f.lawyers.find_by_id(profile.id).await.unwrap().unwrap();
        assert!(stored.email_verified);
        assert_eq!(stored.email_verified_at, Some(confirmed));
    }

    #[tokio::test]
    async fn test_unknown_subject_is_unauthenticated() {
        let f = fixture();
        let token = f
            .encoder
            .issue("nobody", "x@y.kz", None, None, Duration::minutes(5))
            .unwrap();
        let err = f.resolver.resolve(&token).await.unwrap_err();
        assert!(err.is(ErrorKind::Authentication));

        // Registration still accepts the bare identity.
        let identity = f.resolver.identity(&token).unwrap();
        assert_eq!(identity.external_ref, "nobody");
    }

    #[tokio::test]
    async fn test_inactive_admin_is_rejected() {
        let f = fixture();
        let admin = f
            .admins
            .insert(
                &NewAdminUser {
                    external_ref: "sub-a".to_string(),
                    email: "admin@jurist.kz".to_string(),
                    full_name: "Admin".to_string(),
                    role: AdminRole::SuperAdmin,
                },
                Utc::now(),
            )
            .await
            .unwrap();
        let token = f
            .encoder
            .issue("sub-a", "admin@jurist.kz", Some(UserType::Admin), None, Duration::minutes(5))
            .unwrap();

        assert!(matches!(
            f.resolver.resolve(&token).await.unwrap(),
            Principal::Admin { id, .. } if id == admin.id
        ));

        f.admins.set_active(admin.id, false).await;
        let err = f.resolver.resolve(&token).await.unwrap_err();
        assert!(err.is(ErrorKind::Authentication));
    }

    #[tokio::test]
    async fn test_declared_type_limits_lookup() {
        let f = fixture();
        f.lawyers.insert(&new_profile("sub-x"), Utc::now()).await.unwrap();
        let token = f
            .encoder
            .issue("sub-x", "lawyer@jurist.kz", Some(UserType::Admin), None, Duration::minutes(5))
            .unwrap();
        assert!(f.resolver.resolve(&token).await.is_err());
    }
}
