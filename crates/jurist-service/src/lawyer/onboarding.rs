//! Lawyer registration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use jurist_core::error::AppError;
use jurist_core::result::AppResult;
use jurist_core::traits::Clock;
use jurist_database::store::LawyerStore;
use jurist_entity::lawyer::{DocumentKind, LawyerCategory, LawyerProfile, NewLawyerProfile};
use jurist_entity::phone::normalize_phone;
use jurist_storage::DocumentStore;

use crate::notification::{NotificationDispatcher, log_failure};
use crate::validation::{validate_iin, validate_phone};

use super::documents::{
    DocumentUpload, delete_best_effort, ensure_distinct, store_all, urls_of,
};

/// Registration form fields. Identity and documents arrive separately.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterLawyer {
    /// Professional category.
    pub category: LawyerCategory,
    /// Full legal name.
    #[validate(length(min = 2, max = 200, message = "Full name must be between 2 and 200 characters"))]
    pub full_name: String,
    /// National identification number.
    #[validate(custom(function = "validate_iin"))]
    pub iin: String,
    /// Phone, in any form [`normalize_phone`] accepts.
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
}

/// Creates lawyer profiles for verified identity-provider accounts.
#[derive(Clone)]
pub struct OnboardingService {
    lawyers: Arc<dyn LawyerStore>,
    documents: Arc<dyn DocumentStore>,
    notifier: Arc<dyn NotificationDispatcher>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for OnboardingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnboardingService").finish_non_exhaustive()
    }
}

impl OnboardingService {
    /// Creates a new onboarding service.
    pub fn new(
        lawyers: Arc<dyn LawyerStore>,
        documents: Arc<dyn DocumentStore>,
        notifier: Arc<dyn NotificationDispatcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            lawyers,
            documents,
            notifier,
            clock,
        }
    }

    /// Registers a `PENDING` profile for the account `external_ref`.
    ///
    /// All three documents are required and stored before the profile is
    /// created. If creation fails afterwards the uploads are removed.
    pub async fn register(
        &self,
        external_ref: &str,
        email: &str,
        form: RegisterLawyer,
        uploads: Vec<DocumentUpload>,
    ) -> AppResult<LawyerProfile> {
        let form = RegisterLawyer {
            full_name: form.full_name.trim().to_string(),
            iin: form.iin.trim().to_string(),
            ..form
        };
        form.validate()?;

        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(AppError::invalid_field("email", "E-mail is required"));
        }

        ensure_distinct(&uploads)?;
        for kind in DocumentKind::ALL {
            if !uploads.iter().any(|u| u.kind == kind) {
                return Err(AppError::invalid_field(
                    kind.field_name(),
                    format!("{} is required", kind.field_name()),
                ));
            }
        }

        self.ensure_unique(external_ref, &email, &form.iin).await?;

        let stored = store_all(self.documents.as_ref(), uploads).await?;
        let url_of = |kind: DocumentKind| {
            stored
                .iter()
                .find(|(k, _)| *k == kind)
                .map(|(_, url)| url.clone())
                .unwrap_or_default()
        };

        let phone = normalize_phone(&form.phone).unwrap_or(form.phone);
        let new_profile = NewLawyerProfile {
            external_ref: external_ref.to_string(),
            email,
            category: form.category,
            full_name: form.full_name,
            iin: form.iin,
            phone,
            photo_url: url_of(DocumentKind::Photo),
            diploma_url: url_of(DocumentKind::Diploma),
            license_url: url_of(DocumentKind::License),
        };

        let profile = match self.lawyers.insert(&new_profile, self.clock.now()).await {
            Ok(profile) => profile,
            Err(e) => {
                delete_best_effort(self.documents.as_ref(), &urls_of(&stored)).await;
                return Err(e);
            }
        };

        info!(lawyer_id = %profile.id, category = %profile.category, "Lawyer registered");

        log_failure(
            "new_lawyer_for_admin",
            self.notifier
                .notify_admin_of_new_lawyer(
                    &profile.full_name,
                    &profile.email,
                    profile.category.as_str(),
                )
                .await,
        );

        Ok(profile)
    }

    /// Fails with `Conflict` before any upload when a unique key is taken.
    async fn ensure_unique(&self, external_ref: &str, email: &str, iin: &str) -> AppResult<()> {
        if self.lawyers.find_by_external_ref(external_ref).await?.is_some() {
            return Err(AppError::conflict("Account already has a lawyer profile"));
        }
        if self.lawyers.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }
        if self.lawyers.find_by_iin(iin).await?.is_some() {
            return Err(AppError::conflict("IIN already registered"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jurist_core::error::ErrorKind;
    use jurist_entity::lawyer::{DocumentKind, LawyerCategory, LawyerStatus};

    use super::RegisterLawyer;
    use crate::testing::{Harness, upload};

    fn form(iin: &str) -> RegisterLawyer {
        RegisterLawyer {
            category: LawyerCategory::Advocate,
            full_name: "  Aruzhan Sapar ".to_string(),
            iin: iin.to_string(),
            phone: "8 701 555 44 33".to_string(),
        }
    }

    fn all_documents() -> Vec<crate::lawyer::DocumentUpload> {
        DocumentKind::ALL.into_iter().map(upload).collect()
    }

    #[tokio::test]
    async fn test_register_creates_pending_profile() {
        let h = Harness::new();
        let profile = h
            .onboarding()
            .register("sub-new", "Aruzhan@Mail.KZ", form("900101300017"), all_documents())
            .await
            .unwrap();

        assert_eq!(profile.status, LawyerStatus::Pending);
        assert_eq!(profile.email, "aruzhan@mail.kz");
        assert_eq!(profile.full_name, "Aruzhan Sapar");
        assert_eq!(profile.phone, "+77015554433");
        assert!(!profile.email_verified);
        assert!(profile.photo_url.starts_with("mem://photos/"));
        assert!(profile.license_url.starts_with("mem://licenses/"));
        assert_eq!(
            h.notifier.events(),
            vec!["admin_lawyer:aruzhan@mail.kz:ADVOCATE".to_string()]
        );
    }

    #[tokio::test]
    async fn test_register_rejects_bad_iin_and_missing_documents() {
        let h = Harness::new();
        let onboarding = h.onboarding();

        let err = onboarding
            .register("sub-1", "a@mail.kz", form("900101300018"), all_documents())
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
        assert!(err.details.unwrap().get("iin").is_some());

        let err = onboarding
            .register(
                "sub-1",
                "a@mail.kz",
                form("900101300017"),
                vec![upload(DocumentKind::Photo), upload(DocumentKind::Diploma)],
            )
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
        assert!(h.documents.urls().is_empty());
    }

    #[tokio::test]
    async fn test_duplicates_conflict_before_upload() {
        let h = Harness::new();
        let onboarding = h.onboarding();
        onboarding
            .register("sub-1", "a@mail.kz", form("900101300017"), all_documents())
            .await
            .unwrap();
        let stored = h.documents.urls().len();

        let err = onboarding
            .register("sub-2", "A@MAIL.KZ", form("000000000101"), all_documents())
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Conflict));

        let err = onboarding
            .register("sub-3", "b@mail.kz", form("900101300017"), all_documents())
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
        assert_eq!(h.documents.urls().len(), stored);
    }

    #[tokio::test]
    async fn test_register_runs_on_spawned_task() {
        let h = Harness::new();
        let onboarding = h.onboarding();
        let profile = tokio::spawn(async move {
            onboarding
                .register("sub-spawned", "s@mail.kz", form("900101300017"), all_documents())
                .await
        })
        .await
        .unwrap()
        .unwrap();
        assert_eq!(profile.external_ref, "sub-spawned");
        assert_eq!(h.documents.urls().len(), 3);
    }

    #[tokio::test]
    async fn test_storage_failure_cleans_up() {
        let h = Harness::new();
        h.documents.fail_on("licenses");
        let err = h
            .onboarding()
            .register("sub-1", "a@mail.kz", form("900101300017"), all_documents())
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::DependencyFailure));
        assert!(h.documents.urls().is_empty());
        assert_eq!(h.notifier.count("admin_lawyer:"), 0);
    }
}
