//! Lawyer onboarding, profile, and moderation services.

pub mod documents;
pub mod moderation;
pub mod onboarding;
pub mod profile;

pub use documents::DocumentUpload;
pub use moderation::ModerationService;
pub use onboarding::{OnboardingService, RegisterLawyer};
pub use profile::{ProfileService, UpdateProfile};

use jurist_core::error::AppError;
use jurist_core::result::AppResult;
use jurist_core::types::LawyerId;
use jurist_database::store::LawyerStore;
use jurist_entity::lawyer::LawyerProfile;

/// Re-reads the profile and requires it to be `APPROVED`.
///
/// Called at the start of every pool operation; status is never cached.
pub(crate) async fn require_approved(
    lawyers: &dyn LawyerStore,
    lawyer_id: LawyerId,
    action: &str,
) -> AppResult<LawyerProfile> {
    match lawyers.find_by_id(lawyer_id).await? {
        Some(profile) if profile.status.can_access_pool() => Ok(profile),
        _ => Err(AppError::forbidden(format!(
            "You must be approved to {action}"
        ))),
    }
}
