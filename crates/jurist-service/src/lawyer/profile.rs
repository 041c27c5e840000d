//! A lawyer's own profile.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use jurist_core::error::AppError;
use jurist_core::result::AppResult;
use jurist_core::traits::Clock;
use jurist_core::types::LawyerId;
use jurist_database::store::LawyerStore;
use jurist_entity::lawyer::{LawyerProfile, LawyerProfileUpdate};
use jurist_entity::phone::normalize_phone;

use crate::validation::validate_phone;

/// Editable profile fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    /// New full name.
    #[validate(length(min = 2, max = 200, message = "Full name must be between 2 and 200 characters"))]
    pub full_name: Option<String>,
    /// New phone.
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
}

/// Reads and edits the caller's own profile.
#[derive(Clone)]
pub struct ProfileService {
    lawyers: Arc<dyn LawyerStore>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ProfileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileService").finish_non_exhaustive()
    }
}

impl ProfileService {
    /// Creates a new profile service.
    pub fn new(lawyers: Arc<dyn LawyerStore>, clock: Arc<dyn Clock>) -> Self {
        Self { lawyers, clock }
    }

    /// The caller's profile.
    pub async fn get(&self, lawyer_id: LawyerId) -> AppResult<LawyerProfile> {
        self.lawyers
            .find_by_id(lawyer_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found"))
    }

    /// Applies an edit. An empty edit returns the profile unchanged.
    pub async fn update(&self, lawyer_id: LawyerId, input: UpdateProfile) -> AppResult<LawyerProfile> {
        let input = UpdateProfile {
            full_name: input.full_name.map(|n| n.trim().to_string()),
            phone: input.phone,
        };
        input.validate()?;

        let update = LawyerProfileUpdate {
            full_name: input.full_name,
            phone: input.phone.and_then(|p| normalize_phone(&p)),
        };
        if update.is_empty() {
            return self.get(lawyer_id).await;
        }

        let profile = self
            .lawyers
            .update_profile(lawyer_id, &update, self.clock.now())
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found"))?;

        info!(lawyer_id = %lawyer_id, "Profile updated");
        Ok(profile)
    }
}
