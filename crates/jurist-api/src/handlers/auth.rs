//! Lawyer registration.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;

use jurist_core::error::AppError;
use jurist_entity::lawyer::{LawyerCategory, LawyerProfile};
use jurist_service::RegisterLawyer;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::VerifiedIdentity;
use crate::handlers::upload::UploadForm;
use crate::state::AppState;

/// POST /api/auth/register (multipart: category, fullName, iin, phone,
/// photo, diploma, license)
pub async fn register(
    State(state): State<AppState>,
    VerifiedIdentity(identity): VerifiedIdentity,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<LawyerProfile>>), ApiError> {
    let form = UploadForm::read(multipart).await?;

    let category = form.text("category", "category")?;
    let category = LawyerCategory::from_str(category.trim())
        .map_err(|_| AppError::invalid_field("category", format!("Unknown category: {category}")))?;

    let registration = RegisterLawyer {
        category,
        full_name: form.text("fullName", "full_name")?,
        iin: form.text("iin", "iin")?,
        phone: form.text("phone", "phone")?,
    };

    let profile = state
        .onboarding
        .register(
            &identity.external_ref,
            &identity.email,
            registration,
            form.documents,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(profile))))
}
