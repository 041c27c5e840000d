//! Lawyer moderation handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use jurist_core::types::{LawyerId, PageResponse};
use jurist_database::store::LawyerFilter;
use jurist_entity::lawyer::LawyerProfile;

use crate::dto::request::{LawyerListQuery, RejectLawyerRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AdminCaller, ClientInfo, PaginationParams, parse_id};
use crate::state::AppState;

/// GET /api/admin/lawyers?status=PENDING&category=ADVOCATE&search=...
pub async fn list_lawyers(
    State(state): State<AppState>,
    _admin: AdminCaller,
    Query(query): Query<LawyerListQuery>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<LawyerProfile>>>, ApiError> {
    let filter = LawyerFilter {
        status: query.status,
        category: query.category,
        search: query.search.filter(|s| !s.trim().is_empty()),
    };
    let page = params.into_page_request(state.config.requests.default_page_size);
    let result = state.moderation.list(&filter, &page).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/admin/lawyers/{id}
pub async fn get_lawyer(
    State(state): State<AppState>,
    _admin: AdminCaller,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<LawyerProfile>>, ApiError> {
    let lawyer_id: LawyerId = parse_id(&id, "lawyer")?;
    let profile = state.moderation.get(lawyer_id).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// PATCH /api/admin/lawyers/{id}/approve
pub async fn approve_lawyer(
    State(state): State<AppState>,
    AdminCaller(admin_id): AdminCaller,
    client: ClientInfo,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<LawyerProfile>>, ApiError> {
    let lawyer_id: LawyerId = parse_id(&id, "lawyer")?;
    let profile = state
        .moderation
        .approve(admin_id, lawyer_id, &client.actor_context())
        .await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// PATCH /api/admin/lawyers/{id}/reject
pub async fn reject_lawyer(
    State(state): State<AppState>,
    AdminCaller(admin_id): AdminCaller,
    client: ClientInfo,
    Path(id): Path<String>,
    Json(body): Json<RejectLawyerRequest>,
) -> Result<Json<ApiResponse<LawyerProfile>>, ApiError> {
    let lawyer_id: LawyerId = parse_id(&id, "lawyer")?;
    let profile = state
        .moderation
        .reject(admin_id, lawyer_id, &body.reason, &client.actor_context())
        .await?;
    Ok(Json(ApiResponse::ok(profile)))
}
