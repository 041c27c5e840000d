//! Audit log handlers.

use axum::Json;
use axum::extract::{Query, State};

use jurist_core::types::PageResponse;
use jurist_database::store::AuditFilter;
use jurist_entity::audit::AuditLogEntry;

use crate::dto::request::AuditQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AdminCaller, PaginationParams};
use crate::state::AppState;

/// GET /api/admin/audit?action=...&targetType=...
pub async fn list_audit(
    State(state): State<AppState>,
    _admin: AdminCaller,
    Query(filters): Query<AuditQuery>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<AuditLogEntry>>>, ApiError> {
    let filter = AuditFilter {
        action: filters.action,
        target_type: filters.target_type,
    };
    let page = params.into_page_request(state.config.requests.default_page_size);
    let result = state.audit.list(&filter, &page).await?;
    Ok(Json(ApiResponse::ok(result)))
}
