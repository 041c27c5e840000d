//! Dashboard figures.

use axum::Json;
use axum::extract::State;

use jurist_service::DashboardStats;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AdminCaller;
use crate::state::AppState;

/// GET /api/admin/stats
pub async fn dashboard(
    State(state): State<AppState>,
    _admin: AdminCaller,
) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    let stats = state.stats.dashboard().await?;
    Ok(Json(ApiResponse::ok(stats)))
}
