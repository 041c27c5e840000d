//! Administrator request management.

use axum::Json;
use axum::extract::{Path, Query, State};

use jurist_core::types::{PageResponse, RequestId};
use jurist_entity::request::Request;

use crate::dto::request::{RequestStatusQuery, UpdateRequestStatus};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AdminCaller, ClientInfo, PaginationParams, parse_id};
use crate::state::AppState;

/// GET /api/admin/requests?status=...
pub async fn list_requests(
    State(state): State<AppState>,
    _admin: AdminCaller,
    Query(filter): Query<RequestStatusQuery>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Request>>>, ApiError> {
    let page = params.into_page_request(state.config.requests.default_page_size);
    let result = state.admin_requests.list(filter.status, &page).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/admin/requests/{id}
pub async fn get_request(
    State(state): State<AppState>,
    _admin: AdminCaller,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Request>>, ApiError> {
    let request_id: RequestId = parse_id(&id, "request")?;
    let request = state.admin_requests.get(request_id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// PATCH /api/admin/requests/{id}
pub async fn update_status(
    State(state): State<AppState>,
    AdminCaller(admin_id): AdminCaller,
    client: ClientInfo,
    Path(id): Path<String>,
    Json(body): Json<UpdateRequestStatus>,
) -> Result<Json<ApiResponse<Request>>, ApiError> {
    let request_id: RequestId = parse_id(&id, "request")?;
    let request = state
        .admin_requests
        .set_status(admin_id, request_id, body.status, &client.actor_context())
        .await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// DELETE /api/admin/requests/{id}
pub async fn delete_request(
    State(state): State<AppState>,
    AdminCaller(admin_id): AdminCaller,
    client: ClientInfo,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let request_id: RequestId = parse_id(&id, "request")?;
    state
        .admin_requests
        .delete(admin_id, request_id, &client.actor_context())
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Request deleted".to_string(),
    })))
}
