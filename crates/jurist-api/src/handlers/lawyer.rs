//! Lawyer self-service and the request marketplace.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};

use jurist_core::types::{PageResponse, RequestId};
use jurist_entity::lawyer::LawyerProfile;
use jurist_entity::request::{Request, RequestSummary};
use jurist_service::UpdateProfile;

use crate::dto::request::RequestStatusQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{LawyerCaller, PaginationParams, parse_id};
use crate::handlers::upload::UploadForm;
use crate::state::AppState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// GET /api/lawyer/profile
pub async fn get_profile(
    State(state): State<AppState>,
    LawyerCaller(lawyer_id): LawyerCaller,
) -> ApiResult<LawyerProfile> {
    let profile = state.profiles.get(lawyer_id).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// PATCH /api/lawyer/profile
pub async fn update_profile(
    State(state): State<AppState>,
    LawyerCaller(lawyer_id): LawyerCaller,
    Json(body): Json<UpdateProfile>,
) -> ApiResult<LawyerProfile> {
    let profile = state.profiles.update(lawyer_id, body).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// POST /api/lawyer/documents (multipart: any of photo, diploma, license)
pub async fn resubmit_documents(
    State(state): State<AppState>,
    LawyerCaller(lawyer_id): LawyerCaller,
    multipart: Multipart,
) -> ApiResult<LawyerProfile> {
    let form = UploadForm::read(multipart).await?;
    let profile = state
        .moderation
        .resubmit_documents(lawyer_id, form.documents)
        .await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// GET /api/lawyer/requests?status=NEW
pub async fn list_available(
    State(state): State<AppState>,
    LawyerCaller(lawyer_id): LawyerCaller,
    Query(filter): Query<RequestStatusQuery>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<PageResponse<RequestSummary>> {
    let page = params.into_page_request(state.config.requests.default_page_size);
    let result = state
        .requests
        .list_available(lawyer_id, filter.status, &page)
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/lawyer/requests/{id}
pub async fn get_request(
    State(state): State<AppState>,
    LawyerCaller(lawyer_id): LawyerCaller,
    Path(id): Path<String>,
) -> ApiResult<Request> {
    let request_id: RequestId = parse_id(&id, "request")?;
    let request = state.requests.details(lawyer_id, request_id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// POST /api/lawyer/requests/{id}/take
pub async fn take_request(
    State(state): State<AppState>,
    LawyerCaller(lawyer_id): LawyerCaller,
    Path(id): Path<String>,
) -> ApiResult<Request> {
    let request_id: RequestId = parse_id(&id, "request")?;
    let request = state.requests.claim(lawyer_id, request_id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// POST /api/lawyer/requests/{id}/release
pub async fn release_request(
    State(state): State<AppState>,
    LawyerCaller(lawyer_id): LawyerCaller,
    Path(id): Path<String>,
) -> ApiResult<Request> {
    let request_id: RequestId = parse_id(&id, "request")?;
    let request = state.requests.release(lawyer_id, request_id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// GET /api/lawyer/my-requests
pub async fn my_requests(
    State(state): State<AppState>,
    LawyerCaller(lawyer_id): LawyerCaller,
    Query(params): Query<PaginationParams>,
) -> ApiResult<PageResponse<Request>> {
    let page = params.into_page_request(state.config.requests.default_page_size);
    let result = state.requests.my_requests(lawyer_id, &page).await?;
    Ok(Json(ApiResponse::ok(result)))
}
