//! Public request intake.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use jurist_service::SubmitRequest;

use crate::dto::response::{ApiResponse, SubmissionReceipt};
use crate::error::ApiError;
use crate::extractors::ClientInfo;
use crate::state::AppState;

/// POST /api/requests
pub async fn submit_request(
    State(state): State<AppState>,
    client: ClientInfo,
    Json(body): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SubmissionReceipt>>), ApiError> {
    let request = state.requests.submit(body, &client.ip).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(SubmissionReceipt::from(request))),
    ))
}
