//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jurist_core::types::RequestId;
use jurist_entity::request::{Request, RequestStatus};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// What a client gets back after submitting a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    /// Confirmation text.
    pub message: String,
    /// Request ID.
    pub id: RequestId,
    /// Human-readable number.
    pub request_number: String,
    /// Always `NEW`.
    pub status: RequestStatus,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

impl From<Request> for SubmissionReceipt {
    fn from(request: Request) -> Self {
        Self {
            message: "Your request has been received".to_string(),
            id: request.id,
            request_number: request.request_number,
            status: request.status,
            created_at: request.created_at,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Uptime.
    pub uptime_seconds: u64,
}
