//! Request DTOs and query strings.

use serde::{Deserialize, Serialize};

use jurist_entity::lawyer::{LawyerCategory, LawyerStatus};
use jurist_entity::request::RequestStatus;

/// Body of `PATCH /admin/lawyers/{id}/reject`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectLawyerRequest {
    /// Reason shown to the lawyer.
    pub reason: String,
}

/// Body of `PATCH /admin/requests/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequestStatus {
    /// Target status.
    pub status: RequestStatus,
}

/// Status filter on request listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestStatusQuery {
    /// Only requests in this status.
    pub status: Option<RequestStatus>,
}

/// Filters on `GET /admin/lawyers`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LawyerListQuery {
    /// Only profiles in this status.
    pub status: Option<LawyerStatus>,
    /// Only profiles in this category.
    pub category: Option<LawyerCategory>,
    /// Substring over name, e-mail and IIN.
    pub search: Option<String>,
}

/// Filters on `GET /admin/audit`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditQuery {
    /// Only entries with this action.
    pub action: Option<String>,
    /// Only entries with this target type.
    pub target_type: Option<String>,
}
