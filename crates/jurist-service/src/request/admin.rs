//! Administrator view of requests: unrestricted reads, status override and
//! deletion, all audited.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use jurist_core::error::AppError;
use jurist_core::result::AppResult;
use jurist_core::traits::Clock;
use jurist_core::types::{AdminId, PageRequest, PageResponse, RequestId};
use jurist_database::store::RequestStore;
use jurist_entity::audit::{ActorKind, actions, targets};
use jurist_entity::request::{Request, RequestStatus};

use crate::audit::{AuditEvent, AuditRecorder};
use crate::context::ActorContext;

/// Request administration.
#[derive(Clone)]
pub struct AdminRequestService {
    requests: Arc<dyn RequestStore>,
    audit: AuditRecorder,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for AdminRequestService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminRequestService")
            .field("audit", &self.audit)
            .finish()
    }
}

impl AdminRequestService {
    /// Creates a new admin request service.
    pub fn new(requests: Arc<dyn RequestStore>, audit: AuditRecorder, clock: Arc<dyn Clock>) -> Self {
        Self {
            requests,
            audit,
            clock,
        }
    }

    /// All requests, optionally by status, newest first.
    pub async fn list(
        &self,
        status: Option<RequestStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Request>> {
        self.requests.list_all(status, page).await
    }

    /// Any request, regardless of status.
    pub async fn get(&self, request_id: RequestId) -> AppResult<Request> {
        self.requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found("Request not found"))
    }

    /// Overrides the status of a request.
    ///
    /// Any status other than `IN_PROGRESS` clears the assignment.
    /// `IN_PROGRESS` is only accepted for a request that already has an
    /// assignee.
    pub async fn set_status(
        &self,
        admin_id: AdminId,
        request_id: RequestId,
        status: RequestStatus,
        ctx: &ActorContext,
    ) -> AppResult<Request> {
        let previous = self.get(request_id).await?;
        if status.requires_assignee() && previous.assigned_lawyer_id.is_none() {
            return Err(AppError::invalid_field(
                "status",
                "IN_PROGRESS requires an assigned lawyer; let a lawyer take the request instead",
            ));
        }

        let updated = match self
            .requests
            .override_status(request_id, status, self.clock.now())
            .await?
        {
            Some(updated) => updated,
            None => {
                // The assignment was released between the read and the write.
                self.get(request_id).await?;
                return Err(AppError::invalid_field(
                    "status",
                    "IN_PROGRESS requires an assigned lawyer",
                ));
            }
        };

        info!(
            request_id = %request_id,
            admin_id = %admin_id,
            from = %previous.status,
            to = %status,
            "Request status overridden"
        );

        self.audit
            .record_after_commit(
                AuditEvent {
                    actor_id: admin_id.into_uuid(),
                    actor_kind: ActorKind::Admin,
                    action: actions::UPDATE_REQUEST_STATUS,
                    target_type: targets::REQUEST,
                    target_id: request_id.into_uuid(),
                    details: Some(json!({
                        "previousStatus": previous.status,
                        "newStatus": status,
                        "previousAssignee": previous.assigned_lawyer_id,
                    })),
                },
                ctx,
            )
            .await;

        Ok(updated)
    }

    /// Deletes a request. The audit entry is written first; if it cannot
    /// be written the request is kept.
    pub async fn delete(
        &self,
        admin_id: AdminId,
        request_id: RequestId,
        ctx: &ActorContext,
    ) -> AppResult<()> {
        let request = self.get(request_id).await?;

        self.audit
            .record(
                AuditEvent {
                    actor_id: admin_id.into_uuid(),
                    actor_kind: ActorKind::Admin,
                    action: actions::DELETE_REQUEST,
                    target_type: targets::REQUEST,
                    target_id: request_id.into_uuid(),
                    details: Some(json!({
                        "requestNumber": request.request_number,
                        "status": request.status,
                    })),
                },
                ctx,
            )
            .await?;

        if !self.requests.delete(request_id).await? {
            return Err(AppError::not_found("Request not found"));
        }

        info!(request_id = %request_id, admin_id = %admin_id, "Request deleted");
        Ok(())
    }
}
