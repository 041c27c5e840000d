//! Client submission and the lawyer-facing request pool.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, warn};
use validator::Validate;

use jurist_core::config::RequestsConfig;
use jurist_core::error::{AppError, ErrorKind};
use jurist_core::result::AppResult;
use jurist_core::traits::Clock;
use jurist_core::types::{LawyerId, PageRequest, PageResponse, RequestId};
use jurist_database::store::{LawyerStore, RequestStore, SubmissionQuota};
use jurist_entity::request::{Request, RequestStatus, RequestSummary, local_day};

use crate::lawyer::require_approved;
use crate::notification::{NotificationDispatcher, budget_label, log_failure};

use super::dto::SubmitRequest;

/// Request intake plus claim and release for approved lawyers.
#[derive(Clone)]
pub struct RequestService {
    requests: Arc<dyn RequestStore>,
    lawyers: Arc<dyn LawyerStore>,
    notifier: Arc<dyn NotificationDispatcher>,
    clock: Arc<dyn Clock>,
    config: RequestsConfig,
}

impl std::fmt::Debug for RequestService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestService")
            .field("config", &self.config)
            .finish()
    }
}

impl RequestService {
    /// Creates a new request service.
    pub fn new(
        requests: Arc<dyn RequestStore>,
        lawyers: Arc<dyn LawyerStore>,
        notifier: Arc<dyn NotificationDispatcher>,
        clock: Arc<dyn Clock>,
        config: RequestsConfig,
    ) -> Self {
        Self {
            requests,
            lawyers,
            notifier,
            clock,
            config,
        }
    }

    /// Accepts a client submission from `source_ip`.
    ///
    /// Fails with `Validation` on malformed input and with `RateLimited`
    /// when the IP already submitted `rate_limit_max` requests inside the
    /// trailing window. Notifications are published after the insert and
    /// never fail the submission.
    pub async fn submit(&self, input: SubmitRequest, source_ip: &str) -> AppResult<Request> {
        let input = input.normalized();
        input.validate()?;

        let now = self.clock.now();
        let quota = SubmissionQuota {
            window_start: now - Duration::minutes(i64::from(self.config.rate_limit_window_minutes)),
            max_in_window: self.config.rate_limit_max,
            day: local_day(now, self.config.local_offset()),
            now,
        };

        let request = self
            .requests
            .insert_throttled(&input.into_new_request(source_ip), quota)
            .await
            .inspect_err(|e| {
                if e.is(ErrorKind::RateLimited) {
                    warn!(ip = source_ip, "Submission throttled");
                }
            })?;

        info!(
            request_id = %request.id,
            request_number = %request.request_number,
            "Request submitted"
        );

        self.publish_submission(&request).await;
        Ok(request)
    }

    async fn publish_submission(&self, request: &Request) {
        if let Some(email) = &request.email {
            log_failure(
                "request_confirmation",
                self.notifier
                    .send_request_confirmation(email, &request.contact_name, &request.request_number)
                    .await,
            );
        }

        match self.lawyers.approved_emails().await {
            Ok(emails) if !emails.is_empty() => log_failure(
                "new_request_for_lawyers",
                self.notifier
                    .notify_lawyers_of_new_request(
                        &emails,
                        &request.request_number,
                        &request.description,
                        &budget_label(request.budget, request.currency),
                    )
                    .await,
            ),
            Ok(_) => debug!(request_id = %request.id, "No approved lawyers to notify"),
            Err(e) => warn!(error = %e, "Failed to load approved lawyer e-mails"),
        }

        log_failure(
            "new_request_for_admin",
            self.notifier
                .notify_admin_of_new_request(
                    &request.request_number,
                    &request.contact_name,
                    &request.description,
                )
                .await,
        );
    }

    /// Unassigned requests in the pool, newest first, without contact data.
    ///
    /// `status` defaults to `NEW`. Asking for `SPAM` or `CLOSED` is
    /// `Forbidden`.
    pub async fn list_available(
        &self,
        lawyer_id: LawyerId,
        status: Option<RequestStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<RequestSummary>> {
        require_approved(self.lawyers.as_ref(), lawyer_id, "view requests").await?;

        let status = status.unwrap_or(RequestStatus::New);
        if !status.is_visible_to_lawyers() {
            return Err(AppError::forbidden(format!(
                "{status} requests are not available to lawyers"
            )));
        }

        let page = self.requests.list_unassigned(status, page).await?;
        Ok(page.map(|r| r.summary()))
    }

    /// Full request, including contact data, for an approved lawyer.
    pub async fn details(&self, lawyer_id: LawyerId, request_id: RequestId) -> AppResult<Request> {
        require_approved(self.lawyers.as_ref(), lawyer_id, "view requests").await?;

        let request = self.find(request_id).await?;
        if !request.status.is_visible_to_lawyers() {
            return Err(AppError::forbidden("This request is no longer available"));
        }
        Ok(request)
    }

    /// Atomically assigns a `NEW`, unassigned request to the caller.
    ///
    /// A lost race or an already-taken request is `Conflict`.
    pub async fn claim(&self, lawyer_id: LawyerId, request_id: RequestId) -> AppResult<Request> {
        require_approved(self.lawyers.as_ref(), lawyer_id, "take requests").await?;

        match self
            .requests
            .try_claim(request_id, lawyer_id, self.clock.now())
            .await?
        {
            Some(request) => {
                info!(request_id = %request_id, lawyer_id = %lawyer_id, "Request claimed");
                Ok(request)
            }
            None => {
                // Distinguish an absent request from a lost race.
                let current = self.find(request_id).await?;
                debug!(
                    request_id = %request_id,
                    status = %current.status,
                    "Claim refused"
                );
                Err(AppError::conflict(
                    "This request is no longer available for taking",
                ))
            }
        }
    }

    /// Returns a request held by the caller to the pool.
    pub async fn release(&self, lawyer_id: LawyerId, request_id: RequestId) -> AppResult<Request> {
        require_approved(self.lawyers.as_ref(), lawyer_id, "manage requests").await?;

        match self
            .requests
            .try_release(request_id, lawyer_id, self.clock.now())
            .await?
        {
            Some(request) => {
                info!(request_id = %request_id, lawyer_id = %lawyer_id, "Request released");
                Ok(request)
            }
            None => {
                self.find(request_id).await?;
                Err(AppError::forbidden(
                    "You can only release requests assigned to you",
                ))
            }
        }
    }

    /// Requests assigned to the caller, most recently claimed first.
    pub async fn my_requests(
        &self,
        lawyer_id: LawyerId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Request>> {
        require_approved(self.lawyers.as_ref(), lawyer_id, "view requests").await?;
        self.requests.list_assigned_to(lawyer_id, page).await
    }

    async fn find(&self, request_id: RequestId) -> AppResult<Request> {
        self.requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found("Request not found"))
    }
}
