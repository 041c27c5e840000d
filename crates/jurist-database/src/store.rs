//! Persistence contracts the service layer depends on.
//!
//! Every trait has a PostgreSQL implementation in [`crate::repositories`]
//! and an in-memory one in [`crate::memory`]. Both must honour the same
//! atomicity guarantees: a claim or release either applies completely or
//! not at all, and a throttled insert counts, numbers and inserts as one
//! unit per source IP.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use jurist_core::result::AppResult;
use jurist_core::types::{AdminId, JobId, LawyerId, PageRequest, PageResponse, RequestId};
use jurist_entity::admin::{AdminUser, NewAdminUser};
use jurist_entity::audit::{AuditLogEntry, CreateAuditLogEntry};
use jurist_entity::job::{CreateJob, Job};
use jurist_entity::lawyer::{
    LawyerCategory, LawyerProfile, LawyerProfileUpdate, LawyerStatus, NewLawyerProfile,
};
use jurist_entity::request::{NewRequest, Request, RequestStatus};

/// Submission throttle and numbering parameters for one insert.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionQuota {
    /// Submissions from the same IP created after this instant count.
    pub window_start: DateTime<Utc>,
    /// Maximum submissions allowed inside the window.
    pub max_in_window: u32,
    /// Local calendar day the request number is allocated from.
    pub day: NaiveDate,
    /// Creation timestamp of the new request.
    pub now: DateTime<Utc>,
}

/// Aggregate request counts for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestCounts {
    /// All requests.
    pub total: u64,
    /// Created at or after the "today" boundary.
    pub today: u64,
    /// Created at or after the "this week" boundary.
    pub this_week: u64,
    /// Count per status; statuses with no requests are omitted.
    pub by_status: Vec<(RequestStatus, u64)>,
}

/// Aggregate lawyer counts for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LawyerCounts {
    /// All profiles.
    pub total: u64,
    /// Awaiting moderation.
    pub pending: u64,
    /// Approved.
    pub approved: u64,
    /// Rejected.
    pub rejected: u64,
}

/// Admin filter for lawyer listings.
#[derive(Debug, Clone, Default)]
pub struct LawyerFilter {
    /// Only profiles in this status.
    pub status: Option<LawyerStatus>,
    /// Only profiles in this category.
    pub category: Option<LawyerCategory>,
    /// Case-insensitive substring over full name, e-mail and IIN.
    pub search: Option<String>,
}

/// Replacement document URLs; `None` keeps the stored one.
#[derive(Debug, Clone, Default)]
pub struct DocumentUrls {
    /// New photo URL.
    pub photo_url: Option<String>,
    /// New diploma URL.
    pub diploma_url: Option<String>,
    /// New license URL.
    pub license_url: Option<String>,
}

impl DocumentUrls {
    /// Whether no document is replaced.
    pub fn is_empty(&self) -> bool {
        self.photo_url.is_none() && self.diploma_url.is_none() && self.license_url.is_none()
    }
}

/// Audit log listing filter.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    /// Only entries with this action name.
    pub action: Option<String>,
    /// Only entries with this target type.
    pub target_type: Option<String>,
}

/// Storage for client requests.
#[async_trait]
pub trait RequestStore: Send + Sync + 'static {
    /// Insert a request if the source IP is under its quota.
    ///
    /// The quota check, day-sequence allocation and insert are one atomic
    /// unit per source IP. Fails with `RateLimited` when the IP already has
    /// `max_in_window` submissions after `window_start`.
    async fn insert_throttled(&self, data: &NewRequest, quota: SubmissionQuota)
    -> AppResult<Request>;

    /// Find a request by ID.
    async fn find_by_id(&self, id: RequestId) -> AppResult<Option<Request>>;

    /// Unassigned requests in `status`, newest first.
    async fn list_unassigned(
        &self,
        status: RequestStatus,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Request>>;

    /// Requests assigned to `lawyer_id`, most recently claimed first.
    async fn list_assigned_to(
        &self,
        lawyer_id: LawyerId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Request>>;

    /// All requests, optionally filtered by status, newest first.
    async fn list_all(
        &self,
        status: Option<RequestStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Request>>;

    /// Assign a `NEW`, unassigned request to `lawyer_id`.
    ///
    /// Returns `None` when the request is absent or no longer claimable.
    async fn try_claim(
        &self,
        id: RequestId,
        lawyer_id: LawyerId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Request>>;

    /// Return a request held by `lawyer_id` to the pool.
    ///
    /// Returns `None` when the request is absent or held by someone else.
    async fn try_release(
        &self,
        id: RequestId,
        lawyer_id: LawyerId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Request>>;

    /// Set the status while keeping the assignment invariant.
    ///
    /// Any status other than `IN_PROGRESS` clears the assignment.
    /// `IN_PROGRESS` only applies to a request that already has an
    /// assignee. Returns `None` when the request is absent or the change
    /// was refused.
    async fn override_status(
        &self,
        id: RequestId,
        status: RequestStatus,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Request>>;

    /// Delete a request. Returns whether a row was removed.
    async fn delete(&self, id: RequestId) -> AppResult<bool>;

    /// Dashboard counts relative to the given boundaries.
    async fn counts(
        &self,
        today_start: DateTime<Utc>,
        week_start: DateTime<Utc>,
    ) -> AppResult<RequestCounts>;
}

/// Storage for lawyer profiles.
#[async_trait]
pub trait LawyerStore: Send + Sync + 'static {
    /// Insert a new `PENDING` profile. Duplicate e-mail (case-insensitive),
    /// external reference or IIN fails with `Conflict`.
    async fn insert(&self, data: &NewLawyerProfile, now: DateTime<Utc>)
    -> AppResult<LawyerProfile>;

    /// Find a profile by ID.
    async fn find_by_id(&self, id: LawyerId) -> AppResult<Option<LawyerProfile>>;

    /// Find a profile by identity-provider subject.
    async fn find_by_external_ref(&self, external_ref: &str)
    -> AppResult<Option<LawyerProfile>>;

    /// Find a profile by e-mail (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<LawyerProfile>>;

    /// Find a profile by IIN.
    async fn find_by_iin(&self, iin: &str) -> AppResult<Option<LawyerProfile>>;

    /// Filtered listing, newest first.
    async fn list(
        &self,
        filter: &LawyerFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<LawyerProfile>>;

    /// E-mail addresses of every `APPROVED` lawyer.
    async fn approved_emails(&self) -> AppResult<Vec<String>>;

    /// Apply a profile edit.
    async fn update_profile(
        &self,
        id: LawyerId,
        update: &LawyerProfileUpdate,
        now: DateTime<Utc>,
    ) -> AppResult<Option<LawyerProfile>>;

    /// Record a moderation decision. `reason` is stored verbatim and is
    /// cleared when `None`.
    async fn set_moderation(
        &self,
        id: LawyerId,
        status: LawyerStatus,
        reason: Option<&str>,
        moderator: AdminId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<LawyerProfile>>;

    /// Replace documents; a `REJECTED` profile moves back to `PENDING`
    /// with its rejection reason cleared in the same update.
    async fn replace_documents(
        &self,
        id: LawyerId,
        documents: &DocumentUrls,
        now: DateTime<Utc>,
    ) -> AppResult<Option<LawyerProfile>>;

    /// Mark the e-mail verified unless it already is.
    async fn mark_email_verified(
        &self,
        id: LawyerId,
        at: DateTime<Utc>,
    ) -> AppResult<Option<LawyerProfile>>;

    /// Dashboard counts.
    async fn counts(&self) -> AppResult<LawyerCounts>;
}

/// Storage for administrators.
#[async_trait]
pub trait AdminStore: Send + Sync + 'static {
    /// Provision an administrator. Duplicate external reference fails with
    /// `Conflict`.
    async fn insert(&self, data: &NewAdminUser, now: DateTime<Utc>) -> AppResult<AdminUser>;

    /// Find an administrator by ID.
    async fn find_by_id(&self, id: AdminId) -> AppResult<Option<AdminUser>>;

    /// Find an administrator by identity-provider subject.
    async fn find_by_external_ref(&self, external_ref: &str) -> AppResult<Option<AdminUser>>;
}

/// Append-only audit log storage.
#[async_trait]
pub trait AuditStore: Send + Sync + 'static {
    /// Append an entry.
    async fn insert(&self, entry: &CreateAuditLogEntry, now: DateTime<Utc>)
    -> AppResult<AuditLogEntry>;

    /// Filtered listing, newest first.
    async fn list(
        &self,
        filter: &AuditFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>>;
}

/// Error recorded on jobs recovered from a dead worker.
pub const STALE_JOB_MESSAGE: &str = "Worker stopped before the job finished";

/// Durable job queue storage.
#[async_trait]
pub trait JobStore: Send + Sync + 'static {
    /// Enqueue a job.
    async fn create(&self, data: &CreateJob, now: DateTime<Utc>) -> AppResult<Job>;

    /// Find a job by ID.
    async fn find_by_id(&self, id: JobId) -> AppResult<Option<Job>>;

    /// Take the oldest due `pending` job on `queue`, marking it `running`
    /// and counting the attempt. Concurrent callers never get the same job.
    async fn dequeue(&self, queue: &str, now: DateTime<Utc>) -> AppResult<Option<Job>>;

    /// Mark a job completed.
    async fn complete(
        &self,
        id: JobId,
        result: Option<&serde_json::Value>,
        now: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Mark a job permanently failed.
    async fn fail(&self, id: JobId, error_message: &str, now: DateTime<Utc>) -> AppResult<()>;

    /// Put a job back to `pending`, due at `run_at`.
    async fn reschedule(
        &self,
        id: JobId,
        error_message: &str,
        run_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Recover `running` jobs started before `started_before`, whose worker
    /// is presumed dead. Jobs with attempts left become due `pending` jobs;
    /// the rest are marked `failed`. Returns how many jobs were touched.
    async fn requeue_stale(
        &self,
        started_before: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<u64>;
}
