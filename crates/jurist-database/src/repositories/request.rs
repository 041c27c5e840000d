//! Request repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use jurist_core::error::AppError;
use jurist_core::result::AppResult;
use jurist_core::types::{LawyerId, PageRequest, PageResponse, RequestId};
use jurist_entity::request::{NewRequest, Request, RequestNumber, RequestStatus};

use super::db_error;
use crate::store::{RequestCounts, RequestStore, SubmissionQuota};

/// Repository for request persistence and the claim/release protocol.
#[derive(Debug, Clone)]
pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    /// Create a new request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestStore for RequestRepository {
    async fn insert_throttled(
        &self,
        data: &NewRequest,
        quota: SubmissionQuota,
    ) -> AppResult<Request> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin submission transaction"))?;

        // Serialises submissions from one IP for the rest of the transaction.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(&data.ip_address)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to acquire submission lock"))?;

        let recent: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM requests WHERE ip_address = $1 AND created_at > $2",
        )
        .bind(&data.ip_address)
        .bind(quota.window_start)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to count recent submissions"))?;

        if recent >= i64::from(quota.max_in_window) {
            debug!(ip = %data.ip_address, recent, "Submission quota exhausted");
            return Err(AppError::rate_limited(
                "Too many requests. Please try again later.",
            ));
        }

        let seq: i32 = sqlx::query_scalar(
            "INSERT INTO request_counters (day, last_seq) VALUES ($1, 1) \
             ON CONFLICT (day) DO UPDATE SET last_seq = request_counters.last_seq + 1 \
             RETURNING last_seq",
        )
        .bind(quota.day)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to allocate request number"))?;

        let number = RequestNumber::new(quota.day, seq.max(1) as u32);

        let request = sqlx::query_as::<_, Request>(
            "INSERT INTO requests (id, request_number, description, budget, currency, contact_name, \
             phone, email, preferred_contact, status, ip_address, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'new', $10, $11, $11) RETURNING *",
        )
        .bind(RequestId::new())
        .bind(number.to_string())
        .bind(&data.description)
        .bind(data.budget)
        .bind(data.currency)
        .bind(&data.contact_name)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(data.preferred_contact)
        .bind(&data.ip_address)
        .bind(quota.now)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to insert request"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit submission"))?;

        Ok(request)
    }

    async fn find_by_id(&self, id: RequestId) -> AppResult<Option<Request>> {
        sqlx::query_as::<_, Request>("SELECT * FROM requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find request"))
    }

    async fn list_unassigned(
        &self,
        status: RequestStatus,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Request>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM requests WHERE status = $1 AND assigned_lawyer_id IS NULL",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count pool requests"))?;

        let items = sqlx::query_as::<_, Request>(
            "SELECT * FROM requests WHERE status = $1 AND assigned_lawyer_id IS NULL \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(status)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list pool requests"))?;

        Ok(PageResponse::new(items, page.page, page.page_size, total as u64))
    }

    async fn list_assigned_to(
        &self,
        lawyer_id: LawyerId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Request>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM requests WHERE assigned_lawyer_id = $1")
                .bind(lawyer_id)
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("Failed to count assigned requests"))?;

        let items = sqlx::query_as::<_, Request>(
            "SELECT * FROM requests WHERE assigned_lawyer_id = $1 \
             ORDER BY assigned_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(lawyer_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list assigned requests"))?;

        Ok(PageResponse::new(items, page.page, page.page_size, total as u64))
    }

    async fn list_all(
        &self,
        status: Option<RequestStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Request>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM requests WHERE ($1::request_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count requests"))?;

        let items = sqlx::query_as::<_, Request>(
            "SELECT * FROM requests WHERE ($1::request_status IS NULL OR status = $1) \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(status)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list requests"))?;

        Ok(PageResponse::new(items, page.page, page.page_size, total as u64))
    }

    async fn try_claim(
        &self,
        id: RequestId,
        lawyer_id: LawyerId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Request>> {
        sqlx::query_as::<_, Request>(
            "UPDATE requests SET status = 'in_progress', assigned_lawyer_id = $2, \
             assigned_at = $3, updated_at = $3 \
             WHERE id = $1 AND status = 'new' AND assigned_lawyer_id IS NULL \
             RETURNING *",
        )
        .bind(id)
        .bind(lawyer_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to claim request"))
    }

    async fn try_release(
        &self,
        id: RequestId,
        lawyer_id: LawyerId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Request>> {
        sqlx::query_as::<_, Request>(
            "UPDATE requests SET status = 'new', assigned_lawyer_id = NULL, \
             assigned_at = NULL, updated_at = $3 \
             WHERE id = $1 AND assigned_lawyer_id = $2 \
             RETURNING *",
        )
        .bind(id)
        .bind(lawyer_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to release request"))
    }

    async fn override_status(
        &self,
        id: RequestId,
        status: RequestStatus,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Request>> {
        sqlx::query_as::<_, Request>(
            "UPDATE requests SET status = $2, \
             assigned_lawyer_id = CASE WHEN $2 = 'in_progress'::request_status \
                 THEN assigned_lawyer_id ELSE NULL END, \
             assigned_at = CASE WHEN $2 = 'in_progress'::request_status \
                 THEN assigned_at ELSE NULL END, \
             updated_at = $3 \
             WHERE id = $1 \
             AND ($2 <> 'in_progress'::request_status OR assigned_lawyer_id IS NOT NULL) \
             RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update request status"))
    }

    async fn delete(&self, id: RequestId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete request"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn counts(
        &self,
        today_start: DateTime<Utc>,
        week_start: DateTime<Utc>,
    ) -> AppResult<RequestCounts> {
        let (total, today, this_week): (i64, i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), \
             COUNT(*) FILTER (WHERE created_at >= $1), \
             COUNT(*) FILTER (WHERE created_at >= $2) \
             FROM requests",
        )
        .bind(today_start)
        .bind(week_start)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count requests"))?;

        let by_status: Vec<(RequestStatus, i64)> = sqlx::query_as(
            "SELECT status, COUNT(*) FROM requests GROUP BY status ORDER BY status",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to count requests by status"))?;

        Ok(RequestCounts {
            total: total as u64,
            today: today as u64,
            this_week: this_week as u64,
            by_status: by_status
                .into_iter()
                .map(|(status, n)| (status, n as u64))
                .collect(),
        })
    }
}
