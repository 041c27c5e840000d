//! Job repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use jurist_core::result::AppResult;
use jurist_core::types::JobId;
use jurist_entity::job::{CreateJob, Job};

use super::db_error;
use crate::store::{JobStore, STALE_JOB_MESSAGE};

/// Repository for the durable job queue.
#[derive(Debug, Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    /// Create a new job repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for JobRepository {
    async fn create(&self, data: &CreateJob, now: DateTime<Utc>) -> AppResult<Job> {
        sqlx::query_as::<_, Job>(
            "INSERT INTO jobs (id, job_type, queue, payload, status, attempts, max_attempts, \
             scheduled_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, 'pending', 0, $5, $6, $7, $7) RETURNING *",
        )
        .bind(JobId::new())
        .bind(&data.job_type)
        .bind(&data.queue)
        .bind(&data.payload)
        .bind(data.max_attempts)
        .bind(data.scheduled_at.unwrap_or(now))
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create job"))
    }

    async fn find_by_id(&self, id: JobId) -> AppResult<Option<Job>> {
        sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find job"))
    }

    async fn dequeue(&self, queue: &str, now: DateTime<Utc>) -> AppResult<Option<Job>> {
        sqlx::query_as::<_, Job>(
            "UPDATE jobs SET status = 'running', started_at = $2, \
             attempts = attempts + 1, updated_at = $2 \
             WHERE id = ( \
                SELECT id FROM jobs \
                WHERE queue = $1 AND status = 'pending' AND scheduled_at <= $2 \
                ORDER BY scheduled_at ASC, created_at ASC \
                FOR UPDATE SKIP LOCKED \
                LIMIT 1 \
             ) RETURNING *",
        )
        .bind(queue)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to dequeue job"))
    }

    async fn complete(
        &self,
        id: JobId,
        result: Option<&serde_json::Value>,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE jobs SET status = 'completed', result = $2, error_message = NULL, \
             completed_at = $3, updated_at = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(result)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to complete job"))?;
        Ok(())
    }

    async fn fail(&self, id: JobId, error_message: &str, now: DateTime<Utc>) -> AppResult<()> {
        sqlx::query(
            "UPDATE jobs SET status = 'failed', error_message = $2, completed_at = $3, \
             updated_at = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(error_message)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to mark job as failed"))?;
        Ok(())
    }

    async fn reschedule(
        &self,
        id: JobId,
        error_message: &str,
        run_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE jobs SET status = 'pending', error_message = $2, started_at = NULL, \
             scheduled_at = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(id)
        .bind(error_message)
        .bind(run_at)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to reschedule job"))?;
        Ok(())
    }

    async fn requeue_stale(
        &self,
        started_before: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE jobs SET \
             status = CASE WHEN attempts >= max_attempts \
                 THEN 'failed'::job_status ELSE 'pending'::job_status END, \
             completed_at = CASE WHEN attempts >= max_attempts THEN $2 ELSE NULL END, \
             error_message = $3, started_at = NULL, scheduled_at = $2, updated_at = $2 \
             WHERE status = 'running' AND started_at < $1",
        )
        .bind(started_before)
        .bind(now)
        .bind(STALE_JOB_MESSAGE)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to requeue stale jobs"))?;
        Ok(result.rows_affected())
    }
}
