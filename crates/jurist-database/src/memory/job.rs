//! In-memory job queue store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use jurist_core::error::AppError;
use jurist_core::result::AppResult;
use jurist_core::types::JobId;
use jurist_entity::job::{CreateJob, Job, JobStatus};

use crate::store::{JobStore, STALE_JOB_MESSAGE};

/// Job queue backed by a vector in enqueue order.
#[derive(Debug, Clone, Default)]
pub struct MemoryJobStore {
    jobs: Arc<Mutex<Vec<Job>>>,
}

impl MemoryJobStore {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every job in enqueue order.
    pub async fn all(&self) -> Vec<Job> {
        self.jobs.lock().await.clone()
    }

    async fn update(&self, id: JobId, f: impl FnOnce(&mut Job)) -> AppResult<()> {
        let mut jobs = self.jobs.lock().await;
        let job = jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| AppError::not_found(format!("Job {id} not found")))?;
        f(job);
        Ok(())
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn create(&self, data: &CreateJob, now: DateTime<Utc>) -> AppResult<Job> {
        let job = Job {
            id: JobId::new(),
            job_type: data.job_type.clone(),
            queue: data.queue.clone(),
            payload: data.payload.clone(),
            result: None,
            error_message: None,
            status: JobStatus::Pending,
            attempts: 0,
            max_attempts: data.max_attempts,
            scheduled_at: data.scheduled_at.unwrap_or(now),
            started_at: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };
        self.jobs.lock().await.push(job.clone());
        Ok(job)
    }

    async fn find_by_id(&self, id: JobId) -> AppResult<Option<Job>> {
        Ok(self.jobs.lock().await.iter().find(|j| j.id == id).cloned())
    }

    async fn dequeue(&self, queue: &str, now: DateTime<Utc>) -> AppResult<Option<Job>> {
        let mut jobs = self.jobs.lock().await;
        let next = jobs
            .iter_mut()
            .filter(|j| j.queue == queue && j.status == JobStatus::Pending && j.scheduled_at <= now)
            .min_by_key(|j| (j.scheduled_at, j.created_at));

        Ok(next.map(|job| {
            job.status = JobStatus::Running;
            job.attempts += 1;
            job.started_at = Some(now);
            job.updated_at = now;
            job.clone()
        }))
    }

    async fn complete(
        &self,
        id: JobId,
        result: Option<&serde_json::Value>,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        self.update(id, |job| {
            job.status = JobStatus::Completed;
            job.result = result.cloned();
            job.error_message = None;
            job.completed_at = Some(now);
            job.updated_at = now;
        })
        .await
    }

    async fn fail(&self, id: JobId, error_message: &str, now: DateTime<Utc>) -> AppResult<()> {
        self.update(id, |job| {
            job.status = JobStatus::Failed;
            job.error_message = Some(error_message.to_string());
            job.completed_at = Some(now);
            job.updated_at = now;
        })
        .await
    }

    async fn reschedule(
        &self,
        id: JobId,
        error_message: &str,
        run_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        self.update(id, |job| {
            job.status = JobStatus::Pending;
            job.error_message = Some(error_message.to_string());
            job.started_at = None;
            job.scheduled_at = run_at;
            job.updated_at = now;
        })
        .await
    }

    async fn requeue_stale(
        &self,
        started_before: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<u64> {
        let mut jobs = self.jobs.lock().await;
        let mut touched = 0;
        for job in jobs.iter_mut().filter(|j| {
            j.status == JobStatus::Running && j.started_at.is_some_and(|t| t < started_before)
        }) {
            if job.attempts >= job.max_attempts {
                job.status = JobStatus::Failed;
                job.completed_at = Some(now);
            } else {
                job.status = JobStatus::Pending;
            }
            job.error_message = Some(STALE_JOB_MESSAGE.to_string());
            job.started_at = None;
            job.scheduled_at = now;
            job.updated_at = now;
            touched += 1;
        }
        Ok(touched)
    }
}
