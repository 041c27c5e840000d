//! Job queue abstraction for enqueuing and dequeuing background jobs.

use std::sync::Arc;

use chrono::Duration;
use tracing;

use jurist_core::result::AppResult;
use jurist_core::traits::Clock;
use jurist_core::types::JobId;
use jurist_database::store::JobStore;
use jurist_entity::job::{CreateJob, Job};

/// Job queue for enqueuing and dequeuing work
#[derive(Clone)]
pub struct JobQueue {
    /// Durable job storage
    store: Arc<dyn JobStore>,
    /// Source of "now" for scheduling
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JobQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobQueue").finish_non_exhaustive()
    }
}

impl JobQueue {
    /// Create a new job queue
    pub fn new(store: Arc<dyn JobStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Enqueue a new job
    pub async fn enqueue(&self, params: CreateJob) -> AppResult<Job> {
        let job = self.store.create(&params, self.clock.now()).await?;

        tracing::debug!(
            job_id = %job.id,
            job_type = %job.job_type,
            queue = %job.queue,
            "Enqueued job"
        );

        Ok(job)
    }

    /// Dequeue the next due job, trying `queues` in order
    pub async fn dequeue(&self, queues: &[&str]) -> AppResult<Option<Job>> {
        let now = self.clock.now();
        for queue in queues {
            if let Some(job) = self.store.dequeue(queue, now).await? {
                tracing::debug!(
                    job_id = %job.id,
                    job_type = %job.job_type,
                    queue = %job.queue,
                    attempt = job.attempts,
                    "Dequeued job"
                );
                return Ok(Some(job));
            }
        }

        Ok(None)
    }

    /// Mark a job as completed successfully
    pub async fn complete(&self, job_id: JobId, result: Option<serde_json::Value>) -> AppResult<()> {
        self.store
            .complete(job_id, result.as_ref(), self.clock.now())
            .await?;

        tracing::debug!(job_id = %job_id, "Job completed");
        Ok(())
    }

    /// Mark a job as permanently failed
    pub async fn fail(&self, job_id: JobId, error: &str) -> AppResult<()> {
        self.store.fail(job_id, error, self.clock.now()).await?;

        tracing::debug!(job_id = %job_id, error = %error, "Job failed");
        Ok(())
    }

    /// Put a job back on its queue, due after `delay`
    pub async fn retry_later(&self, job_id: JobId, error: &str, delay: Duration) -> AppResult<()> {
        let now = self.clock.now();
        self.store.reschedule(job_id, error, now + delay, now).await?;

        tracing::debug!(job_id = %job_id, delay_secs = delay.num_seconds(), "Job rescheduled");
        Ok(())
    }

    /// Recover jobs left `running` for longer than `after`
    pub async fn requeue_stale(&self, after: Duration) -> AppResult<u64> {
        let now = self.clock.now();
        let recovered = self.store.requeue_stale(now - after, now).await?;
        if recovered > 0 {
            tracing::warn!(recovered, "Recovered jobs abandoned by a stopped worker");
        }
        Ok(recovered)
    }

    /// Look up a job
    pub async fn get(&self, job_id: JobId) -> AppResult<Option<Job>> {
        self.store.find_by_id(job_id).await
    }
}
