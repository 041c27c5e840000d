//! Worker runner: the main loop that polls for jobs and executes them.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, watch};
use tokio::time;
use tracing;

use jurist_core::config::WorkerConfig;
use jurist_core::result::AppResult;
use jurist_entity::job::{Job, NOTIFICATIONS_QUEUE};

use crate::executor::JobExecutor;
use crate::queue::JobQueue;

/// Largest backoff exponent; later retries wait the same as this one.
const MAX_BACKOFF_EXPONENT: u32 = 6;

/// Main worker runner that polls queues and executes jobs
#[derive(Debug)]
pub struct WorkerRunner {
    /// Job queue for polling
    queue: JobQueue,
    /// Job executor for dispatching
    executor: Arc<JobExecutor>,
    /// Worker configuration
    config: WorkerConfig,
    /// Worker identifier used in logs
    worker_id: String,
    /// Queues to poll (in priority order)
    queues: Vec<String>,
}

impl WorkerRunner {
    /// Create a new worker runner polling the notifications queue
    pub fn new(
        queue: JobQueue,
        executor: Arc<JobExecutor>,
        config: WorkerConfig,
        worker_id: String,
    ) -> Self {
        Self {
            queue,
            executor,
            config,
            worker_id,
            queues: vec![NOTIFICATIONS_QUEUE.to_string()],
        }
    }

    /// Start the worker runner; runs until the cancel signal is received
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(
            worker_id = %self.worker_id,
            concurrency = self.config.concurrency,
            poll_interval_secs = self.config.poll_interval_seconds,
            queues = ?self.queues,
            "Worker started"
        );

        let concurrency = self.config.concurrency.max(1);
        let semaphore = Arc::new(Semaphore::new(concurrency));
        let poll_interval = Duration::from_secs(self.config.poll_interval_seconds);
        let sweep_interval = Duration::from_secs(self.config.stale_after_seconds.max(1));
        let mut last_sweep: Option<time::Instant> = None;

        loop {
            if last_sweep.is_none_or(|t| t.elapsed() >= sweep_interval) {
                if let Err(e) = self.recover_stale().await {
                    tracing::error!(error = %e, "Failed to recover stale jobs");
                }
                last_sweep = Some(time::Instant::now());
            }

            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        tracing::info!(worker_id = %self.worker_id, "Worker received shutdown signal");
                        break;
                    }
                }
                found = self.poll_and_spawn(&semaphore) => {
                    if found {
                        continue;
                    }
                    tokio::select! {
                        _ = cancel.changed() => {
                            if *cancel.borrow() {
                                tracing::info!(worker_id = %self.worker_id, "Worker shutting down");
                                break;
                            }
                        }
                        _ = time::sleep(poll_interval) => {}
                    }
                }
            }
        }

        tracing::info!(worker_id = %self.worker_id, "Waiting for in-flight jobs to complete");

        let permits = u32::try_from(concurrency).unwrap_or(u32::MAX);
        let _ = time::timeout(Duration::from_secs(30), semaphore.acquire_many(permits)).await;

        tracing::info!(worker_id = %self.worker_id, "Worker shut down complete");
    }

    /// Dequeue one due job and process it on the current task.
    ///
    /// Returns `false` when no job was due.
    pub async fn process_next(&self) -> AppResult<bool> {
        let queue_refs: Vec<&str> = self.queues.iter().map(String::as_str).collect();
        match self.queue.dequeue(&queue_refs).await? {
            Some(job) => {
                process(&self.queue, &self.executor, self.retry_delay(), job).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Put jobs abandoned by a stopped worker back on the queue.
    pub async fn recover_stale(&self) -> AppResult<u64> {
        let after = chrono::Duration::seconds(
            i64::try_from(self.config.stale_after_seconds).unwrap_or(i64::MAX),
        );
        self.queue.requeue_stale(after).await
    }

    /// Poll for a job and spawn it if a slot is free. Returns whether a
    /// job was picked up.
    async fn poll_and_spawn(&self, semaphore: &Arc<Semaphore>) -> bool {
        let permit = match semaphore.clone().try_acquire_owned() {
            Ok(p) => p,
            Err(_) => {
                tracing::trace!("All worker slots occupied, waiting");
                return false;
            }
        };

        let queue_refs: Vec<&str> = self.queues.iter().map(String::as_str).collect();

        match self.queue.dequeue(&queue_refs).await {
            Ok(Some(job)) => {
                let queue = self.queue.clone();
                let executor = Arc::clone(&self.executor);
                let retry_delay = self.retry_delay();

                tokio::spawn(async move {
                    let _permit = permit;
                    process(&queue, &executor, retry_delay, job).await;
                });
                true
            }
            Ok(None) => {
                tracing::trace!("No jobs available in queues");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to dequeue job");
                false
            }
        }
    }

    fn retry_delay(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::try_from(self.config.retry_delay_seconds).unwrap_or(i64::MAX))
    }
}

/// Delay before the retry that follows attempt number `attempts`.
pub fn backoff(base: chrono::Duration, attempts: i32) -> chrono::Duration {
    let exponent = u32::try_from(attempts.saturating_sub(1))
        .unwrap_or(0)
        .min(MAX_BACKOFF_EXPONENT);
    base * 2_i32.pow(exponent)
}

/// Run one dequeued job to completion, then record the outcome.
async fn process(queue: &JobQueue, executor: &JobExecutor, retry_delay: chrono::Duration, job: Job) {
    let job_id = job.id;

    match executor.execute(&job).await {
        Ok(result) => {
            if let Err(e) = queue.complete(job_id, result).await {
                tracing::error!(job_id = %job_id, error = %e, "Failed to mark job as completed");
                return;
            }
            tracing::info!(job_id = %job_id, job_type = %job.job_type, "Job completed successfully");
        }
        Err(err) if err.is_retryable() && job.can_retry() => {
            let delay = backoff(retry_delay, job.attempts);
            tracing::warn!(
                job_id = %job_id,
                attempt = job.attempts,
                max_attempts = job.max_attempts,
                retry_in_secs = delay.num_seconds(),
                error = %err,
                "Job failed, will retry"
            );
            if let Err(e) = queue.retry_later(job_id, &err.to_string(), delay).await {
                tracing::error!(job_id = %job_id, error = %e, "Failed to reschedule job");
            }
        }
        Err(err) => {
            tracing::error!(
                job_id = %job_id,
                attempt = job.attempts,
                error = %err,
                "Job failed permanently"
            );
            if let Err(e) = queue.fail(job_id, &err.to_string()).await {
                tracing::error!(job_id = %job_id, error = %e, "Failed to mark job as failed");
            }
        }
    }
}
