//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background job worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the worker is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Number of concurrent job processing tasks.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Interval in seconds between job queue polls.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// Attempts allowed per notification job before it is marked failed.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: i32,
    /// Base delay in seconds before a transient failure is retried.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_seconds: u64,
    /// A job still `running` this long after it started is assumed to
    /// belong to a dead worker and is put back on the queue.
    #[serde(default = "default_stale_after")]
    pub stale_after_seconds: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            concurrency: default_concurrency(),
            poll_interval_seconds: default_poll_interval(),
            max_attempts: default_max_attempts(),
            retry_delay_seconds: default_retry_delay(),
            stale_after_seconds: default_stale_after(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_concurrency() -> usize {
    4
}

fn default_poll_interval() -> u64 {
    2
}

fn default_max_attempts() -> i32 {
    5
}

fn default_retry_delay() -> u64 {
    30
}

fn default_stale_after() -> u64 {
    600
}
