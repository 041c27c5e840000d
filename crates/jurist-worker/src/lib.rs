//! Background job processing for the Jurist marketplace.
//!
//! This crate provides:
//! - A durable job queue over the [`JobStore`](jurist_database::store::JobStore)
//! - A job executor that dispatches jobs to the correct handler
//! - A worker runner that polls for and executes queued jobs with retries
//! - The queued notification dispatcher and its delivery handler

pub mod dispatcher;
pub mod executor;
pub mod jobs;
pub mod mailer;
pub mod queue;
pub mod runner;

pub use dispatcher::QueuedNotificationDispatcher;
pub use executor::{JobExecutionError, JobExecutor, JobHandler};
pub use jobs::NotificationJobHandler;
pub use mailer::{LogMailer, Mailer, OutgoingMail};
pub use queue::JobQueue;
pub use runner::WorkerRunner;
