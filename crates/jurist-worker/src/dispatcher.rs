//! Notification dispatcher backed by the durable job queue.

use async_trait::async_trait;
use tracing;

use jurist_core::result::AppResult;
use jurist_entity::job::{CreateJob, NOTIFICATION_JOB_TYPE, NOTIFICATIONS_QUEUE, NotificationPayload};
use jurist_service::notification::NotificationDispatcher;

use crate::queue::JobQueue;

/// Turns every notification into a `notification` job.
///
/// Returning `Ok` means the job is stored, not that mail went out;
/// delivery and retries happen in the worker.
#[derive(Debug, Clone)]
pub struct QueuedNotificationDispatcher {
    queue: JobQueue,
    max_attempts: i32,
}

impl QueuedNotificationDispatcher {
    /// Creates a dispatcher whose jobs get `max_attempts` attempts each.
    pub fn new(queue: JobQueue, max_attempts: i32) -> Self {
        Self {
            queue,
            max_attempts: max_attempts.max(1),
        }
    }

    async fn enqueue(&self, payload: NotificationPayload) -> AppResult<()> {
        let kind = payload.kind();
        let job = self
            .queue
            .enqueue(CreateJob {
                job_type: NOTIFICATION_JOB_TYPE.to_string(),
                queue: NOTIFICATIONS_QUEUE.to_string(),
                payload: serde_json::to_value(&payload)?,
                max_attempts: self.max_attempts,
                scheduled_at: None,
            })
            .await?;
        tracing::debug!(job_id = %job.id, kind, "Notification queued");
        Ok(())
    }
}

#[async_trait]
impl NotificationDispatcher for QueuedNotificationDispatcher {
    async fn send_approval(&self, email: &str, full_name: &str) -> AppResult<()> {
        self.enqueue(NotificationPayload::LawyerApproved {
            email: email.to_string(),
            full_name: full_name.to_string(),
        })
        .await
    }

    async fn send_rejection(&self, email: &str, full_name: &str, reason: &str) -> AppResult<()> {
        self.enqueue(NotificationPayload::LawyerRejected {
            email: email.to_string(),
            full_name: full_name.to_string(),
            reason: reason.to_string(),
        })
        .await
    }

    async fn send_request_confirmation(
        &self,
        email: &str,
        contact_name: &str,
        request_number: &str,
    ) -> AppResult<()> {
        self.enqueue(NotificationPayload::RequestConfirmation {
            email: email.to_string(),
            contact_name: contact_name.to_string(),
            request_number: request_number.to_string(),
        })
        .await
    }

    async fn notify_lawyers_of_new_request(
        &self,
        emails: &[String],
        request_number: &str,
        description: &str,
        budget_label: &str,
    ) -> AppResult<()> {
        if emails.is_empty() {
            return Ok(());
        }
        self.enqueue(NotificationPayload::NewRequestForLawyers {
            emails: emails.to_vec(),
            request_number: request_number.to_string(),
            description: description.to_string(),
            budget_label: budget_label.to_string(),
        })
        .await
    }

    async fn notify_admin_of_new_request(
        &self,
        request_number: &str,
        contact_name: &str,
        description: &str,
    ) -> AppResult<()> {
        self.enqueue(NotificationPayload::NewRequestForAdmin {
            request_number: request_number.to_string(),
            contact_name: contact_name.to_string(),
            description: description.to_string(),
        })
        .await
    }

    async fn notify_admin_of_new_lawyer(
        &self,
        full_name: &str,
        email: &str,
        category: &str,
    ) -> AppResult<()> {
        self.enqueue(NotificationPayload::NewLawyerForAdmin {
            full_name: full_name.to_string(),
            email: email.to_string(),
            category: category.to_string(),
        })
        .await
    }
}
