//! Delivery of queued notifications.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing;

use jurist_core::config::NotificationConfig;
use jurist_entity::job::{Job, NOTIFICATION_JOB_TYPE, NotificationPayload};

use crate::executor::{JobExecutionError, JobHandler};
use crate::mailer::{Mailer, OutgoingMail};

/// Renders a [`NotificationPayload`] and hands it to the mailer
#[derive(Debug)]
pub struct NotificationJobHandler {
    /// Delivery backend
    mailer: Arc<dyn Mailer>,
    /// Sender, admin mailbox and dashboard link
    config: NotificationConfig,
}

impl NotificationJobHandler {
    /// Create a new notification job handler
    pub fn new(mailer: Arc<dyn Mailer>, config: NotificationConfig) -> Self {
        Self { mailer, config }
    }

    /// Build the message for one payload.
    pub fn render(&self, payload: &NotificationPayload) -> OutgoingMail {
        let (to, subject, body) = match payload {
            NotificationPayload::LawyerApproved { email, full_name } => (
                vec![email.clone()],
                "Your profile has been approved".to_string(),
                format!(
                    "Hello, {full_name}!\n\nYour lawyer profile has been verified. \
                     New client requests are now available in your dashboard: {}",
                    self.config.dashboard_url
                ),
            ),
            NotificationPayload::LawyerRejected {
                email,
                full_name,
                reason,
            } => (
                vec![email.clone()],
                "Your profile needs changes".to_string(),
                format!(
                    "Hello, {full_name}!\n\nYour lawyer profile was not approved.\n\
                     Reason: {reason}\n\nYou can upload corrected documents in your dashboard: {}",
                    self.config.dashboard_url
                ),
            ),
            NotificationPayload::RequestConfirmation {
                email,
                contact_name,
                request_number,
            } => (
                vec![email.clone()],
                format!("Request {request_number} received"),
                format!(
                    "Hello, {contact_name}!\n\nYour request {request_number} has been received. \
                     A lawyer will contact you soon."
                ),
            ),
            NotificationPayload::NewRequestForLawyers {
                emails,
                request_number,
                description,
                budget_label,
            } => (
                emails.clone(),
                format!("New request {request_number}"),
                format!(
                    "A new client request is available.\n\nBudget: {budget_label}\n\n{description}\n\n\
                     Open your dashboard to take it: {}",
                    self.config.dashboard_url
                ),
            ),
            NotificationPayload::NewRequestForAdmin {
                request_number,
                contact_name,
                description,
            } => (
                vec![self.config.admin_email.clone()],
                format!("New request {request_number}"),
                format!("Contact: {contact_name}\n\n{description}"),
            ),
            NotificationPayload::NewLawyerForAdmin {
                full_name,
                email,
                category,
            } => (
                vec![self.config.admin_email.clone()],
                "New lawyer awaiting moderation".to_string(),
                format!("{full_name} <{email}> registered as {category}."),
            ),
        };

        OutgoingMail {
            from: self.config.from_address.clone(),
            to,
            subject,
            body,
        }
    }
}

#[async_trait]
impl JobHandler for NotificationJobHandler {
    fn job_type(&self) -> &str {
        NOTIFICATION_JOB_TYPE
    }

    async fn execute(&self, job: &Job) -> Result<Option<Value>, JobExecutionError> {
        let payload: NotificationPayload = serde_json::from_value(job.payload.clone())
            .map_err(|e| JobExecutionError::Permanent(format!("Malformed notification payload: {e}")))?;

        let mail = self.render(&payload);
        self.mailer
            .send(&mail)
            .await
            .map_err(|e| JobExecutionError::Transient(format!("Mail delivery failed: {e}")))?;

        tracing::info!(
            job_id = %job.id,
            kind = payload.kind(),
            recipients = mail.to.len(),
            "Notification delivered"
        );

        Ok(Some(serde_json::json!({
            "kind": payload.kind(),
            "recipients": mail.to.len(),
        })))
    }
}
