//! Typed notification job payloads.

use serde::{Deserialize, Serialize};

/// Job type of outbound notifications.
pub const NOTIFICATION_JOB_TYPE: &str = "notification";
/// Queue that carries outbound notifications.
pub const NOTIFICATIONS_QUEUE: &str = "notifications";

/// One outbound notification, serialized into a job's payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationPayload {
    /// A lawyer's profile was approved.
    LawyerApproved {
        /// Recipient.
        email: String,
        /// Lawyer's name.
        full_name: String,
    },
    /// A lawyer's profile was rejected.
    LawyerRejected {
        /// Recipient.
        email: String,
        /// Lawyer's name.
        full_name: String,
        /// Moderator's reason.
        reason: String,
    },
    /// Receipt sent to a client who left an e-mail.
    RequestConfirmation {
        /// Recipient.
        email: String,
        /// Client's name.
        contact_name: String,
        /// Assigned request number.
        request_number: String,
    },
    /// New request notice fanned out to approved lawyers.
    NewRequestForLawyers {
        /// Recipients.
        emails: Vec<String>,
        /// Request number.
        request_number: String,
        /// Problem description.
        description: String,
        /// Formatted budget, e.g. `150 000 KZT`.
        budget_label: String,
    },
    /// New request notice for the admin mailbox.
    NewRequestForAdmin {
        /// Request number.
        request_number: String,
        /// Client's name.
        contact_name: String,
        /// Problem description.
        description: String,
    },
    /// New lawyer registration notice for the admin mailbox.
    NewLawyerForAdmin {
        /// Lawyer's name.
        full_name: String,
        /// Lawyer's e-mail.
        email: String,
        /// Lawyer's category.
        category: String,
    },
}

impl NotificationPayload {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LawyerApproved { .. } => "lawyer_approved",
            Self::LawyerRejected { .. } => "lawyer_rejected",
            Self::RequestConfirmation { .. } => "request_confirmation",
            Self::NewRequestForLawyers { .. } => "new_request_for_lawyers",
            Self::NewRequestForAdmin { .. } => "new_request_for_admin",
            Self::NewLawyerForAdmin { .. } => "new_lawyer_for_admin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_is_tagged() {
        let payload = NotificationPayload::LawyerApproved {
            email: "a@b.kz".into(),
            full_name: "Aigerim".into(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["kind"], "lawyer_approved");
        assert_eq!(value["email"], "a@b.kz");
    }
}
