//! Outbound notification configuration.

use serde::{Deserialize, Serialize};

/// Settings for the notification pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Mailbox that receives admin-channel notices.
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    /// Sender address used on outbound mail.
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Link to the lawyer dashboard included in lawyer-facing mail.
    #[serde(default = "default_dashboard_url")]
    pub dashboard_url: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            admin_email: default_admin_email(),
            from_address: default_from_address(),
            dashboard_url: default_dashboard_url(),
        }
    }
}

fn default_admin_email() -> String {
    "admin@jurist.kz".to_string()
}

fn default_from_address() -> String {
    "noreply@jurist.kz".to_string()
}

fn default_dashboard_url() -> String {
    "http://localhost:3000/dashboard".to_string()
}
