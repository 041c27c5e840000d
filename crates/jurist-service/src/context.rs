//! Caller context passed into audited service operations.

use serde::{Deserialize, Serialize};

/// Transport-level facts about the current caller.
///
/// Built by the HTTP layer so that audit entries know *where* a
/// privileged action came from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActorContext {
    /// IP address of the request origin.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
}

impl ActorContext {
    /// Creates a new actor context.
    pub fn new(ip_address: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            ip_address,
            user_agent,
        }
    }

    /// Context for actions not triggered over HTTP (CLI, jobs).
    pub fn system() -> Self {
        Self::default()
    }
}
