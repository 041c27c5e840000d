//! Audit log entry entity model.

use chrono::{DateTime, Utc};
use jurist_core::types::AuditLogId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Action names recorded in the audit log.
pub mod actions {
    /// A lawyer profile was approved.
    pub const APPROVE_LAWYER: &str = "approve_lawyer";
    /// A lawyer profile was rejected.
    pub const REJECT_LAWYER: &str = "reject_lawyer";
    /// A request status was overridden by an administrator.
    pub const UPDATE_REQUEST_STATUS: &str = "update_request_status";
    /// A request was deleted by an administrator.
    pub const DELETE_REQUEST: &str = "delete_request";
}

/// Target types recorded in the audit log.
pub mod targets {
    /// A lawyer profile.
    pub const LAWYER_PROFILE: &str = "lawyer_profile";
    /// A client request.
    pub const REQUEST: &str = "request";
}

/// Who performed an audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "actor_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    /// An administrator.
    Admin,
    /// A lawyer.
    Lawyer,
    /// The system itself (CLI, background jobs).
    System,
}

/// An immutable audit log entry recording a privileged action.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    /// Unique audit entry identifier.
    pub id: AuditLogId,
    /// The actor who performed the action.
    pub actor_id: Uuid,
    /// What kind of actor it was.
    pub actor_kind: ActorKind,
    /// The action that was performed (e.g., `"approve_lawyer"`).
    pub action: String,
    /// The type of target resource (e.g., `"request"`).
    pub target_type: String,
    /// The target resource ID.
    pub target_id: Uuid,
    /// Additional details about the action (JSON).
    pub details: Option<serde_json::Value>,
    /// IP address of the actor.
    pub ip_address: Option<String>,
    /// When the action occurred.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new audit log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuditLogEntry {
    /// The actor who performed the action.
    pub actor_id: Uuid,
    /// Actor kind.
    pub actor_kind: ActorKind,
    /// The action performed.
    pub action: String,
    /// Target resource type.
    pub target_type: String,
    /// Target resource ID.
    pub target_id: Uuid,
    /// Additional details.
    pub details: Option<serde_json::Value>,
    /// Actor's IP address.
    pub ip_address: Option<String>,
}
