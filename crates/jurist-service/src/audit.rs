//! Audit recording and listing.

use std::sync::Arc;

use tracing::error;
use uuid::Uuid;

use jurist_core::result::AppResult;
use jurist_core::traits::Clock;
use jurist_core::types::{PageRequest, PageResponse};
use jurist_database::store::{AuditFilter, AuditStore};
use jurist_entity::audit::{ActorKind, AuditLogEntry, CreateAuditLogEntry};

use crate::context::ActorContext;

/// One privileged action about to be written to the audit log.
#[derive(Debug, Clone)]
pub struct AuditEvent<'a> {
    /// Who acted.
    pub actor_id: Uuid,
    /// What kind of actor.
    pub actor_kind: ActorKind,
    /// Action name (see `jurist_entity::audit::actions`).
    pub action: &'a str,
    /// Target type (see `jurist_entity::audit::targets`).
    pub target_type: &'a str,
    /// Target ID.
    pub target_id: Uuid,
    /// Structured detail.
    pub details: Option<serde_json::Value>,
}

/// Append-only audit writer.
#[derive(Clone)]
pub struct AuditRecorder {
    store: Arc<dyn AuditStore>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for AuditRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditRecorder")
            .field("clock", &self.clock)
            .finish()
    }
}

impl AuditRecorder {
    /// Creates a recorder over an audit store.
    pub fn new(store: Arc<dyn AuditStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Write an entry, propagating failure.
    pub async fn record(&self, event: AuditEvent<'_>, ctx: &ActorContext) -> AppResult<AuditLogEntry> {
        let entry = CreateAuditLogEntry {
            actor_id: event.actor_id,
            actor_kind: event.actor_kind,
            action: event.action.to_string(),
            target_type: event.target_type.to_string(),
            target_id: event.target_id,
            details: event.details,
            ip_address: ctx.ip_address.clone(),
        };
        self.store.insert(&entry, self.clock.now()).await
    }

    /// Write an entry for a transition that has already committed.
    ///
    /// A failed write is logged at error level and swallowed.
    pub async fn record_after_commit(&self, event: AuditEvent<'_>, ctx: &ActorContext) {
        let action = event.action.to_string();
        let target_id = event.target_id;
        if let Err(e) = self.record(event, ctx).await {
            error!(
                action = %action,
                target_id = %target_id,
                error = %e,
                "Failed to write audit entry for committed transition"
            );
        }
    }

    /// Filtered listing, newest first.
    pub async fn list(
        &self,
        filter: &AuditFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        self.store.list(filter, page).await
    }
}
