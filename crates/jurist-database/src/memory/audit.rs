//! In-memory audit log store.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use jurist_core::error::AppError;
use jurist_core::result::AppResult;
use jurist_core::types::{AuditLogId, PageRequest, PageResponse};
use jurist_entity::audit::{AuditLogEntry, CreateAuditLogEntry};

use super::paginate;
use crate::store::{AuditFilter, AuditStore};

/// Append-only audit store backed by a vector.
///
/// Writes can be made to fail on demand to exercise audit failure paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditStore {
    entries: Arc<Mutex<Vec<AuditLogEntry>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryAuditStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All entries in insertion order.
    pub async fn entries(&self) -> Vec<AuditLogEntry> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn insert(
        &self,
        entry: &CreateAuditLogEntry,
        now: DateTime<Utc>,
    ) -> AppResult<AuditLogEntry> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::database("Audit log is unavailable"));
        }
        let stored = AuditLogEntry {
            id: AuditLogId::new(),
            actor_id: entry.actor_id,
            actor_kind: entry.actor_kind,
            action: entry.action.clone(),
            target_type: entry.target_type.clone(),
            target_id: entry.target_id,
            details: entry.details.clone(),
            ip_address: entry.ip_address.clone(),
            created_at: now,
        };
        self.entries.lock().await.push(stored.clone());
        Ok(stored)
    }

    async fn list(
        &self,
        filter: &AuditFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        let entries = self.entries.lock().await;
        let items: Vec<AuditLogEntry> = entries
            .iter()
            .rev()
            .filter(|e| filter.action.as_ref().is_none_or(|a| &e.action == a))
            .filter(|e| filter.target_type.as_ref().is_none_or(|t| &e.target_type == t))
            .cloned()
            .collect();
        Ok(paginate(&items, page))
    }
}
