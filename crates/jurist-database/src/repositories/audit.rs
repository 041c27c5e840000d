//! Audit log repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use jurist_core::result::AppResult;
use jurist_core::types::{AuditLogId, PageRequest, PageResponse};
use jurist_entity::audit::{AuditLogEntry, CreateAuditLogEntry};

use super::db_error;
use crate::store::{AuditFilter, AuditStore};

/// Repository for the append-only audit log.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditStore for AuditLogRepository {
    async fn insert(
        &self,
        entry: &CreateAuditLogEntry,
        now: DateTime<Utc>,
    ) -> AppResult<AuditLogEntry> {
        sqlx::query_as::<_, AuditLogEntry>(
            "INSERT INTO audit_logs (id, actor_id, actor_kind, action, target_type, target_id, \
             details, ip_address, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(AuditLogId::new())
        .bind(entry.actor_id)
        .bind(entry.actor_kind)
        .bind(&entry.action)
        .bind(&entry.target_type)
        .bind(entry.target_id)
        .bind(&entry.details)
        .bind(&entry.ip_address)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create audit log entry"))
    }

    async fn list(
        &self,
        filter: &AuditFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        const WHERE: &str =
            "WHERE ($1::text IS NULL OR action = $1) AND ($2::text IS NULL OR target_type = $2)";

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM audit_logs {WHERE}"))
            .bind(&filter.action)
            .bind(&filter.target_type)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count audit logs"))?;

        let items = sqlx::query_as::<_, AuditLogEntry>(&format!(
            "SELECT * FROM audit_logs {WHERE} ORDER BY created_at DESC LIMIT $3 OFFSET $4"
        ))
        .bind(&filter.action)
        .bind(&filter.target_type)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list audit logs"))?;

        Ok(PageResponse::new(items, page.page, page.page_size, total as u64))
    }
}
