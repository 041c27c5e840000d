//! Administrator repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use jurist_core::result::AppResult;
use jurist_core::types::AdminId;
use jurist_entity::admin::{AdminUser, NewAdminUser};

use super::{conflict_or_db_error, db_error};
use crate::store::AdminStore;

/// Repository for administrator accounts.
#[derive(Debug, Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    /// Create a new admin repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminStore for AdminRepository {
    async fn insert(&self, data: &NewAdminUser, now: DateTime<Utc>) -> AppResult<AdminUser> {
        sqlx::query_as::<_, AdminUser>(
            "INSERT INTO admin_users (id, external_ref, email, full_name, role, is_active, created_at) \
             VALUES ($1, $2, $3, $4, $5, TRUE, $6) RETURNING *",
        )
        .bind(AdminId::new())
        .bind(&data.external_ref)
        .bind(&data.email)
        .bind(&data.full_name)
        .bind(data.role)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(conflict_or_db_error(
            "Failed to create admin",
            &[(
                "admin_users_external_ref_key",
                "Account is already an administrator",
            )],
        ))
    }

    async fn find_by_id(&self, id: AdminId) -> AppResult<Option<AdminUser>> {
        sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find admin"))
    }

    async fn find_by_external_ref(&self, external_ref: &str) -> AppResult<Option<AdminUser>> {
        sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users WHERE external_ref = $1")
            .bind(external_ref)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find admin by external ref"))
    }
}
