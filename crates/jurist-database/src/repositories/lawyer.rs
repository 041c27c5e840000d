//! Lawyer profile repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use jurist_core::result::AppResult;
use jurist_core::types::{AdminId, LawyerId, PageRequest, PageResponse};
use jurist_entity::lawyer::{LawyerProfile, LawyerProfileUpdate, LawyerStatus, NewLawyerProfile};

use super::{conflict_or_db_error, db_error, like_pattern};
use crate::store::{DocumentUrls, LawyerCounts, LawyerFilter, LawyerStore};

/// Unique constraints on `lawyer_profiles` and the conflict each reports.
const UNIQUE_CONSTRAINTS: &[(&str, &str)] = &[
    ("lawyer_profiles_email_key", "Email already registered"),
    ("lawyer_profiles_external_ref_key", "Account already has a lawyer profile"),
    ("lawyer_profiles_iin_key", "IIN already registered"),
];

/// Repository for lawyer profile CRUD and moderation updates.
#[derive(Debug, Clone)]
pub struct LawyerRepository {
    pool: PgPool,
}

impl LawyerRepository {
    /// Create a new lawyer repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LawyerStore for LawyerRepository {
    async fn insert(
        &self,
        data: &NewLawyerProfile,
        now: DateTime<Utc>,
    ) -> AppResult<LawyerProfile> {
        sqlx::query_as::<_, LawyerProfile>(
            "INSERT INTO lawyer_profiles (id, external_ref, email, category, full_name, iin, phone, \
             photo_url, diploma_url, license_url, email_verified, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, FALSE, 'pending', $11, $11) \
             RETURNING *",
        )
        .bind(LawyerId::new())
        .bind(&data.external_ref)
        .bind(&data.email)
        .bind(data.category)
        .bind(&data.full_name)
        .bind(&data.iin)
        .bind(&data.phone)
        .bind(&data.photo_url)
        .bind(&data.diploma_url)
        .bind(&data.license_url)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(conflict_or_db_error(
            "Failed to create lawyer profile",
            UNIQUE_CONSTRAINTS,
        ))
    }

    async fn find_by_id(&self, id: LawyerId) -> AppResult<Option<LawyerProfile>> {
        sqlx::query_as::<_, LawyerProfile>("SELECT * FROM lawyer_profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find lawyer profile"))
    }

    async fn find_by_external_ref(
        &self,
        external_ref: &str,
    ) -> AppResult<Option<LawyerProfile>> {
        sqlx::query_as::<_, LawyerProfile>(
            "SELECT * FROM lawyer_profiles WHERE external_ref = $1",
        )
        .bind(external_ref)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find lawyer profile by external ref"))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<LawyerProfile>> {
        sqlx::query_as::<_, LawyerProfile>(
            "SELECT * FROM lawyer_profiles WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find lawyer profile by email"))
    }

    async fn find_by_iin(&self, iin: &str) -> AppResult<Option<LawyerProfile>> {
        sqlx::query_as::<_, LawyerProfile>("SELECT * FROM lawyer_profiles WHERE iin = $1")
            .bind(iin)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find lawyer profile by IIN"))
    }

    async fn list(
        &self,
        filter: &LawyerFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<LawyerProfile>> {
        const WHERE: &str = "WHERE ($1::lawyer_status IS NULL OR status = $1) \
             AND ($2::lawyer_category IS NULL OR category = $2) \
             AND ($3::text IS NULL OR full_name ILIKE $3 OR email ILIKE $3 OR iin ILIKE $3)";

        let pattern = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM lawyer_profiles {WHERE}"))
                .bind(filter.status)
                .bind(filter.category)
                .bind(&pattern)
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("Failed to count lawyer profiles"))?;

        let items = sqlx::query_as::<_, LawyerProfile>(&format!(
            "SELECT * FROM lawyer_profiles {WHERE} ORDER BY created_at DESC LIMIT $4 OFFSET $5"
        ))
        .bind(filter.status)
        .bind(filter.category)
        .bind(&pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list lawyer profiles"))?;

        Ok(PageResponse::new(items, page.page, page.page_size, total as u64))
    }

    async fn approved_emails(&self) -> AppResult<Vec<String>> {
        sqlx::query_scalar(
            "SELECT email FROM lawyer_profiles WHERE status = 'approved' ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list approved lawyer e-mails"))
    }

    async fn update_profile(
        &self,
        id: LawyerId,
        update: &LawyerProfileUpdate,
        now: DateTime<Utc>,
    ) -> AppResult<Option<LawyerProfile>> {
        sqlx::query_as::<_, LawyerProfile>(
            "UPDATE lawyer_profiles SET full_name = COALESCE($2, full_name), \
             phone = COALESCE($3, phone), updated_at = $4 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&update.full_name)
        .bind(&update.phone)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update lawyer profile"))
    }

    async fn set_moderation(
        &self,
        id: LawyerId,
        status: LawyerStatus,
        reason: Option<&str>,
        moderator: AdminId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<LawyerProfile>> {
        sqlx::query_as::<_, LawyerProfile>(
            "UPDATE lawyer_profiles SET status = $2, rejection_reason = $3, \
             moderated_by = $4, moderated_at = $5, updated_at = $5 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(reason)
        .bind(moderator)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to record moderation decision"))
    }

    async fn replace_documents(
        &self,
        id: LawyerId,
        documents: &DocumentUrls,
        now: DateTime<Utc>,
    ) -> AppResult<Option<LawyerProfile>> {
        sqlx::query_as::<_, LawyerProfile>(
            "UPDATE lawyer_profiles SET \
             photo_url = COALESCE($2, photo_url), \
             diploma_url = COALESCE($3, diploma_url), \
             license_url = COALESCE($4, license_url), \
             rejection_reason = CASE WHEN status = 'rejected' THEN NULL ELSE rejection_reason END, \
             status = CASE WHEN status = 'rejected' THEN 'pending'::lawyer_status ELSE status END, \
             updated_at = $5 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&documents.photo_url)
        .bind(&documents.diploma_url)
        .bind(&documents.license_url)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to replace lawyer documents"))
    }

    async fn mark_email_verified(
        &self,
        id: LawyerId,
        at: DateTime<Utc>,
    ) -> AppResult<Option<LawyerProfile>> {
        sqlx::query_as::<_, LawyerProfile>(
            "UPDATE lawyer_profiles SET email_verified = TRUE, \
             email_verified_at = COALESCE(email_verified_at, $2), updated_at = $2 \
             WHERE id = $1 AND NOT email_verified RETURNING *",
        )
        .bind(id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to mark e-mail verified"))
    }

    async fn counts(&self) -> AppResult<LawyerCounts> {
        let (total, pending, approved, rejected): (i64, i64, i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), \
             COUNT(*) FILTER (WHERE status = 'pending'), \
             COUNT(*) FILTER (WHERE status = 'approved'), \
             COUNT(*) FILTER (WHERE status = 'rejected') \
             FROM lawyer_profiles",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count lawyer profiles"))?;

        Ok(LawyerCounts {
            total: total as u64,
            pending: pending as u64,
            approved: approved as u64,
            rejected: rejected as u64,
        })
    }
}
