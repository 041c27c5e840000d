//! Lawyer moderation: admin listing, approval, rejection, and document
//! resubmission.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use jurist_core::config::ModerationConfig;
use jurist_core::error::AppError;
use jurist_core::result::AppResult;
use jurist_core::traits::Clock;
use jurist_core::types::{AdminId, LawyerId, PageRequest, PageResponse};
use jurist_database::store::{DocumentUrls, LawyerFilter, LawyerStore};
use jurist_entity::audit::{ActorKind, actions, targets};
use jurist_entity::lawyer::{DocumentKind, LawyerProfile, LawyerStatus};
use jurist_storage::DocumentStore;

use crate::audit::{AuditEvent, AuditRecorder};
use crate::context::ActorContext;
use crate::notification::{NotificationDispatcher, log_failure};

use super::documents::{
    DocumentUpload, delete_best_effort, ensure_distinct, store_all, urls_of,
};

/// The moderation state machine over lawyer profiles.
#[derive(Clone)]
pub struct ModerationService {
    lawyers: Arc<dyn LawyerStore>,
    documents: Arc<dyn DocumentStore>,
    notifier: Arc<dyn NotificationDispatcher>,
    audit: AuditRecorder,
    clock: Arc<dyn Clock>,
    config: ModerationConfig,
}

impl std::fmt::Debug for ModerationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModerationService")
            .field("config", &self.config)
            .finish()
    }
}

impl ModerationService {
    /// Creates a new moderation service.
    pub fn new(
        lawyers: Arc<dyn LawyerStore>,
        documents: Arc<dyn DocumentStore>,
        notifier: Arc<dyn NotificationDispatcher>,
        audit: AuditRecorder,
        clock: Arc<dyn Clock>,
        config: ModerationConfig,
    ) -> Self {
        Self {
            lawyers,
            documents,
            notifier,
            audit,
            clock,
            config,
        }
    }

    /// Filtered profile listing for administrators, newest first.
    pub async fn list(
        &self,
        filter: &LawyerFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<LawyerProfile>> {
        self.lawyers.list(filter, page).await
    }

    /// A single profile.
    pub async fn get(&self, lawyer_id: LawyerId) -> AppResult<LawyerProfile> {
        self.lawyers
            .find_by_id(lawyer_id)
            .await?
            .ok_or_else(|| AppError::not_found("Lawyer not found"))
    }

    /// Approves a `PENDING` or `REJECTED` profile.
    ///
    /// Approving an already `APPROVED` profile returns it unchanged without
    /// a new audit entry or notification.
    pub async fn approve(
        &self,
        admin_id: AdminId,
        lawyer_id: LawyerId,
        ctx: &ActorContext,
    ) -> AppResult<LawyerProfile> {
        let current = self.get(lawyer_id).await?;
        if !current.status.can_be_approved() {
            return Ok(current);
        }

        let profile = self
            .lawyers
            .set_moderation(lawyer_id, LawyerStatus::Approved, None, admin_id, self.clock.now())
            .await?
            .ok_or_else(|| AppError::not_found("Lawyer not found"))?;

        info!(lawyer_id = %lawyer_id, admin_id = %admin_id, "Lawyer approved");

        self.audit
            .record_after_commit(
                AuditEvent {
                    actor_id: admin_id.into_uuid(),
                    actor_kind: ActorKind::Admin,
                    action: actions::APPROVE_LAWYER,
                    target_type: targets::LAWYER_PROFILE,
                    target_id: lawyer_id.into_uuid(),
                    details: Some(json!({ "previousStatus": current.status })),
                },
                ctx,
            )
            .await;

        log_failure(
            "lawyer_approved",
            self.notifier
                .send_approval(&profile.email, &profile.full_name)
                .await,
        );

        Ok(profile)
    }

    /// Rejects a profile with a reason of at least the configured length.
    ///
    /// The reason is checked before the profile is looked up and stored
    /// verbatim.
    pub async fn reject(
        &self,
        admin_id: AdminId,
        lawyer_id: LawyerId,
        reason: &str,
        ctx: &ActorContext,
    ) -> AppResult<LawyerProfile> {
        let min = self.config.min_rejection_reason_chars;
        if reason.trim().is_empty() {
            return Err(AppError::invalid_field("reason", "Reason must not be blank"));
        }
        if reason.chars().count() < min {
            return Err(AppError::invalid_field(
                "reason",
                format!("Reason must be at least {min} characters long"),
            ));
        }

        let current = self.get(lawyer_id).await?;
        let profile = self
            .lawyers
            .set_moderation(
                lawyer_id,
                LawyerStatus::Rejected,
                Some(reason),
                admin_id,
                self.clock.now(),
            )
            .await?
            .ok_or_else(|| AppError::not_found("Lawyer not found"))?;

        info!(lawyer_id = %lawyer_id, admin_id = %admin_id, "Lawyer rejected");

        self.audit
            .record_after_commit(
                AuditEvent {
                    actor_id: admin_id.into_uuid(),
                    actor_kind: ActorKind::Admin,
                    action: actions::REJECT_LAWYER,
                    target_type: targets::LAWYER_PROFILE,
                    target_id: lawyer_id.into_uuid(),
                    details: Some(json!({
                        "reason": reason,
                        "previousStatus": current.status,
                    })),
                },
                ctx,
            )
            .await;

        log_failure(
            "lawyer_rejected",
            self.notifier
                .send_rejection(&profile.email, &profile.full_name, reason)
                .await,
        );

        Ok(profile)
    }

    /// Replaces one or more verification documents.
    ///
    /// A `REJECTED` profile goes back to `PENDING` with its reason
    /// cleared; other statuses are left alone. Replaced files are deleted
    /// after the profile points at the new ones.
    pub async fn resubmit_documents(
        &self,
        lawyer_id: LawyerId,
        uploads: Vec<DocumentUpload>,
    ) -> AppResult<LawyerProfile> {
        if uploads.is_empty() {
            return Err(AppError::validation(
                "At least one document (photo, diploma or license) is required",
            ));
        }
        ensure_distinct(&uploads)?;

        let current = self.get(lawyer_id).await?;
        let stored = store_all(self.documents.as_ref(), uploads).await?;

        let mut urls = DocumentUrls::default();
        for (kind, url) in &stored {
            let slot = match kind {
                DocumentKind::Photo => &mut urls.photo_url,
                DocumentKind::Diploma => &mut urls.diploma_url,
                DocumentKind::License => &mut urls.license_url,
            };
            *slot = Some(url.clone());
        }

        let updated = match self
            .lawyers
            .replace_documents(lawyer_id, &urls, self.clock.now())
            .await
        {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                delete_best_effort(self.documents.as_ref(), &urls_of(&stored)).await;
                return Err(AppError::not_found("Lawyer not found"));
            }
            Err(e) => {
                delete_best_effort(self.documents.as_ref(), &urls_of(&stored)).await;
                return Err(e);
            }
        };

        let replaced: Vec<String> = stored
            .iter()
            .map(|(kind, _)| current.document_url(*kind).to_string())
            .collect();
        delete_best_effort(self.documents.as_ref(), &replaced).await;

        info!(
            lawyer_id = %lawyer_id,
            documents = stored.len(),
            from = %current.status,
            to = %updated.status,
            "Documents resubmitted"
        );
        Ok(updated)
    }
}
