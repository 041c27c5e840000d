//! In-memory lawyer profile store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use jurist_core::error::AppError;
use jurist_core::result::AppResult;
use jurist_core::types::{AdminId, LawyerId, PageRequest, PageResponse};
use jurist_entity::lawyer::{LawyerProfile, LawyerProfileUpdate, LawyerStatus, NewLawyerProfile};

use super::paginate;
use crate::store::{DocumentUrls, LawyerCounts, LawyerFilter, LawyerStore};

/// Lawyer store backed by a mutex-guarded map.
#[derive(Debug, Clone, Default)]
pub struct MemoryLawyerStore {
    profiles: Arc<Mutex<HashMap<LawyerId, LawyerProfile>>>,
}

impl MemoryLawyerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    async fn modify(
        &self,
        id: LawyerId,
        f: impl FnOnce(&mut LawyerProfile),
    ) -> AppResult<Option<LawyerProfile>> {
        let mut profiles = self.profiles.lock().await;
        Ok(profiles.get_mut(&id).map(|profile| {
            f(profile);
            profile.clone()
        }))
    }

    async fn find(&self, predicate: impl Fn(&LawyerProfile) -> bool) -> Option<LawyerProfile> {
        self.profiles
            .lock()
            .await
            .values()
            .find(|p| predicate(p))
            .cloned()
    }
}

fn matches(filter: &LawyerFilter, profile: &LawyerProfile) -> bool {
    if filter.status.is_some_and(|s| profile.status != s) {
        return false;
    }
    if filter.category.is_some_and(|c| profile.category != c) {
        return false;
    }
    match filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(term) => {
            let term = term.to_lowercase();
            profile.full_name.to_lowercase().contains(&term)
                || profile.email.to_lowercase().contains(&term)
                || profile.iin.contains(&term)
        }
        None => true,
    }
}

#[async_trait]
impl LawyerStore for MemoryLawyerStore {
    async fn insert(
        &self,
        data: &NewLawyerProfile,
        now: DateTime<Utc>,
    ) -> AppResult<LawyerProfile> {
        let mut profiles = self.profiles.lock().await;
        for existing in profiles.values() {
            if existing.email.eq_ignore_ascii_case(&data.email) {
                return Err(AppError::conflict("Email already registered"));
            }
            if existing.external_ref == data.external_ref {
                return Err(AppError::conflict("Account already has a lawyer profile"));
            }
            if existing.iin == data.iin {
                return Err(AppError::conflict("IIN already registered"));
            }
        }

        let profile = LawyerProfile {
            id: LawyerId::new(),
            external_ref: data.external_ref.clone(),
            email: data.email.clone(),
            category: data.category,
            full_name: data.full_name.clone(),
            iin: data.iin.clone(),
            phone: data.phone.clone(),
            photo_url: data.photo_url.clone(),
            diploma_url: data.diploma_url.clone(),
            license_url: data.license_url.clone(),
            email_verified: false,
            email_verified_at: None,
            status: LawyerStatus::Pending,
            rejection_reason: None,
            moderated_by: None,
            moderated_at: None,
            created_at: now,
            updated_at: now,
        };
        profiles.insert(profile.id, profile.clone());
        Ok(profile)
    }

    async fn find_by_id(&self, id: LawyerId) -> AppResult<Option<LawyerProfile>> {
        Ok(self.profiles.lock().await.get(&id).cloned())
    }

    async fn find_by_external_ref(
        &self,
        external_ref: &str,
    ) -> AppResult<Option<LawyerProfile>> {
        Ok(self.find(|p| p.external_ref == external_ref).await)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<LawyerProfile>> {
        Ok(self.find(|p| p.email.eq_ignore_ascii_case(email)).await)
    }

    async fn find_by_iin(&self, iin: &str) -> AppResult<Option<LawyerProfile>> {
        Ok(self.find(|p| p.iin == iin).await)
    }

    async fn list(
        &self,
        filter: &LawyerFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<LawyerProfile>> {
        let profiles = self.profiles.lock().await;
        let mut items: Vec<LawyerProfile> = profiles
            .values()
            .filter(|p| matches(filter, p))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));
        Ok(paginate(&items, page))
    }

    async fn approved_emails(&self) -> AppResult<Vec<String>> {
        let profiles = self.profiles.lock().await;
        let mut approved: Vec<&LawyerProfile> = profiles
            .values()
            .filter(|p| p.status == LawyerStatus::Approved)
            .collect();
        approved.sort_by_key(|p| p.created_at);
        Ok(approved.into_iter().map(|p| p.email.clone()).collect())
    }

    async fn update_profile(
        &self,
        id: LawyerId,
        update: &LawyerProfileUpdate,
        now: DateTime<Utc>,
    ) -> AppResult<Option<LawyerProfile>> {
        self.modify(id, |p| {
            if let Some(name) = &update.full_name {
                p.full_name = name.clone();
            }
            if let Some(phone) = &update.phone {
                p.phone = phone.clone();
            }
            p.updated_at = now;
        })
        .await
    }

    async fn set_moderation(
        &self,
        id: LawyerId,
        status: LawyerStatus,
        reason: Option<&str>,
        moderator: AdminId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<LawyerProfile>> {
        self.modify(id, |p| {
            p.status = status;
            p.rejection_reason = reason.map(str::to_string);
            p.moderated_by = Some(moderator);
            p.moderated_at = Some(now);
            p.updated_at = now;
        })
        .await
    }

    async fn replace_documents(
        &self,
        id: LawyerId,
        documents: &DocumentUrls,
        now: DateTime<Utc>,
    ) -> AppResult<Option<LawyerProfile>> {
        self.modify(id, |p| {
            if let Some(url) = &documents.photo_url {
                p.photo_url = url.clone();
            }
            if let Some(url) = &documents.diploma_url {
                p.diploma_url = url.clone();
            }
            if let Some(url) = &documents.license_url {
                p.license_url = url.clone();
            }
            if p.status == LawyerStatus::Rejected {
                p.rejection_reason = None;
            }
            p.status = p.status.after_resubmission();
            p.updated_at = now;
        })
        .await
    }

    async fn mark_email_verified(
        &self,
        id: LawyerId,
        at: DateTime<Utc>,
    ) -> AppResult<Option<LawyerProfile>> {
        let mut profiles = self.profiles.lock().await;
        match profiles.get_mut(&id) {
            Some(p) if !p.email_verified => {
                p.email_verified = true;
                p.email_verified_at.get_or_insert(at);
                p.updated_at = at;
                Ok(Some(p.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn counts(&self) -> AppResult<LawyerCounts> {
        let profiles = self.profiles.lock().await;
        let with = |s: LawyerStatus| profiles.values().filter(|p| p.status == s).count() as u64;
        Ok(LawyerCounts {
            total: profiles.len() as u64,
            pending: with(LawyerStatus::Pending),
            approved: with(LawyerStatus::Approved),
            rejected: with(LawyerStatus::Rejected),
        })
    }
}
