//! Shared fixtures for the service unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};

use jurist_core::config::{ModerationConfig, RequestsConfig};
use jurist_core::error::AppError;
use jurist_core::result::AppResult;
use jurist_core::traits::{Clock, ManualClock};
use jurist_core::types::AdminId;
use jurist_database::memory::{MemoryAuditStore, MemoryLawyerStore, MemoryRequestStore};
use jurist_database::store::LawyerStore;
use jurist_entity::lawyer::{DocumentKind, LawyerCategory, LawyerProfile, LawyerStatus, NewLawyerProfile};
use jurist_entity::request::{Currency, PreferredContact, Request};
use jurist_storage::DocumentStore;

use crate::audit::AuditRecorder;
use crate::lawyer::{DocumentUpload, ModerationService, OnboardingService, ProfileService};
use crate::notification::NotificationDispatcher;
use crate::request::{AdminRequestService, RequestService, SubmitRequest};
use crate::stats::StatsService;

/// Records every publish as `kind:detail`.
#[derive(Debug, Default)]
pub(crate) struct RecordingDispatcher {
    pub events: Mutex<Vec<String>>,
    pub failing: AtomicBool,
}

impl RecordingDispatcher {
    fn push(&self, event: String) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::dependency("mail relay down"));
        }
        self.events
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(event);
        Ok(())
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.events().iter().filter(|e| e.starts_with(prefix)).count()
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingDispatcher {
    async fn send_approval(&self, email: &str, _full_name: &str) -> AppResult<()> {
        self.push(format!("approval:{email}"))
    }

    async fn send_rejection(&self, email: &str, _full_name: &str, reason: &str) -> AppResult<()> {
        self.push(format!("rejection:{email}:{reason}"))
    }

    async fn send_request_confirmation(
        &self,
        email: &str,
        _contact_name: &str,
        request_number: &str,
    ) -> AppResult<()> {
        self.push(format!("confirmation:{email}:{request_number}"))
    }

    async fn notify_lawyers_of_new_request(
        &self,
        emails: &[String],
        request_number: &str,
        _description: &str,
        budget_label: &str,
    ) -> AppResult<()> {
        self.push(format!(
            "lawyers:{}:{request_number}:{budget_label}",
            emails.join(",")
        ))
    }

    async fn notify_admin_of_new_request(
        &self,
        request_number: &str,
        _contact_name: &str,
        _description: &str,
    ) -> AppResult<()> {
        self.push(format!("admin_request:{request_number}"))
    }

    async fn notify_admin_of_new_lawyer(
        &self,
        _full_name: &str,
        email: &str,
        category: &str,
    ) -> AppResult<()> {
        self.push(format!("admin_lawyer:{email}:{category}"))
    }
}

/// Document store keeping files in a map. Can be told to fail one folder.
#[derive(Debug, Default)]
pub(crate) struct MemoryDocuments {
    pub files: Mutex<HashMap<String, Bytes>>,
    pub fail_folder: Mutex<Option<&'static str>>,
    next: AtomicU32,
}

impl MemoryDocuments {
    pub fn urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self
            .files
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .keys()
            .cloned()
            .collect();
        urls.sort();
        urls
    }

    pub fn fail_on(&self, folder: &'static str) {
        *self.fail_folder.lock().unwrap_or_else(|p| p.into_inner()) = Some(folder);
    }
}

#[async_trait]
impl DocumentStore for MemoryDocuments {
    async fn store(&self, data: Bytes, _mime_type: &str, folder: &str) -> AppResult<String> {
        if *self.fail_folder.lock().unwrap_or_else(|p| p.into_inner()) == Some(folder) {
            return Err(AppError::dependency("storage down"));
        }
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        let url = format!("mem://{folder}/{n}");
        self.files
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(url.clone(), data);
        Ok(url)
    }

    async fn delete(&self, url: &str) -> AppResult<()> {
        self.files
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .remove(url);
        Ok(())
    }
}

/// Memory-backed services sharing one clock.
pub(crate) struct Harness {
    pub requests: Arc<MemoryRequestStore>,
    pub lawyers: Arc<MemoryLawyerStore>,
    pub audits: Arc<MemoryAuditStore>,
    pub notifier: Arc<RecordingDispatcher>,
    pub documents: Arc<MemoryDocuments>,
    pub clock: Arc<ManualClock>,
    seq: AtomicU32,
}

/// 2025-03-10 09:00 in Almaty.
pub(crate) fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 4, 0, 0).unwrap()
}

impl Harness {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(MemoryRequestStore::new()),
            lawyers: Arc::new(MemoryLawyerStore::new()),
            audits: Arc::new(MemoryAuditStore::new()),
            notifier: Arc::new(RecordingDispatcher::default()),
            documents: Arc::new(MemoryDocuments::default()),
            clock: Arc::new(ManualClock::new(start_time())),
            seq: AtomicU32::new(1),
        }
    }

    fn audit(&self) -> AuditRecorder {
        AuditRecorder::new(self.audits.clone(), self.clock.clone())
    }

    pub fn request_service(&self) -> RequestService {
        RequestService::new(
            self.requests.clone(),
            self.lawyers.clone(),
            self.notifier.clone(),
            self.clock.clone(),
            RequestsConfig::default(),
        )
    }

    pub fn admin_requests(&self) -> AdminRequestService {
        AdminRequestService::new(self.requests.clone(), self.audit(), self.clock.clone())
    }

    pub fn moderation(&self) -> ModerationService {
        ModerationService::new(
            self.lawyers.clone(),
            self.documents.clone(),
            self.notifier.clone(),
            self.audit(),
            self.clock.clone(),
            ModerationConfig::default(),
        )
    }

    pub fn onboarding(&self) -> OnboardingService {
        OnboardingService::new(
            self.lawyers.clone(),
            self.documents.clone(),
            self.notifier.clone(),
            self.clock.clone(),
        )
    }

    pub fn profiles(&self) -> ProfileService {
        ProfileService::new(self.lawyers.clone(), self.clock.clone())
    }

    pub fn stats(&self) -> StatsService {
        StatsService::new(
            self.requests.clone(),
            self.lawyers.clone(),
            self.clock.clone(),
            RequestsConfig::default(),
        )
    }

    /// Insert a profile directly and move it to `status`.
    pub async fn lawyer(&self, status: LawyerStatus) -> LawyerProfile {
        let n = self.seq.fetch_add(1, Ordering::SeqCst);
        let profile = self
            .lawyers
            .insert(
                &NewLawyerProfile {
                    external_ref: format!("sub-{n}"),
                    email: format!("lawyer{n}@jurist.kz"),
                    category: LawyerCategory::Consultant,
                    full_name: format!("Lawyer {n}"),
                    iin: format!("{n:012}"),
                    phone: "+77011234567".to_string(),
                    photo_url: format!("mem://photos/seed-{n}"),
                    diploma_url: format!("mem://diplomas/seed-{n}"),
                    license_url: format!("mem://licenses/seed-{n}"),
                },
                self.clock.now(),
            )
            .await
            .unwrap();
        if status == LawyerStatus::Pending {
            return profile;
        }
        let reason = (status == LawyerStatus::Rejected).then_some("Documents are unreadable");
        self.lawyers
            .set_moderation(profile.id, status, reason, AdminId::new(), self.clock.now())
            .await
            .unwrap()
            .unwrap()
    }

    /// A valid submission with a description of `len` characters.
    pub fn submission(len: usize) -> SubmitRequest {
        SubmitRequest {
            description: "d".repeat(len),
            budget: 150_000,
            currency: Currency::Kzt,
            contact_name: "Dana Nurlanovna".to_string(),
            phone: "+77011234567".to_string(),
            email: Some("client@mail.kz".to_string()),
            preferred_contact: PreferredContact::Phone,
        }
    }

    pub async fn submit(&self, ip: &str) -> Request {
        self.request_service()
            .submit(Self::submission(80), ip)
            .await
            .unwrap()
    }
}

/// One upload of `kind`.
pub(crate) fn upload(kind: DocumentKind) -> DocumentUpload {
    DocumentUpload {
        kind,
        mime_type: "application/pdf".to_string(),
        data: Bytes::from_static(b"%PDF-1.7"),
    }
}
