//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use jurist_api::{AppState, Backends};
use jurist_auth::{JwtEncoder, UserType};
use jurist_core::config::AppConfig;
use jurist_core::traits::{Clock, ManualClock, StorageProvider};
use jurist_core::types::AdminId;
use jurist_database::memory::{
    MemoryAdminStore, MemoryAuditStore, MemoryJobStore, MemoryLawyerStore, MemoryRequestStore,
};
use jurist_database::store::{AdminStore, LawyerStore};
use jurist_entity::admin::{AdminRole, AdminUser, NewAdminUser};
use jurist_entity::lawyer::{LawyerCategory, LawyerProfile, LawyerStatus, NewLawyerProfile};
use jurist_storage::{LocalStorageProvider, ProviderDocumentStore};
use jurist_worker::{JobQueue, QueuedNotificationDispatcher};

/// A valid IIN (control digit 7).
pub const VALID_IIN: &str = "900101300017";

const BOUNDARY: &str = "jurist-test-boundary";

/// Decoded response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Test application context over in-memory stores
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    pub requests: Arc<MemoryRequestStore>,
    pub lawyers: Arc<MemoryLawyerStore>,
    pub admins: Arc<MemoryAdminStore>,
    pub audits: Arc<MemoryAuditStore>,
    pub jobs: Arc<MemoryJobStore>,
    pub clock: Arc<ManualClock>,
    pub config: AppConfig,
    /// Root of the local document storage
    pub storage_dir: TempDir,
    encoder: JwtEncoder,
    seq: AtomicU32,
}

/// 2025-03-10 09:00 in Almaty.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 4, 0, 0).unwrap()
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let storage_dir = tempfile::tempdir().expect("Failed to create storage dir");

        let mut config = AppConfig::default();
        config.storage.local_root = storage_dir.path().to_string_lossy().into_owned();
        // Requests arrive as if through one reverse proxy.
        config.server.trust_forwarded_for = true;

        let requests = Arc::new(MemoryRequestStore::new());
        let lawyers = Arc::new(MemoryLawyerStore::new());
        let admins = Arc::new(MemoryAdminStore::new());
        let audits = Arc::new(MemoryAuditStore::new());
        let jobs = Arc::new(MemoryJobStore::new());
        let clock = Arc::new(ManualClock::new(start_time()));

        let provider: Arc<dyn StorageProvider> = Arc::new(
            LocalStorageProvider::new(&config.storage.local_root)
                .await
                .expect("Failed to init storage"),
        );
        let documents = Arc::new(ProviderDocumentStore::new(provider, &config.storage));
        let queue = JobQueue::new(jobs.clone(), clock.clone());

        let state = AppState::new(
            config.clone(),
            Backends {
                requests: requests.clone(),
                lawyers: lawyers.clone(),
                admins: admins.clone(),
                audits: audits.clone(),
                documents,
                notifier: Arc::new(QueuedNotificationDispatcher::new(queue, 3)),
                clock: clock.clone(),
            },
        );

        Self {
            router: jurist_api::build_router(state),
            encoder: JwtEncoder::new(&config.auth),
            requests,
            lawyers,
            admins,
            audits,
            jobs,
            clock,
            config,
            storage_dir,
            seq: AtomicU32::new(1),
        }
    }

    /// Sign a token the way the identity provider would
    pub fn token(&self, subject: &str, email: &str, user_type: Option<UserType>) -> String {
        self.encoder
            .issue(
                subject,
                email,
                user_type,
                Some(Utc::now()),
                Duration::hours(1),
            )
            .expect("Failed to sign token")
    }

    /// Insert a lawyer profile in `status` and return it with a token
    pub async fn create_lawyer(&self, status: LawyerStatus) -> (LawyerProfile, String) {
        let n = self.seq.fetch_add(1, Ordering::SeqCst);
        let subject = format!("lawyer-sub-{n}");
        let email = format!("lawyer{n}@mail.kz");
        let profile = self
            .lawyers
            .insert(
                &NewLawyerProfile {
                    external_ref: subject.clone(),
                    email: email.clone(),
                    category: LawyerCategory::Advocate,
                    full_name: format!("Lawyer {n}"),
                    iin: format!("{n:012}"),
                    phone: "+77011234567".to_string(),
                    photo_url: format!("seed://photos/{n}"),
                    diploma_url: format!("seed://diplomas/{n}"),
                    license_url: format!("seed://licenses/{n}"),
                },
                self.clock.now(),
            )
            .await
            .expect("Failed to insert lawyer");

        let profile = if status == LawyerStatus::Pending {
            profile
        } else {
            let reason = (status == LawyerStatus::Rejected).then_some("Diploma scan is unreadable");
            self.lawyers
                .set_moderation(profile.id, status, reason, AdminId::new(), self.clock.now())
                .await
                .expect("Failed to moderate lawyer")
                .expect("Lawyer vanished")
        };

        let token = self.token(&subject, &email, Some(UserType::Lawyer));
        (profile, token)
    }

    /// Provision an administrator and return it with a token
    pub async fn create_admin(&self) -> (AdminUser, String) {
        let n = self.seq.fetch_add(1, Ordering::SeqCst);
        let subject = format!("admin-sub-{n}");
        let email = format!("admin{n}@jurist.kz");
        let admin = self
            .admins
            .insert(
                &NewAdminUser {
                    external_ref: subject.clone(),
                    email: email.clone(),
                    full_name: format!("Admin {n}"),
                    role: AdminRole::Moderator,
                },
                self.clock.now(),
            )
            .await
            .expect("Failed to insert admin");
        let token = self.token(&subject, &email, Some(UserType::Admin));
        (admin, token)
    }

    /// Make a JSON request from the default client address
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.request_from("10.0.0.1", method, uri, body, token).await
    }

    /// Make a JSON request from `ip`
    pub async fn request_from(
        &self,
        ip: &str,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-forwarded-for", ip);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        send(self.router.clone(), request).await
    }

    /// Make a multipart request with text `fields` and `(name, mime, bytes)` files
    pub async fn multipart(
        &self,
        uri: &str,
        token: Option<&str>,
        fields: &[(&str, &str)],
        files: &[(&str, &str, &[u8])],
    ) -> TestResponse {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        for (name, mime, bytes) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                     filename=\"{name}.bin\"\r\nContent-Type: {mime}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = builder
            .body(Body::from(body))
            .expect("Failed to build request");

        send(self.router.clone(), request).await
    }

    /// A valid public submission
    pub fn submission(description_len: usize) -> Value {
        serde_json::json!({
            "description": "d".repeat(description_len),
            "budget": 150000,
            "currency": "KZT",
            "contactName": "Dana Nurlanovna",
            "phone": "8 701 123 45 67",
            "email": "client@mail.kz",
            "preferredContact": "PHONE",
        })
    }

    /// Submit a request and return its ID
    pub async fn submit_request(&self) -> String {
        let response = self
            .request("POST", "/api/requests", Some(Self::submission(80)), None)
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.body["data"]["id"]
            .as_str()
            .expect("Receipt has no id")
            .to_string()
    }

    /// Kinds of every queued notification, oldest first
    pub async fn notification_kinds(&self) -> Vec<String> {
        self.jobs
            .all()
            .await
            .iter()
            .filter_map(|job| job.payload["kind"].as_str().map(str::to_string))
            .collect()
    }
}

/// Drive one request through a router clone
pub async fn send(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.expect("Router failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    TestResponse { status, body }
}
