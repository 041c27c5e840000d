//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use jurist_auth::{JwtDecoder, PrincipalResolver};
use jurist_core::config::AppConfig;
use jurist_core::traits::Clock;
use jurist_database::store::{AdminStore, AuditStore, LawyerStore, RequestStore};
use jurist_service::{
    AdminRequestService, AuditRecorder, ModerationService, NotificationDispatcher,
    OnboardingService, ProfileService, RequestService, StatsService,
};
use jurist_storage::DocumentStore;

/// The storage and delivery backends the services run on.
///
/// The server passes Postgres repositories and the queued dispatcher; the
/// HTTP tests pass in-memory equivalents.
#[derive(Clone)]
pub struct Backends {
    /// Client requests.
    pub requests: Arc<dyn RequestStore>,
    /// Lawyer profiles.
    pub lawyers: Arc<dyn LawyerStore>,
    /// Administrator accounts.
    pub admins: Arc<dyn AdminStore>,
    /// Audit log.
    pub audits: Arc<dyn AuditStore>,
    /// Verification documents.
    pub documents: Arc<dyn DocumentStore>,
    /// Outbound notifications.
    pub notifier: Arc<dyn NotificationDispatcher>,
    /// Source of "now".
    pub clock: Arc<dyn Clock>,
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// When the process started serving
    pub started_at: Instant,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token → principal
    pub resolver: Arc<PrincipalResolver>,

    // ── Services ─────────────────────────────────────────────
    /// Public intake and the lawyer marketplace
    pub requests: RequestService,
    /// Administrator request management
    pub admin_requests: AdminRequestService,
    /// Lawyer moderation and document resubmission
    pub moderation: ModerationService,
    /// Lawyer registration
    pub onboarding: OnboardingService,
    /// Lawyer self-service profile
    pub profiles: ProfileService,
    /// Dashboard figures
    pub stats: StatsService,
    /// Audit log reads
    pub audit: AuditRecorder,
}

impl AppState {
    /// Wire every service over `backends`.
    pub fn new(config: AppConfig, backends: Backends) -> Self {
        let Backends {
            requests,
            lawyers,
            admins,
            audits,
            documents,
            notifier,
            clock,
        } = backends;

        let decoder = Arc::new(JwtDecoder::new(&config.auth));
        let resolver = Arc::new(PrincipalResolver::new(
            decoder,
            Arc::clone(&lawyers),
            admins,
        ));
        let audit = AuditRecorder::new(audits, Arc::clone(&clock));

        Self {
            requests: RequestService::new(
                Arc::clone(&requests),
                Arc::clone(&lawyers),
                Arc::clone(&notifier),
                Arc::clone(&clock),
                config.requests.clone(),
            ),
            admin_requests: AdminRequestService::new(
                Arc::clone(&requests),
                audit.clone(),
                Arc::clone(&clock),
            ),
            moderation: ModerationService::new(
                Arc::clone(&lawyers),
                Arc::clone(&documents),
                Arc::clone(&notifier),
                audit.clone(),
                Arc::clone(&clock),
                config.moderation.clone(),
            ),
            onboarding: OnboardingService::new(
                Arc::clone(&lawyers),
                documents,
                notifier,
                Arc::clone(&clock),
            ),
            profiles: ProfileService::new(Arc::clone(&lawyers), Arc::clone(&clock)),
            stats: StatsService::new(requests, lawyers, clock, config.requests.clone()),
            audit,
            resolver,
            started_at: Instant::now(),
            config: Arc::new(config),
        }
    }
}
