//! # jurist-service
//!
//! Business logic for the Jurist marketplace. Each service orchestrates the
//! store traits, the document store, the audit recorder, and the
//! notification dispatcher to implement one group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references, so the same code runs over
//! PostgreSQL in production and over the in-memory stores in tests.

pub mod audit;
pub mod context;
pub mod lawyer;
pub mod notification;
pub mod request;
pub mod stats;

mod validation;

#[cfg(test)]
mod testing;

pub use audit::{AuditEvent, AuditRecorder};
pub use context::ActorContext;
pub use lawyer::{
    DocumentUpload, ModerationService, OnboardingService, ProfileService, RegisterLawyer,
    UpdateProfile,
};
pub use notification::{NotificationDispatcher, budget_label};
pub use request::{AdminRequestService, RequestService, SubmitRequest};
pub use stats::{DashboardStats, LawyerStats, RequestStats, StatsService};
