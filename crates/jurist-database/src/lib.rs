//! # jurist-database
//!
//! PostgreSQL connection management, the store traits the services depend
//! on, their sqlx repository implementations and in-memory equivalents
//! used by tests and single-process development runs.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{
    AdminStore, AuditFilter, AuditStore, DocumentUrls, JobStore, LawyerCounts, LawyerFilter,
    LawyerStore, RequestCounts, RequestStore, SubmissionQuota,
};
