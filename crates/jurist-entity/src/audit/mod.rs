//! Audit log entities.

pub mod model;

pub use model::{ActorKind, AuditLogEntry, CreateAuditLogEntry, actions, targets};
