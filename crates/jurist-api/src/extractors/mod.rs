//! Custom Axum extractors.

pub mod auth;
pub mod client;
pub mod pagination;
pub mod path;

pub use auth::{AdminCaller, CurrentPrincipal, LawyerCaller, VerifiedIdentity};
pub use client::ClientInfo;
pub use pagination::PaginationParams;
pub use path::parse_id;
