//! # jurist-api
//!
//! HTTP API layer for the Jurist marketplace built on Axum.
//!
//! Provides all REST endpoints under `/api`, bearer-token extractors,
//! request logging and CORS middleware, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::{AppState, Backends};
