//! Core type definitions shared by the Jurist crates.

pub mod id;
pub mod pagination;
pub mod response;

pub use id::*;
pub use pagination::{PageRequest, PageResponse};
pub use response::ApiErrorResponse;
