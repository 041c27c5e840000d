//! In-memory store implementations.
//!
//! Each store keeps its rows behind one `tokio::sync::Mutex`, which gives
//! the same all-or-nothing behaviour the SQL implementations get from
//! conditional updates and transactions. Suitable for tests and
//! single-process development runs only.

mod admin;
mod audit;
mod job;
mod lawyer;
mod request;

pub use admin::MemoryAdminStore;
pub use audit::MemoryAuditStore;
pub use job::MemoryJobStore;
pub use lawyer::MemoryLawyerStore;
pub use request::MemoryRequestStore;

use jurist_core::types::{PageRequest, PageResponse};
use serde::Serialize;

/// Page an already-ordered result set.
fn paginate<T: Clone + Serialize>(items: &[T], page: &PageRequest) -> PageResponse<T> {
    PageResponse::new(
        page.slice(items),
        page.page,
        page.page_size,
        items.len() as u64,
    )
}
