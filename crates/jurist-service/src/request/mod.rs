//! Request lifecycle services.

pub mod admin;
pub mod dto;
pub mod service;

pub use admin::AdminRequestService;
pub use dto::SubmitRequest;
pub use service::RequestService;
