//! Request and response bodies of the HTTP surface.

pub mod request;
pub mod response;

pub use response::ApiResponse;
