//! Client legal request entities.

pub mod model;
pub mod number;
pub mod status;

pub use model::{NewRequest, Request, RequestSummary};
pub use number::{RequestNumber, local_day, local_midnight};
pub use status::{Currency, PreferredContact, RequestStatus};
