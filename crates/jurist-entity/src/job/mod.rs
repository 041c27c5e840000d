//! Background job domain entities.

pub mod model;
pub mod payload;
pub mod status;

pub use model::{CreateJob, Job};
pub use payload::{NOTIFICATION_JOB_TYPE, NOTIFICATIONS_QUEUE, NotificationPayload};
pub use status::JobStatus;
