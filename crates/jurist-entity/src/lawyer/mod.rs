//! Lawyer profile entities.

pub mod model;
pub mod national_id;
pub mod status;

pub use model::{LawyerProfile, LawyerProfileUpdate, NewLawyerProfile};
pub use national_id::is_valid_national_id;
pub use status::{DocumentKind, LawyerCategory, LawyerStatus};
