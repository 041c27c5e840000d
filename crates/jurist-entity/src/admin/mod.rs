//! Administrator entities.

pub mod model;

pub use model::{AdminRole, AdminUser, NewAdminUser};
