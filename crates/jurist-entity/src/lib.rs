//! # jurist-entity
//!
//! Domain entity models for the Jurist marketplace. Every struct in this
//! crate represents a database table row or a domain value object. All
//! entities derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and
//! database entities additionally derive `sqlx::FromRow`.

pub mod admin;
pub mod audit;
pub mod job;
pub mod lawyer;
pub mod phone;
pub mod request;
