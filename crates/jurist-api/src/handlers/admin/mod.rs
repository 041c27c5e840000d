//! Administrator handlers.

pub mod audit;
pub mod lawyers;
pub mod requests;
pub mod stats;
