//! Route handlers organized by caller.

pub mod admin;
pub mod auth;
pub mod health;
pub mod lawyer;
pub mod requests;
mod upload;
