//! Typed path parameter helpers.

use std::str::FromStr;

use jurist_core::error::AppError;

/// Parses an ID from a path segment, naming `what` in the error.
pub fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError::validation(format!("Invalid {what} ID: {raw}")))
}
