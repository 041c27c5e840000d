//! Convenience result type alias for Jurist.

use crate::error::AppError;

/// A specialized `Result` type for Jurist operations.
pub type AppResult<T> = Result<T, AppError>;
