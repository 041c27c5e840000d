//! PostgreSQL repository implementations of the store traits.

pub mod admin;
pub mod audit;
pub mod job;
pub mod lawyer;
pub mod request;

pub use admin::AdminRepository;
pub use audit::AuditLogRepository;
pub use job::JobRepository;
pub use lawyer::LawyerRepository;
pub use request::RequestRepository;

use jurist_core::error::{AppError, ErrorKind};

/// Wrap a sqlx error as a database error with context.
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}

/// Map a unique-constraint violation to `Conflict` using a constraint
/// name to message table; anything else becomes a database error.
pub(crate) fn conflict_or_db_error(
    context: &'static str,
    constraints: &'static [(&'static str, &'static str)],
) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        let conflict = e
            .as_database_error()
            .filter(|db| db.is_unique_violation())
            .and_then(|db| db.constraint())
            .and_then(|name| constraints.iter().find(|(c, _)| *c == name))
            .map(|(_, message)| *message);

        match conflict {
            Some(message) => AppError::conflict(message),
            None => AppError::with_source(ErrorKind::Database, context, e),
        }
    }
}

/// Escape `%`, `_` and `\` for use inside an `ILIKE` pattern.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
