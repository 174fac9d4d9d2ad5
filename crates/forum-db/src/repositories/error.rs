//! Error handling utilities for repositories

use forum_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
///
/// Connection-level failures (pool exhausted, socket errors) are reported as
/// store unavailability so callers can retry; everything else is a database error.
pub fn map_db_error(e: SqlxError) -> DomainError {
    match e {
        SqlxError::PoolTimedOut | SqlxError::PoolClosed | SqlxError::Io(_) => {
            DomainError::StoreUnavailable(e.to_string())
        }
        other => DomainError::DatabaseError(other.to_string()),
    }
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

/// Convert a stored row that fails domain validation
pub fn corrupt_row(what: &str, detail: impl std::fmt::Display) -> DomainError {
    DomainError::DatabaseError(format!("corrupt {what} row: {detail}"))
}
