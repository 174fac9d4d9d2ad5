//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{SubjectId, SubjectKind, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("{kind} not found: {id}")]
    SubjectNotFound { kind: SubjectKind, id: SubjectId },

    #[error("Session not found")]
    SessionNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Referenced user does not exist: {0}")]
    InvalidUser(UserId),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Invariant violated: {0}")]
    Conflict(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::SubjectNotFound { .. } => "UNKNOWN_SUBJECT",
            Self::SessionNotFound => "UNKNOWN_SESSION",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidUser(_) => "INVALID_USER",

            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::Conflict(_) => "CONFLICT",

            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::SubjectNotFound { .. } | Self::SessionNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidUser(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::Conflict(_))
    }

    /// Transient store failure the caller may retry
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}
