//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error taxonomy.
///
/// Core modules define their own error enums; adapters collapse them into
/// this taxonomy at the boundary. Validation errors are rejected
/// synchronously and never retried; conflicts may be retried after the
/// caller re-reads current state; integrity violations are never partially
/// applied.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad input (missing account, cross-org reference, negative amount).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Stale state detected (e.g., concurrent approval advanced first).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Structural invariant would be broken (e.g., cycle in the chart).
    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::IntegrityViolation(_) => 422,
            Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::IntegrityViolation(_) => "INTEGRITY_VIOLATION",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the caller may retry after re-reading current state.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}
