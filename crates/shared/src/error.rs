//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Validation and consistency failures are returned to the immediate
/// caller and never auto-corrected; callers must resubmit corrected
/// input. There is no generic retry path.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input rejected before any persistence (e.g. an import-category
    /// cash movement missing its container link).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A financial invariant would be violated (unbalanced entry,
    /// negative stock, reservation exceeding availability).
    #[error("Consistency error: {0}")]
    Consistency(String),

    /// Referenced entity missing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Concurrent writers collided (double release, cash movement
    /// claimed twice).
    #[error("Concurrency conflict: {0}")]
    ConcurrencyConflict(String),

    /// The acting user is not allowed to perform the operation.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code for API responses and logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Consistency(_) => "CONSISTENCY_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::ConcurrencyConflict(_) => "CONCURRENCY_CONFLICT",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if resubmitting the same input can never succeed.
    ///
    /// Conflict errors may succeed on retry with fresh state; the rest
    /// require corrected input or operator action.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::ConcurrencyConflict(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::Consistency(String::new()).error_code(),
            "CONSISTENCY_ERROR"
        );
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(
            AppError::ConcurrencyConflict(String::new()).error_code(),
            "CONCURRENCY_CONFLICT"
        );
        assert_eq!(AppError::Forbidden(String::new()).error_code(), "FORBIDDEN");
        assert_eq!(
            AppError::Database(String::new()).error_code(),
            "DATABASE_ERROR"
        );
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(
            AppError::Consistency("msg".into()).to_string(),
            "Consistency error: msg"
        );
        assert_eq!(
            AppError::ConcurrencyConflict("msg".into()).to_string(),
            "Concurrency conflict: msg"
        );
    }

    #[test]
    fn test_only_conflicts_are_retryable() {
        assert!(AppError::Validation(String::new()).is_terminal());
        assert!(AppError::Consistency(String::new()).is_terminal());
        assert!(!AppError::ConcurrencyConflict(String::new()).is_terminal());
    }
}
