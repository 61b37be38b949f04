//! Domain errors - error types for the domain layer
//!
//! Policy outcomes (throttled, self-rating, unknown command) are not errors and
//! never appear here.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Record has neither a user id nor a handle")]
    MissingIdentity,

    #[error("Invalid rating: {0}")]
    InvalidRating(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Ledger store error: {0}")]
    StoreIo(String),

    #[error("Appreciation window error: {0}")]
    WindowIo(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for logs and diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingIdentity => "MISSING_IDENTITY",
            Self::InvalidRating(_) => "INVALID_RATING",
            Self::StoreIo(_) => "STORE_IO_ERROR",
            Self::WindowIo(_) => "WINDOW_IO_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingIdentity | Self::InvalidRating(_))
    }

    /// Check if this came from persisted state (reading or writing)
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Self::StoreIo(_) | Self::WindowIo(_) | Self::Serialization(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::MissingIdentity.code(), "MISSING_IDENTITY");
        assert_eq!(DomainError::StoreIo("disk".to_string()).code(), "STORE_IO_ERROR");
        assert_eq!(DomainError::WindowIo("disk".to_string()).code(), "WINDOW_IO_ERROR");
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::MissingIdentity.is_validation());
        assert!(DomainError::Serialization("bad json".to_string()).is_io());
        assert!(!DomainError::MissingIdentity.is_io());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::InvalidRating("abc".to_string());
        assert_eq!(err.to_string(), "Invalid rating: abc");
    }
}
