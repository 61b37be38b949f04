//! Handler error types

use credit_core::DomainError;
use credit_service::ServiceError;
use thiserror::Error;

use crate::render;
use crate::telegram::TransportError;

/// Handler error type
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Command arguments could not be parsed; carries the usage line
    #[error("Invalid arguments: {0}")]
    InvalidArguments(&'static str),

    /// Service error
    #[error("Service error: {0}")]
    ServiceError(#[from] ServiceError),

    /// Domain error (from stores)
    #[error("Domain error: {0}")]
    DomainError(#[from] DomainError),

    /// Reply could not be delivered
    #[error("Transport error: {0}")]
    TransportError(#[from] TransportError),
}

impl HandlerError {
    /// Text to show the user. Faults all map to the same apology.
    pub fn reply_text(&self) -> String {
        match self {
            Self::InvalidArguments(usage) => (*usage).to_string(),
            Self::ServiceError(ServiceError::PermissionDenied { .. }) => {
                render::ADMIN_ONLY.to_string()
            }
            Self::ServiceError(e) if e.is_user_error() => e.to_string(),
            _ => render::APOLOGY.to_string(),
        }
    }

    /// True when the bot itself failed (and the error should be logged as one)
    pub fn is_fault(&self) -> bool {
        match self {
            Self::InvalidArguments(_) => false,
            Self::ServiceError(e) => !e.is_user_error(),
            Self::DomainError(e) => !e.is_validation(),
            Self::TransportError(_) => true,
        }
    }

    /// Get an error code for logs
    pub fn error_code(&self) -> &str {
        match self {
            Self::InvalidArguments(_) => "INVALID_ARGUMENTS",
            Self::ServiceError(e) => e.error_code(),
            Self::DomainError(e) => e.code(),
            Self::TransportError(_) => "TRANSPORT_ERROR",
        }
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
