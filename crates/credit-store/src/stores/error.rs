//! Error handling utilities for stores

use credit_core::DomainError;

use crate::document::DocumentError;

/// Convert a ledger document error to DomainError
pub fn map_store_error(e: DocumentError) -> DomainError {
    match e {
        DocumentError::Encode { .. } => DomainError::Serialization(e.to_string()),
        DocumentError::Io { .. } => DomainError::StoreIo(e.to_string()),
    }
}

/// Convert a window document error to DomainError
pub fn map_window_error(e: DocumentError) -> DomainError {
    match e {
        DocumentError::Encode { .. } => DomainError::Serialization(e.to_string()),
        DocumentError::Io { .. } => DomainError::WindowIo(e.to_string()),
    }
}
