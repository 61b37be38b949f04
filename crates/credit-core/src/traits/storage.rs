//! Storage traits for the ledger and the appreciation window
//!
//! Implementations own their persisted state exclusively and must serialize every
//! read-modify-write cycle: two concurrent calls may never both read the same
//! state and then each write their own version of it.

use async_trait::async_trait;

use crate::entities::{AppreciationEvent, UserRecord};
use crate::error::DomainError;
use crate::ledger::WindowDecision;
use crate::value_objects::{UserId, UserKeys, UserRef};

/// Result type for storage operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Ledger Store
// ============================================================================

#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Resolve a reference by id, then handle, then first name
    async fn find(&self, reference: &UserRef) -> RepoResult<Option<UserRecord>>;

    /// Rating for a reference; 0 when the user or its rating is unknown
    async fn get_rating(&self, reference: &UserRef) -> RepoResult<i64>;

    /// Merge a record into its row (by id, then handle) or append it
    async fn upsert(&self, record: &UserRecord) -> RepoResult<UserRecord>;

    /// Add `delta` to the record's rating and merge its display fields, atomically
    async fn adjust_rating(&self, record: &UserRecord, delta: i64) -> RepoResult<UserRecord>;

    /// Every record in insertion order
    async fn scan(&self) -> RepoResult<Vec<UserRecord>>;
}

// ============================================================================
// Appreciation Window
// ============================================================================

#[async_trait]
pub trait AppreciationWindow: Send + Sync {
    /// Sweep expired events, then register the pair unless it is still in the
    /// window. An event recorded under any of the target's keys throttles.
    async fn try_register(
        &self,
        reactor_id: UserId,
        target: &UserKeys,
        now: i64,
    ) -> RepoResult<WindowDecision>;

    /// Undo an accepted registration
    async fn revoke(&self, event: &AppreciationEvent) -> RepoResult<()>;

    /// Persisted events as they are right now (no sweep)
    async fn events(&self) -> RepoResult<Vec<AppreciationEvent>>;
}
