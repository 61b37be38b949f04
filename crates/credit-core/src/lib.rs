//! # credit-core
//!
//! Domain layer for the social credit ledger: user records, appreciation events,
//! the closed set of rating commands, the pure ledger/window rules, and the storage
//! traits (ports) that infrastructure crates implement.
//! This crate has zero dependencies on infrastructure (files, network, etc.).

pub mod entities;
pub mod error;
pub mod ledger;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{AppreciationEvent, UserRecord};
pub use error::DomainError;
pub use ledger::{LedgerTable, WindowDecision, WindowLog, DEFAULT_WINDOW_SECS};
pub use traits::{
    AppreciationWindow, Clock, LedgerStore, ManualClock, NoRewards, RepoResult, RewardAsset,
    RewardSource, SystemClock,
};
pub use value_objects::{
    is_milestone, same_handle, Lookup, RatingCommand, UserId, UserIdParseError, UserKey, UserKeys,
    UserRef, DEFAULT_MILESTONE_EVERY,
};
