//! # credit-store
//!
//! Storage layer implementing the `credit-core` storage traits.
//!
//! ## Overview
//!
//! - `JsonDocument`: one JSON file, read whole and replaced atomically on write
//! - persisted models with serde derives, plus entity ↔ model mappers
//! - file-backed stores for production and in-memory stores for tests
//!
//! Every store serializes its own read-modify-write cycles, so concurrent
//! reactions can never lose each other's updates.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use credit_store::{FileLedgerStore, FileAppreciationWindow};
//! use credit_core::traits::LedgerStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let ledger = FileLedgerStore::new("./data/ledger.json");
//!     let window = FileAppreciationWindow::new("./data/appreciations.json", 60);
//!
//!     for user in ledger.scan().await? {
//!         println!("{:?}: {}", user.user_id, user.rating());
//!     }
//!     Ok(())
//! }
//! ```

pub mod document;
pub mod mappers;
pub mod models;
pub mod stores;

// Re-export commonly used types
pub use document::{probe_writable, DocumentError, JsonDocument};
pub use stores::{
    FileAppreciationWindow, FileLedgerStore, MemoryAppreciationWindow, MemoryLedgerStore,
};
