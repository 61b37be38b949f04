//! Store implementations

mod error;
mod file;
mod memory;

pub use file::{FileAppreciationWindow, FileLedgerStore};
pub use memory::{MemoryAppreciationWindow, MemoryLedgerStore};
