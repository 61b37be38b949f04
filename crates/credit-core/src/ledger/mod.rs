//! Ledger rules - pure, in-memory state transitions shared by every store backend
//!
//! Backends load a table, apply one of these operations under their own lock,
//! and persist the result. Keeping the rules here means the memory and file
//! implementations cannot drift apart.

mod ledger_table;
mod window_log;

pub use ledger_table::LedgerTable;
pub use window_log::{WindowDecision, WindowLog, DEFAULT_WINDOW_SECS};
