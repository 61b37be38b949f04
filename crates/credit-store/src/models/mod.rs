//! Persisted models
//!
//! These are the on-disk shapes. Optional fields are skipped when absent so a
//! record that never learned a handle does not carry `"handle": null`.

mod appreciation;
mod user;

pub use appreciation::{AppreciationRow, WindowDocument};
pub use user::{LedgerDocument, UserRow};

/// Current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

fn current_version() -> u32 {
    FORMAT_VERSION
}
