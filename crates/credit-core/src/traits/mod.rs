//! Ports - the interfaces the domain needs from the outside world
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

mod clock;
mod reward;
mod storage;

pub use crate::ledger::WindowDecision;
pub use clock::{Clock, ManualClock, SystemClock};
pub use reward::{NoRewards, RewardAsset, RewardSource};
pub use storage::{AppreciationWindow, LedgerStore, RepoResult};
