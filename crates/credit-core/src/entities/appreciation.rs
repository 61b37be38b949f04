//! Appreciation event - one entry of the pairwise rate-limit window

use crate::value_objects::{UserId, UserKey, UserKeys};

/// A reaction that was accepted at `timestamp` (unix seconds)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppreciationEvent {
    pub timestamp: i64,
    pub reactor_id: UserId,
    pub target: UserKey,
}

impl AppreciationEvent {
    /// Create a new AppreciationEvent
    pub fn new(timestamp: i64, reactor_id: UserId, target: UserKey) -> Self {
        Self {
            timestamp,
            reactor_id,
            target,
        }
    }

    /// Older than the window at `now`
    #[inline]
    pub fn is_expired(&self, now: i64, window_secs: i64) -> bool {
        now - self.timestamp > window_secs
    }

    /// Same directed pair, with the target matched by any of its keys.
    /// Reversed pairs never match.
    #[inline]
    pub fn is_pair(&self, reactor_id: UserId, target: &UserKeys) -> bool {
        self.reactor_id == reactor_id && target.contains(&self.target)
    }
}
