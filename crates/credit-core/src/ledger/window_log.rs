//! Appreciation window - sliding, pairwise, directional rate limit

use crate::entities::AppreciationEvent;
use crate::value_objects::{UserId, UserKeys};

/// Default window length in seconds
pub const DEFAULT_WINDOW_SECS: i64 = 60;

/// Result of asking the window to register a reaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowDecision {
    /// Registered; the event is now part of the window
    Accepted(AppreciationEvent),
    /// The same pair already reacted at `since`
    Throttled { since: i64 },
}

impl WindowDecision {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Live window events plus the window length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowLog {
    events: Vec<AppreciationEvent>,
    window_secs: i64,
}

impl WindowLog {
    pub fn new(events: Vec<AppreciationEvent>, window_secs: i64) -> Self {
        Self {
            events,
            window_secs,
        }
    }

    pub fn events(&self) -> &[AppreciationEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<AppreciationEvent> {
        self.events
    }

    pub fn window_secs(&self) -> i64 {
        self.window_secs
    }

    /// Drop events older than the window. Returns how many were removed.
    pub fn prune(&mut self, now: i64) -> usize {
        let before = self.events.len();
        let window = self.window_secs;
        self.events.retain(|e| !e.is_expired(now, window));
        before - self.events.len()
    }

    /// Sweep, then accept the pair unless it already reacted inside the window.
    /// A throttled attempt leaves the original timestamp untouched. Accepted events
    /// are recorded under the target's primary key.
    pub fn try_register(&mut self, reactor_id: UserId, target: &UserKeys, now: i64) -> WindowDecision {
        self.prune(now);

        if let Some(existing) = self.events.iter().find(|e| e.is_pair(reactor_id, target)) {
            return WindowDecision::Throttled {
                since: existing.timestamp,
            };
        }

        let event = AppreciationEvent::new(now, reactor_id, target.primary().clone());
        self.events.push(event.clone());
        WindowDecision::Accepted(event)
    }

    /// Remove one previously accepted event. Returns false if it was not present.
    pub fn revoke(&mut self, event: &AppreciationEvent) -> bool {
        match self.events.iter().position(|e| e == event) {
            Some(pos) => {
                self.events.remove(pos);
                true
            }
            None => false,
        }
    }
}

impl Default for WindowLog {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_WINDOW_SECS)
    }
}
