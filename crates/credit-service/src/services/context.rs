//! Service context - dependency container for services
//!
//! Holds the storage ports, the reward source, the clock, and the policy
//! values (protected identity, administrator, milestone modulus).

use std::sync::Arc;

use credit_core::{
    AppreciationWindow, Clock, LedgerStore, NoRewards, RewardSource, SystemClock, UserId,
    DEFAULT_MILESTONE_EVERY,
};

use super::error::{ServiceError, ServiceResult};

/// Policy knobs that come from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    /// The bot's own identity; rating it only earns a joke
    pub protected_id: Option<UserId>,
    /// Username of the protected identity, for targets known only by mention
    pub protected_handle: Option<String>,
    /// The only user allowed to run admin commands
    pub admin_id: Option<UserId>,
    /// Ratings that are a multiple of this trigger a reward
    pub milestone_every: i64,
    /// Records per `/dump` message
    pub dump_page_size: usize,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            protected_id: None,
            protected_handle: None,
            admin_id: None,
            milestone_every: DEFAULT_MILESTONE_EVERY,
            dump_page_size: 30,
        }
    }
}

/// Service context containing all dependencies
///
/// Cheap to clone; every dependency sits behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    ledger: Arc<dyn LedgerStore>,
    window: Arc<dyn AppreciationWindow>,
    rewards: Arc<dyn RewardSource>,
    clock: Arc<dyn Clock>,
    policy: Policy,
}

impl ServiceContext {
    pub fn new(
        ledger: Arc<dyn LedgerStore>,
        window: Arc<dyn AppreciationWindow>,
        rewards: Arc<dyn RewardSource>,
        clock: Arc<dyn Clock>,
        policy: Policy,
    ) -> Self {
        Self {
            ledger,
            window,
            rewards,
            clock,
            policy,
        }
    }

    // === Storage ===

    pub fn ledger(&self) -> &dyn LedgerStore {
        self.ledger.as_ref()
    }

    pub fn window(&self) -> &dyn AppreciationWindow {
        self.window.as_ref()
    }

    // === Collaborators ===

    pub fn rewards(&self) -> &dyn RewardSource {
        self.rewards.as_ref()
    }

    /// Current time in unix seconds
    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    // === Policy ===

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Fill in the protected identity once the transport has learned it
    pub fn with_protected_id(mut self, id: UserId) -> Self {
        self.policy.protected_id = Some(id);
        self
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("stores", &"...")
            .field("policy", &self.policy)
            .finish()
    }
}

/// Builder for creating ServiceContext
///
/// The ledger and window are required. Rewards default to [`NoRewards`] and the
/// clock to [`SystemClock`].
#[derive(Default)]
pub struct ServiceContextBuilder {
    ledger: Option<Arc<dyn LedgerStore>>,
    window: Option<Arc<dyn AppreciationWindow>>,
    rewards: Option<Arc<dyn RewardSource>>,
    clock: Option<Arc<dyn Clock>>,
    policy: Policy,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(mut self, ledger: Arc<dyn LedgerStore>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    pub fn window(mut self, window: Arc<dyn AppreciationWindow>) -> Self {
        self.window = Some(window);
        self
    }

    pub fn rewards(mut self, rewards: Arc<dyn RewardSource>) -> Self {
        self.rewards = Some(rewards);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a required dependency is missing or
    /// the milestone modulus is not positive
    pub fn build(self) -> ServiceResult<ServiceContext> {
        if self.policy.milestone_every <= 0 {
            return Err(ServiceError::validation("milestone_every must be positive"));
        }
        if self.policy.dump_page_size == 0 {
            return Err(ServiceError::validation("dump_page_size must be positive"));
        }

        Ok(ServiceContext::new(
            self.ledger
                .ok_or_else(|| ServiceError::validation("ledger is required"))?,
            self.window
                .ok_or_else(|| ServiceError::validation("window is required"))?,
            self.rewards.unwrap_or_else(|| Arc::new(NoRewards)),
            self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            self.policy,
        ))
    }
}
