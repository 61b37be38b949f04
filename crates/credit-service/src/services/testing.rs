//! Shared fixtures for service tests

use std::sync::Arc;

use async_trait::async_trait;

use credit_core::{
    DomainError, LedgerStore, ManualClock, RepoResult, RewardAsset, RewardSource, UserId,
    UserRecord, UserRef,
};
use credit_store::{MemoryAppreciationWindow, MemoryLedgerStore};

use super::context::{Policy, ServiceContext, ServiceContextBuilder};

pub const BOT: UserId = UserId::new(999);
pub const ADMIN: UserId = UserId::new(7);

/// Context over memory stores with handles kept for assertions
pub struct TestContext {
    pub ctx: ServiceContext,
    pub ledger: Arc<dyn LedgerStore>,
    pub window: Arc<MemoryAppreciationWindow>,
    pub clock: Arc<ManualClock>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::build(Arc::new(MemoryLedgerStore::new()), Arc::new(StaticReward))
    }

    pub fn with_records(records: Vec<UserRecord>) -> Self {
        Self::build(
            Arc::new(MemoryLedgerStore::with_records(records)),
            Arc::new(StaticReward),
        )
    }

    pub fn with_store(store: Arc<dyn LedgerStore>) -> Self {
        Self::build(store, Arc::new(StaticReward))
    }

    pub fn with_rewards(rewards: Arc<dyn RewardSource>) -> Self {
        Self::build(Arc::new(MemoryLedgerStore::new()), rewards)
    }

    fn build(ledger: Arc<dyn LedgerStore>, rewards: Arc<dyn RewardSource>) -> Self {
        let window = Arc::new(MemoryAppreciationWindow::new(60));
        let clock = Arc::new(ManualClock::new(1_000));
        let ctx = ServiceContextBuilder::new()
            .ledger(ledger.clone())
            .window(window.clone())
            .rewards(rewards)
            .clock(clock.clone())
            .policy(Policy {
                protected_id: Some(BOT),
                protected_handle: Some("credit_bot".to_string()),
                admin_id: Some(ADMIN),
                ..Policy::default()
            })
            .build()
            .unwrap();
        Self {
            ctx,
            ledger,
            window,
            clock,
        }
    }
}

pub fn user(id: i64, handle: &str, first_name: &str) -> UserRef {
    UserRef::by_id(UserId::new(id))
        .with_handle(Some(handle.to_string()))
        .with_names(Some(first_name.to_string()), None)
}

/// Always hands out the same attachment
pub struct StaticReward;

#[async_trait]
impl RewardSource for StaticReward {
    async fn pick_reward_asset(&self) -> RepoResult<Option<RewardAsset>> {
        Ok(Some(RewardAsset {
            file_name: "party.gif".to_string(),
            bytes: b"GIF89a".to_vec(),
        }))
    }
}

/// Reward source whose directory went missing
pub struct BrokenRewards;

#[async_trait]
impl RewardSource for BrokenRewards {
    async fn pick_reward_asset(&self) -> RepoResult<Option<RewardAsset>> {
        Err(DomainError::InternalError("asset dir unreadable".to_string()))
    }
}

/// Ledger that reads fine and fails every write
#[derive(Default)]
pub struct ReadOnlyLedger {
    inner: MemoryLedgerStore,
}

#[async_trait]
impl LedgerStore for ReadOnlyLedger {
    async fn find(&self, reference: &UserRef) -> RepoResult<Option<UserRecord>> {
        self.inner.find(reference).await
    }

    async fn get_rating(&self, reference: &UserRef) -> RepoResult<i64> {
        self.inner.get_rating(reference).await
    }

    async fn upsert(&self, _record: &UserRecord) -> RepoResult<UserRecord> {
        Err(DomainError::StoreIo("read-only file system".to_string()))
    }

    async fn adjust_rating(&self, _record: &UserRecord, _delta: i64) -> RepoResult<UserRecord> {
        Err(DomainError::StoreIo("read-only file system".to_string()))
    }

    async fn scan(&self) -> RepoResult<Vec<UserRecord>> {
        self.inner.scan().await
    }
}
