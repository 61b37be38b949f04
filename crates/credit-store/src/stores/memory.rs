//! In-memory stores
//!
//! Same semantics as the file stores without touching disk. Used by service
//! tests and by anything that does not need to survive a restart.

use async_trait::async_trait;
use parking_lot::Mutex;

use credit_core::{
    AppreciationEvent, AppreciationWindow, LedgerStore, LedgerTable, RepoResult, UserId,
    UserKeys, UserRecord, UserRef, WindowDecision, WindowLog,
};

/// Ledger held in memory
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    table: Mutex<LedgerTable>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records
    pub fn with_records(records: Vec<UserRecord>) -> Self {
        Self {
            table: Mutex::new(LedgerTable::new(records)),
        }
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn find(&self, reference: &UserRef) -> RepoResult<Option<UserRecord>> {
        Ok(self.table.lock().find(reference).cloned())
    }

    async fn get_rating(&self, reference: &UserRef) -> RepoResult<i64> {
        Ok(self.table.lock().rating(reference))
    }

    async fn upsert(&self, record: &UserRecord) -> RepoResult<UserRecord> {
        self.table.lock().upsert(record).map(|(stored, _)| stored)
    }

    async fn adjust_rating(&self, record: &UserRecord, delta: i64) -> RepoResult<UserRecord> {
        self.table.lock().adjust(record, delta)
    }

    async fn scan(&self) -> RepoResult<Vec<UserRecord>> {
        Ok(self.table.lock().records().to_vec())
    }
}

/// Appreciation window held in memory
#[derive(Debug)]
pub struct MemoryAppreciationWindow {
    log: Mutex<WindowLog>,
}

impl MemoryAppreciationWindow {
    pub fn new(window_secs: i64) -> Self {
        Self {
            log: Mutex::new(WindowLog::new(Vec::new(), window_secs)),
        }
    }
}

impl Default for MemoryAppreciationWindow {
    fn default() -> Self {
        Self {
            log: Mutex::new(WindowLog::default()),
        }
    }
}

#[async_trait]
impl AppreciationWindow for MemoryAppreciationWindow {
    async fn try_register(
        &self,
        reactor_id: UserId,
        target: &UserKeys,
        now: i64,
    ) -> RepoResult<WindowDecision> {
        Ok(self.log.lock().try_register(reactor_id, target, now))
    }

    async fn revoke(&self, event: &AppreciationEvent) -> RepoResult<()> {
        self.log.lock().revoke(event);
        Ok(())
    }

    async fn events(&self) -> RepoResult<Vec<AppreciationEvent>> {
        Ok(self.log.lock().events().to_vec())
    }
}
