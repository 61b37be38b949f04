//! File-backed stores
//!
//! Each store owns one JSON document. A tokio mutex is held across the whole
//! load, mutate, save cycle, so every operation sees the previous one's write.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{instrument, warn};

use credit_core::{
    AppreciationEvent, AppreciationWindow, LedgerStore, LedgerTable, RepoResult, UserId,
    UserKeys, UserRecord, UserRef, WindowDecision, WindowLog,
};

use crate::document::JsonDocument;
use crate::models::{AppreciationRow, LedgerDocument, WindowDocument};

use super::error::{map_store_error, map_window_error};

// ============================================================================
// Ledger
// ============================================================================

/// Ledger persisted to a single JSON file
pub struct FileLedgerStore {
    document: JsonDocument<LedgerDocument>,
    lock: Mutex<()>,
}

impl FileLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            document: JsonDocument::new(path),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> RepoResult<LedgerTable> {
        let document = self.document.load().await.map_err(map_store_error)?;
        Ok(LedgerTable::from(document))
    }

    async fn save(&self, table: &LedgerTable) -> RepoResult<()> {
        self.document
            .save(&LedgerDocument::from(table))
            .await
            .map_err(map_store_error)
    }
}

#[async_trait]
impl LedgerStore for FileLedgerStore {
    #[instrument(skip(self))]
    async fn find(&self, reference: &UserRef) -> RepoResult<Option<UserRecord>> {
        let _guard = self.lock.lock().await;
        let table = self.load().await?;
        Ok(table.find(reference).cloned())
    }

    #[instrument(skip(self))]
    async fn get_rating(&self, reference: &UserRef) -> RepoResult<i64> {
        let _guard = self.lock.lock().await;
        let table = self.load().await?;
        Ok(table.rating(reference))
    }

    #[instrument(skip(self))]
    async fn upsert(&self, record: &UserRecord) -> RepoResult<UserRecord> {
        let _guard = self.lock.lock().await;
        let mut table = self.load().await?;
        let (stored, changed) = table.upsert(record)?;
        if changed {
            self.save(&table).await?;
        }
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn adjust_rating(&self, record: &UserRecord, delta: i64) -> RepoResult<UserRecord> {
        let _guard = self.lock.lock().await;
        let mut table = self.load().await?;
        let stored = table.adjust(record, delta)?;
        self.save(&table).await?;
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn scan(&self) -> RepoResult<Vec<UserRecord>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.into_records())
    }
}

// ============================================================================
// Appreciation Window
// ============================================================================

/// Appreciation window persisted to a single JSON file
///
/// The window is advisory state: an unreadable file is logged and treated as
/// empty instead of failing the reaction.
pub struct FileAppreciationWindow {
    document: JsonDocument<WindowDocument>,
    window_secs: i64,
    lock: Mutex<()>,
}

impl FileAppreciationWindow {
    pub fn new(path: impl Into<PathBuf>, window_secs: i64) -> Self {
        Self {
            document: JsonDocument::new(path),
            window_secs,
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> WindowLog {
        match self.document.load().await {
            Ok(document) => WindowLog::new(
                document.events.into_iter().map(AppreciationEvent::from).collect(),
                self.window_secs,
            ),
            Err(e) => {
                warn!(
                    path = %self.document.path().display(),
                    error = %e,
                    "Appreciation window unreadable, continuing with an empty window"
                );
                WindowLog::new(Vec::new(), self.window_secs)
            }
        }
    }

    async fn save(&self, log: &WindowLog) -> RepoResult<()> {
        let document = WindowDocument {
            events: log.events().iter().map(AppreciationRow::from).collect(),
            ..WindowDocument::default()
        };
        self.document.save(&document).await.map_err(map_window_error)
    }
}

#[async_trait]
impl AppreciationWindow for FileAppreciationWindow {
    #[instrument(skip(self))]
    async fn try_register(
        &self,
        reactor_id: UserId,
        target: &UserKeys,
        now: i64,
    ) -> RepoResult<WindowDecision> {
        let _guard = self.lock.lock().await;
        let mut log = self.load().await;
        let before = log.events().len();
        let decision = log.try_register(reactor_id, target, now);

        // A throttled attempt still persists if the sweep removed anything
        if decision.is_accepted() || log.events().len() != before {
            self.save(&log).await?;
        }
        Ok(decision)
    }

    #[instrument(skip(self))]
    async fn revoke(&self, event: &AppreciationEvent) -> RepoResult<()> {
        let _guard = self.lock.lock().await;
        let mut log = self.load().await;
        if log.revoke(event) {
            self.save(&log).await?;
        }
        Ok(())
    }

    async fn events(&self) -> RepoResult<Vec<AppreciationEvent>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await.into_events())
    }
}
