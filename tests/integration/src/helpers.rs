//! Test helpers for integration tests
//!
//! Provides a recording transport, bot states over memory or file storage,
//! and a health server bound to an ephemeral port.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Client;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use credit_bot::handlers::{HandlerResult, UpdateDispatcher};
use credit_bot::health::{self, HealthState};
use credit_bot::telegram::{OutboundMessage, Transport, TransportError, TransportResult, Update};
use credit_bot::{create_bot_state, BotIdentity, BotState};
use credit_common::AppConfig;
use credit_core::{ManualClock, RewardSource, UserId};
use credit_service::{Policy, ServiceContextBuilder};
use credit_store::{MemoryAppreciationWindow, MemoryLedgerStore};

/// The bot's own account in every test
pub const BOT_ID: i64 = 999;
pub const BOT_USERNAME: &str = "credit_bot";
/// Configured administrator
pub const ADMIN_ID: i64 = 7;
/// Clock start for in-memory bots
pub const START: i64 = 1_000;

pub fn bot_identity() -> BotIdentity {
    BotIdentity {
        user_id: UserId::new(BOT_ID),
        username: Some(BOT_USERNAME.to_string()),
    }
}

/// Transport that keeps everything it is asked to send
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<OutboundMessage>>,
    fail: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose every send fails
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Drain the recorded messages
    pub fn take(&self) -> Vec<OutboundMessage> {
        std::mem::take(&mut *self.sent.lock())
    }

    /// Drain and return only the texts (captions for animations)
    pub fn take_texts(&self) -> Vec<String> {
        self.take()
            .iter()
            .map(|message| message.text().to_string())
            .collect()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, message: OutboundMessage) -> TransportResult<()> {
        if self.fail {
            return Err(TransportError::Unavailable("recording transport".to_string()));
        }
        self.sent.lock().push(message);
        Ok(())
    }
}

/// A bot state plus the handles a test needs to inspect it
pub struct TestBot {
    pub state: BotState,
    pub transport: Arc<RecordingTransport>,
    /// Only driven for in-memory bots
    pub clock: Arc<ManualClock>,
}

impl TestBot {
    /// In-memory ledger and window, manual clock at [`START`], 60 s window
    pub fn in_memory() -> Self {
        Self::in_memory_with(None)
    }

    /// Like [`in_memory`](Self::in_memory) with a reward source
    pub fn in_memory_with(rewards: Option<Arc<dyn RewardSource>>) -> Self {
        let transport = Arc::new(RecordingTransport::new());
        let clock = Arc::new(ManualClock::new(START));

        let mut builder = ServiceContextBuilder::new()
            .ledger(Arc::new(MemoryLedgerStore::new()))
            .window(Arc::new(MemoryAppreciationWindow::new(60)))
            .clock(clock.clone())
            .policy(Policy {
                protected_id: Some(UserId::new(BOT_ID)),
                protected_handle: Some(BOT_USERNAME.to_string()),
                admin_id: Some(UserId::new(ADMIN_ID)),
                ..Policy::default()
            });
        if let Some(rewards) = rewards {
            builder = builder.rewards(rewards);
        }
        let ctx = builder.build().expect("test context builds");

        Self {
            state: BotState::new(ctx, transport.clone(), bot_identity()),
            transport,
            clock,
        }
    }

    /// File-backed bot built the way the binary builds it
    pub fn from_config(config: &AppConfig) -> Self {
        let transport = Arc::new(RecordingTransport::new());
        let state = create_bot_state(config, transport.clone(), bot_identity())
            .expect("bot state builds");
        Self {
            state,
            transport,
            clock: Arc::new(ManualClock::new(START)),
        }
    }

    pub async fn dispatch(&self, update: Update) -> HandlerResult<()> {
        UpdateDispatcher::dispatch(&self.state, update).await
    }

    /// Dispatch and return the texts sent in response
    pub async fn exchange(&self, update: Update) -> Vec<String> {
        self.dispatch(update).await.expect("update handled");
        self.transport.take_texts()
    }
}

/// Configuration rooted at `data_dir`, with admin and a reward directory
pub fn test_config(data_dir: &Path, extra: &[(&str, &str)]) -> AppConfig {
    let data_dir = data_dir.display().to_string();
    let asset_dir = format!("{data_dir}/gifs");
    let mut vars: Vec<(String, String)> = vec![
        ("BOT_TOKEN".to_string(), "123:test".to_string()),
        ("DATA_DIR".to_string(), data_dir),
        ("ADMIN_USER_ID".to_string(), ADMIN_ID.to_string()),
        ("REWARD_ASSET_DIR".to_string(), asset_dir),
    ];
    for (key, value) in extra {
        vars.push(((*key).to_string(), (*value).to_string()));
    }

    AppConfig::from_source(|key| {
        vars.iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .expect("test config is valid")
}

/// Health endpoint on an ephemeral port
pub struct TestHealthServer {
    pub addr: SocketAddr,
    pub client: Client,
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl TestHealthServer {
    pub async fn start(data_dir: &Path) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (shutdown, shutdown_rx) = watch::channel(false);

        let state = HealthState::new("social-credit-bot", data_dir.to_path_buf());
        let handle = tokio::spawn(async move {
            health::serve_on(listener, state, shutdown_rx).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            addr,
            client,
            shutdown,
            handle,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Signal shutdown and wait for the server task
    pub async fn stop(self) -> Result<()> {
        self.shutdown.send(true)?;
        tokio::time::timeout(Duration::from_secs(5), self.handle).await??;
        Ok(())
    }
}
