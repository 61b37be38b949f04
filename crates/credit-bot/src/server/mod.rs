//! Bot server setup
//!
//! Wires the file stores, the reward directory and the Telegram client into a
//! [`BotState`], then runs the poll loop next to the optional health endpoint.

mod poller;
mod state;

pub use poller::Poller;
pub use state::{BotIdentity, BotState};

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use credit_common::{AppConfig, AppError};
use credit_service::{Policy, ServiceContextBuilder};
use credit_store::{FileAppreciationWindow, FileLedgerStore};

use crate::assets::DirectoryRewardSource;
use crate::health::{self, HealthState};
use crate::telegram::{TelegramClient, Transport};

/// Build the bot state from configuration.
///
/// The protected identity is the configured one, else the bot's own account.
pub fn create_bot_state(
    config: &AppConfig,
    transport: Arc<dyn Transport>,
    identity: BotIdentity,
) -> Result<BotState, AppError> {
    let ledger_path = config.ledger.ledger_path();
    let window_path = config.ledger.window_path();
    info!(
        ledger = %ledger_path.display(),
        window = %window_path.display(),
        "Opening ledger files"
    );

    let protected_id = config
        .telegram
        .protected_user_id
        .unwrap_or(identity.user_id);
    // Mentions only carry a username; that is known for the bot's own account
    let protected_handle = if protected_id == identity.user_id {
        identity.username.clone()
    } else {
        None
    };
    let policy = Policy {
        protected_id: Some(protected_id),
        protected_handle,
        admin_id: config.admin.user_id,
        milestone_every: config.ledger.milestone_every,
        dump_page_size: config.admin.dump_page_size,
    };
    if policy.admin_id.is_none() {
        warn!("ADMIN_USER_ID is not set, admin commands are disabled");
    }

    let service_context = ServiceContextBuilder::new()
        .ledger(Arc::new(FileLedgerStore::new(ledger_path)))
        .window(Arc::new(FileAppreciationWindow::new(
            window_path,
            config.ledger.window_secs,
        )))
        .rewards(Arc::new(DirectoryRewardSource::new(
            config.rewards.asset_dir.clone(),
        )))
        .policy(policy)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(BotState::new(service_context, transport, identity))
}

/// Run the bot until Ctrl-C
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let client = Arc::new(TelegramClient::new(&config.telegram).map_err(AppError::transport)?);

    let me = client.get_me().await.map_err(AppError::transport)?;
    let identity = BotIdentity::from(&me);
    info!(bot_id = %identity.user_id, username = ?identity.username, "Connected to the Bot API");

    let state = create_bot_state(&config, client.clone(), identity)?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let health_task = config.health.as_ref().map(|health_config| {
        let health_state = HealthState::new(&config.app.name, config.ledger.data_dir.clone());
        tokio::spawn(health::serve(
            health_config.address(),
            health_state,
            shutdown_rx,
        ))
    });

    Poller::new(client, state)
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        })
        .await;

    let _ = shutdown_tx.send(true);
    if let Some(task) = health_task {
        match task.await {
            Ok(result) => result?,
            Err(e) => return Err(AppError::internal(e)),
        }
    }

    info!("Bot stopped");
    Ok(())
}
