//! Long-polling loop
//!
//! Fetches updates in order, acknowledges them through the offset, and handles
//! each one on its own task.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::handlers::UpdateDispatcher;
use crate::telegram::{TelegramClient, Update};

use super::state::BotState;

/// Pause after a failed `getUpdates` call
const POLL_BACKOFF: Duration = Duration::from_secs(3);

pub struct Poller {
    client: Arc<TelegramClient>,
    state: BotState,
    offset: Option<i64>,
    tasks: JoinSet<()>,
}

impl Poller {
    pub fn new(client: Arc<TelegramClient>, state: BotState) -> Self {
        Self {
            client,
            state,
            offset: None,
            tasks: JoinSet::new(),
        }
    }

    /// Poll until `shutdown` resolves, then wait for in-flight handlers
    pub async fn run_until<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!("Polling for updates");

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!("Shutdown requested, stopping the poll loop");
                    break;
                }
                polled = self.client.get_updates(self.offset) => match polled {
                    Ok(updates) => self.spawn_all(updates),
                    Err(e) => {
                        warn!(error = %e, backoff = ?POLL_BACKOFF, "getUpdates failed");
                        tokio::time::sleep(POLL_BACKOFF).await;
                    }
                },
            }

            while let Some(joined) = self.tasks.try_join_next() {
                log_join(joined);
            }
        }

        let pending = self.tasks.len();
        if pending > 0 {
            info!(pending, "Waiting for in-flight updates");
        }
        while let Some(joined) = self.tasks.join_next().await {
            log_join(joined);
        }
    }

    fn spawn_all(&mut self, updates: Vec<Update>) {
        for update in updates {
            self.offset = Some(next_offset(self.offset, update.update_id));
            let state = self.state.clone();
            self.tasks.spawn(async move {
                let update_id = update.update_id;
                if let Err(e) = UpdateDispatcher::dispatch(&state, update).await {
                    error!(update_id, code = e.error_code(), error = %e, "Update handling failed");
                }
            });
        }
    }
}

/// Offset that acknowledges `update_id` and everything before it
fn next_offset(current: Option<i64>, update_id: i64) -> i64 {
    current.map_or(update_id + 1, |offset| offset.max(update_id + 1))
}

fn log_join(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        error!(error = %e, "Update task panicked");
    }
}
