//! Bot state
//!
//! Shared dependencies handed to every update handler.

use std::sync::Arc;

use credit_core::UserId;
use credit_service::ServiceContext;

use crate::telegram::{Transport, User};

/// The bot's own account, learned from `getMe`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    pub user_id: UserId,
    /// Used to accept `/command@username` addressed to this bot
    pub username: Option<String>,
}

impl From<&User> for BotIdentity {
    fn from(user: &User) -> Self {
        Self {
            user_id: UserId::new(user.id),
            username: user.username.clone(),
        }
    }
}

/// Bot application state
#[derive(Clone)]
pub struct BotState {
    /// Service context with storage ports and policy
    service_context: Arc<ServiceContext>,
    /// Outbound side of the chat platform
    transport: Arc<dyn Transport>,
    identity: Arc<BotIdentity>,
}

impl BotState {
    pub fn new(
        service_context: ServiceContext,
        transport: Arc<dyn Transport>,
        identity: BotIdentity,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            transport,
            identity: Arc::new(identity),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the outbound transport
    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Get the bot's own identity
    pub fn identity(&self) -> &BotIdentity {
        &self.identity
    }
}

impl std::fmt::Debug for BotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotState")
            .field("service_context", &self.service_context)
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}
