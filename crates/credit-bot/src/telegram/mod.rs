//! Telegram Bot API transport
//!
//! Wire types, the HTTP client, and the conversion of raw updates into
//! [`InboundEvent`]s. Everything outbound goes through the [`Transport`] trait so
//! the router can be driven in-process by tests.

mod client;
mod error;
mod inbound;
mod outbound;
mod types;

pub use client::TelegramClient;
pub use error::{TransportError, TransportResult};
pub use inbound::InboundEvent;
pub use outbound::{AnimationMessage, OutboundMessage, TextMessage, Transport};
pub use types::{ApiResponse, Chat, Message, MessageEntity, Update, User};
