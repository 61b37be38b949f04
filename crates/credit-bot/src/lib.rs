//! # credit-bot
//!
//! Telegram shell around the rating engine: long-polls the Bot API, turns each
//! update into an [`InboundEvent`](telegram::InboundEvent), routes it to the
//! rating or admin services, and renders the outcome back to the chat.

pub mod assets;
pub mod handlers;
pub mod health;
pub mod jokes;
pub mod render;
pub mod server;
pub mod telegram;

pub use server::{create_bot_state, run, BotIdentity, BotState};
