//! Update handlers
//!
//! Routes each inbound message to a command or reaction handler and answers
//! failures in the chat.

mod admin;
mod command;
mod error;
mod reaction;

pub use admin::AdminHandler;
pub use command::{parse_set_args, BotCommand};
pub use error::{HandlerError, HandlerResult};
pub use reaction::ReactionHandler;

use tracing::{debug, warn};

use crate::render;
use crate::server::BotState;
use crate::telegram::{InboundEvent, TextMessage, Update};

/// Dispatch incoming updates to appropriate handlers
pub struct UpdateDispatcher;

impl UpdateDispatcher {
    /// Handle one update end to end.
    ///
    /// Failures are answered in the chat. Faults are then returned so the caller
    /// can log them; user errors end here.
    pub async fn dispatch(state: &BotState, update: Update) -> HandlerResult<()> {
        let Some(event) = update.message.as_ref().and_then(InboundEvent::from_message) else {
            return Ok(());
        };

        let Err(e) = Self::route(state, &event).await else {
            return Ok(());
        };

        let reply = TextMessage::new(event.chat_id, e.reply_text()).reply_to(event.message_id);
        if let Err(send_error) = state.transport().send(reply.into()).await {
            warn!(error = %send_error, "Failed to deliver error reply");
        }

        if e.is_fault() {
            return Err(e);
        }
        debug!(code = e.error_code(), error = %e, "Rejected user request");
        Ok(())
    }

    async fn route(state: &BotState, event: &InboundEvent) -> HandlerResult<()> {
        let command = BotCommand::parse(&event.text, state.identity().username.as_deref());
        match command {
            Some(BotCommand::Start) => Self::start(state, event).await,
            Some(BotCommand::Help) => {
                let reply = TextMessage::new(event.chat_id, render::HELP).reply_to(event.message_id);
                state.transport().send(reply.into()).await?;
                Ok(())
            }
            Some(BotCommand::Dump) => AdminHandler::dump(state, event).await,
            Some(BotCommand::Set(args)) => AdminHandler::set(state, event, &args).await,
            None => ReactionHandler::handle(state, event).await,
        }
    }

    async fn start(state: &BotState, event: &InboundEvent) -> HandlerResult<()> {
        let (Some(id), Some(first_name)) = (event.reactor.user_id, &event.reactor.first_name)
        else {
            return Ok(());
        };
        let reply = TextMessage::new(
            event.chat_id,
            render::start_greeting(id.into_inner(), first_name),
        )
        .reply_to(event.message_id)
        .markdown_v2()
        .force_reply();
        state.transport().send(reply.into()).await?;
        Ok(())
    }
}
