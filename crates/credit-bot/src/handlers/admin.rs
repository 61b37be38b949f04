//! Admin commands: /dump and /set

use tracing::info;

use credit_service::{AdminService, ServiceError};

use super::command::parse_set_args;
use super::error::HandlerResult;
use crate::render;
use crate::server::BotState;
use crate::telegram::{InboundEvent, TextMessage};

pub struct AdminHandler;

impl AdminHandler {
    /// Send the whole ledger, one page per message
    pub async fn dump(state: &BotState, event: &InboundEvent) -> HandlerResult<()> {
        let requester = event
            .reactor_id()
            .ok_or_else(|| ServiceError::permission_denied("/dump"))?;
        let pages = AdminService::new(state.service_context())
            .dump(requester)
            .await?;

        if pages.is_empty() {
            let reply = TextMessage::new(event.chat_id, render::EMPTY_LEDGER);
            state.transport().send(reply.into()).await?;
            return Ok(());
        }

        let mut shown = 0;
        for page in &pages {
            let text = render::dump_page(page, shown);
            shown += page.len();
            state
                .transport()
                .send(TextMessage::new(event.chat_id, text).into())
                .await?;
        }
        info!(pages = pages.len(), records = shown, "Ledger dumped");
        Ok(())
    }

    /// Override one rating
    pub async fn set(state: &BotState, event: &InboundEvent, args: &str) -> HandlerResult<()> {
        let requester = event
            .reactor_id()
            .ok_or_else(|| ServiceError::permission_denied("/set"))?;
        let admin = AdminService::new(state.service_context());
        // Non-admins get refused before they learn the argument format
        admin.require_admin(requester, "/set")?;

        let (target, rating) = parse_set_args(args)?;
        let record = admin.override_rating(requester, &target, rating).await?;

        let reply = TextMessage::new(event.chat_id, render::rating_set(&record))
            .reply_to(event.message_id);
        state.transport().send(reply.into()).await?;
        Ok(())
    }
}
