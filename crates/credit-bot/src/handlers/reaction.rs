//! Rating reactions ("+", "-", emoji)

use tracing::debug;

use credit_core::{same_handle, UserRef};
use credit_service::{Outcome, RatingEngine, Reaction};

use super::error::HandlerResult;
use crate::jokes::{self, JokeCategory};
use crate::render;
use crate::server::BotState;
use crate::telegram::{AnimationMessage, InboundEvent, OutboundMessage, TextMessage};

/// Handles plain text that may be a rating reaction
pub struct ReactionHandler;

impl ReactionHandler {
    pub async fn handle(state: &BotState, event: &InboundEvent) -> HandlerResult<()> {
        let Some(target) = &event.target else {
            return Ok(());
        };

        if event.target_is_bot && !Self::is_own_bot(state, target) {
            debug!(target = %target, "Ignoring reaction to another bot");
            return Ok(());
        }

        let reaction = RatingEngine::new(state.service_context())
            .apply_reaction(&event.text, &event.reactor, target)
            .await?;

        if let Some(reply) = Self::reply(event, reaction) {
            state.transport().send(reply).await?;
        }
        Ok(())
    }

    /// This bot or the configured protected identity
    fn is_own_bot(state: &BotState, target: &UserRef) -> bool {
        let identity = state.identity();
        let policy = state.service_context().policy();
        if target.user_id.is_some()
            && (target.user_id == Some(identity.user_id) || target.user_id == policy.protected_id)
        {
            return true;
        }
        let handles = [identity.username.as_deref(), policy.protected_handle.as_deref()];
        target.handle.as_deref().is_some_and(|handle| {
            handles
                .into_iter()
                .flatten()
                .any(|own| same_handle(own, handle))
        })
    }

    /// What to send back for an outcome; silent outcomes send nothing
    fn reply(event: &InboundEvent, reaction: Reaction) -> Option<OutboundMessage> {
        let quoted = |text: String| -> Option<OutboundMessage> {
            Some(
                TextMessage::new(event.chat_id, text)
                    .reply_to(event.message_id)
                    .into(),
            )
        };

        match reaction.outcome {
            Outcome::UnknownCommand | Outcome::ResolutionFailed => None,
            Outcome::Throttled { .. } => quoted(render::THROTTLED.to_string()),
            Outcome::SelfTarget => quoted(render::self_target(jokes::random(JokeCategory::Chuck))),
            Outcome::ProtectedTarget => {
                quoted(render::protected_target(jokes::random(JokeCategory::Neutral)))
            }
            Outcome::AppliedNormal(_) | Outcome::AppliedMilestone(_) => {
                let text = render::applied_outcome(
                    &reaction.outcome,
                    reaction.command,
                    reaction.target.as_ref(),
                )?;
                // Applied results are announced without quoting
                Some(match reaction.reward {
                    Some(asset) => AnimationMessage {
                        chat_id: event.chat_id,
                        asset,
                        caption: text,
                    }
                    .into(),
                    None => TextMessage::new(event.chat_id, text).into(),
                })
            }
        }
    }
}
