//! Inbound events - what the router needs from a Telegram message

use credit_core::{UserId, UserRef};

use super::types::{Message, User};

/// A text message reduced to reactor, target, and text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub chat_id: i64,
    pub message_id: i64,
    pub reactor: UserRef,
    pub is_reply: bool,
    /// Replied-to author, else the first user mention
    pub target: Option<UserRef>,
    /// Target account is a bot; for a plain mention this follows the username
    pub target_is_bot: bool,
    pub text: String,
}

impl InboundEvent {
    /// Returns `None` for messages without text or without a sender
    pub fn from_message(message: &Message) -> Option<Self> {
        let from = message.from.as_ref()?;
        let text = message.text.as_ref()?;

        let replied_author = message
            .reply_to_message
            .as_ref()
            .and_then(|reply| reply.from.as_ref());

        let (target, target_is_bot) = match replied_author {
            Some(author) => (Some(user_ref(author)), author.is_bot),
            None => mention_target(message, text),
        };

        Some(Self {
            chat_id: message.chat.id,
            message_id: message.message_id,
            reactor: user_ref(from),
            is_reply: replied_author.is_some(),
            target,
            target_is_bot,
            text: text.clone(),
        })
    }

    /// Sender's numeric id
    pub fn reactor_id(&self) -> Option<UserId> {
        self.reactor.user_id
    }
}

fn user_ref(user: &User) -> UserRef {
    UserRef::by_id(UserId::new(user.id))
        .with_handle(user.username.clone())
        .with_names(Some(user.first_name.clone()), user.last_name.clone())
}

/// First `text_mention` (carries the full user) or `mention` (carries a handle)
fn mention_target(message: &Message, text: &str) -> (Option<UserRef>, bool) {
    for entity in &message.entities {
        match entity.kind.as_str() {
            "text_mention" => {
                if let Some(user) = &entity.user {
                    return (Some(user_ref(user)), user.is_bot);
                }
            }
            "mention" => {
                if let Some(handle) = entity.text_in(text) {
                    let is_bot = is_bot_username(&handle);
                    return (Some(UserRef::by_handle(handle)), is_bot);
                }
            }
            _ => {}
        }
    }
    (None, false)
}

/// Telegram requires bot usernames to end in "bot"
fn is_bot_username(handle: &str) -> bool {
    let handle = handle.trim_start_matches('@');
    handle.len() >= 3
        && handle
            .get(handle.len() - 3..)
            .is_some_and(|suffix| suffix.eq_ignore_ascii_case("bot"))
}
