//! Outbound messages and the transport seam

use async_trait::async_trait;
use credit_core::RewardAsset;

use super::error::TransportResult;

/// Plain or MarkdownV2 text message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessage {
    pub chat_id: i64,
    pub text: String,
    /// Quote this message when replying
    pub reply_to: Option<i64>,
    pub markdown_v2: bool,
    /// Ask the client to open a reply box for the addressed user only
    pub force_reply: bool,
}

impl TextMessage {
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            reply_to: None,
            markdown_v2: false,
            force_reply: false,
        }
    }

    pub fn reply_to(mut self, message_id: i64) -> Self {
        self.reply_to = Some(message_id);
        self
    }

    pub fn markdown_v2(mut self) -> Self {
        self.markdown_v2 = true;
        self
    }

    pub fn force_reply(mut self) -> Self {
        self.force_reply = true;
        self
    }
}

/// Animation (GIF/MP4) with a caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationMessage {
    pub chat_id: i64,
    pub asset: RewardAsset,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    Text(TextMessage),
    Animation(AnimationMessage),
}

impl OutboundMessage {
    pub fn chat_id(&self) -> i64 {
        match self {
            Self::Text(m) => m.chat_id,
            Self::Animation(m) => m.chat_id,
        }
    }

    /// Message text, or the caption for animations
    pub fn text(&self) -> &str {
        match self {
            Self::Text(m) => &m.text,
            Self::Animation(m) => &m.caption,
        }
    }
}

impl From<TextMessage> for OutboundMessage {
    fn from(message: TextMessage) -> Self {
        Self::Text(message)
    }
}

impl From<AnimationMessage> for OutboundMessage {
    fn from(message: AnimationMessage) -> Self {
        Self::Animation(message)
    }
}

/// Anything that can deliver messages to a chat
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, message: OutboundMessage) -> TransportResult<()>;
}
