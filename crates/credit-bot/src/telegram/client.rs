//! Bot API HTTP client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use credit_common::TelegramConfig;

use super::error::{TransportError, TransportResult};
use super::outbound::{AnimationMessage, OutboundMessage, TextMessage, Transport};
use super::types::{ApiResponse, Update, User};

/// Slack added on top of the long-poll timeout before the HTTP request gives up
const HTTP_TIMEOUT_SLACK_SECS: u64 = 10;

#[derive(Serialize)]
struct GetUpdatesParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u64,
    allowed_updates: &'a [&'a str],
}

#[derive(Serialize)]
struct ReplyParameters {
    message_id: i64,
    allow_sending_without_reply: bool,
}

#[derive(Serialize)]
struct ForceReply {
    force_reply: bool,
    selective: bool,
}

#[derive(Serialize)]
struct SendMessageParams<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_parameters: Option<ReplyParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<ForceReply>,
}

impl<'a> From<&'a TextMessage> for SendMessageParams<'a> {
    fn from(message: &'a TextMessage) -> Self {
        Self {
            chat_id: message.chat_id,
            text: &message.text,
            parse_mode: message.markdown_v2.then_some("MarkdownV2"),
            reply_parameters: message.reply_to.map(|message_id| ReplyParameters {
                message_id,
                allow_sending_without_reply: true,
            }),
            reply_markup: message.force_reply.then_some(ForceReply {
                force_reply: true,
                selective: true,
            }),
        }
    }
}

#[derive(Serialize)]
struct NoParams {}

/// Telegram Bot API client
#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    base_url: String,
    poll_timeout_secs: u64,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig) -> TransportResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(
                config.poll_timeout_secs + HTTP_TIMEOUT_SLACK_SECS,
            ))
            .build()?;

        Ok(Self {
            http,
            base_url: format!(
                "{}/bot{}",
                config.api_url.trim_end_matches('/'),
                config.token
            ),
            poll_timeout_secs: config.poll_timeout_secs,
        })
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }

    async fn call<P, T>(&self, method: &'static str, params: &P) -> TransportResult<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response: ApiResponse<T> = self
            .http
            .post(self.url(method))
            .json(params)
            .send()
            .await?
            .json()
            .await?;
        unwrap_response(method, response)
    }

    /// The bot's own account
    #[instrument(skip(self))]
    pub async fn get_me(&self) -> TransportResult<User> {
        self.call("getMe", &NoParams {}).await
    }

    /// Long-poll for new updates after `offset`
    pub async fn get_updates(&self, offset: Option<i64>) -> TransportResult<Vec<Update>> {
        let params = GetUpdatesParams {
            offset,
            timeout: self.poll_timeout_secs,
            allowed_updates: &["message"],
        };
        let updates: Vec<Update> = self.call("getUpdates", &params).await?;
        if !updates.is_empty() {
            debug!(count = updates.len(), "Received updates");
        }
        Ok(updates)
    }

    async fn send_message(&self, message: &TextMessage) -> TransportResult<()> {
        let _: serde_json::Value = self
            .call("sendMessage", &SendMessageParams::from(message))
            .await?;
        Ok(())
    }

    async fn send_animation(&self, message: AnimationMessage) -> TransportResult<()> {
        let part = Part::bytes(message.asset.bytes).file_name(message.asset.file_name);
        let form = Form::new()
            .text("chat_id", message.chat_id.to_string())
            .text("caption", message.caption)
            .part("animation", part);

        let response: ApiResponse<serde_json::Value> = self
            .http
            .post(self.url("sendAnimation"))
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;
        unwrap_response("sendAnimation", response).map(|_| ())
    }
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("base_url", &"[REDACTED]")
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish()
    }
}

#[async_trait]
impl Transport for TelegramClient {
    #[instrument(skip(self, message), fields(chat_id = message.chat_id()))]
    async fn send(&self, message: OutboundMessage) -> TransportResult<()> {
        match message {
            OutboundMessage::Text(text) => self.send_message(&text).await,
            OutboundMessage::Animation(animation) => self.send_animation(animation).await,
        }
    }
}

fn unwrap_response<T>(method: &'static str, response: ApiResponse<T>) -> TransportResult<T> {
    if !response.ok {
        return Err(TransportError::Api {
            method,
            code: response.error_code.unwrap_or_default(),
            description: response.description.unwrap_or_default(),
        });
    }
    response.result.ok_or(TransportError::MissingResult(method))
}
