//! Transport error types

use thiserror::Error;

/// Bot API transport errors
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request could not be sent or the body could not be read
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Telegram answered with `ok: false`
    #[error("Bot API error in {method} ({code}): {description}")]
    Api {
        method: &'static str,
        code: i64,
        description: String,
    },

    /// Telegram answered `ok: true` without a result
    #[error("Bot API returned no result for {0}")]
    MissingResult(&'static str),

    /// Transport used after it was shut down, or a test double refusing to send
    #[error("Transport unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL embeds the bot token
        Self::Http(err.without_url())
    }
}

/// Transport result type
pub type TransportResult<T> = Result<T, TransportError>;
