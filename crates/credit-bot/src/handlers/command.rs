//! Slash command parsing

use credit_core::{UserId, UserRef};

use super::error::{HandlerError, HandlerResult};
use crate::render;

/// Commands the bot answers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    Dump,
    /// `/set` with its raw argument string
    Set(String),
}

impl BotCommand {
    /// Parse `/name[@bot] args`.
    ///
    /// Returns `None` for plain text, unknown commands, and commands addressed to
    /// a different bot.
    pub fn parse(text: &str, bot_username: Option<&str>) -> Option<Self> {
        let rest = text.trim_start().strip_prefix('/')?;
        let (head, args) = rest
            .split_once(char::is_whitespace)
            .unwrap_or((rest, ""));
        let (name, addressee) = match head.split_once('@') {
            Some((name, addressee)) => (name, Some(addressee)),
            None => (head, None),
        };

        if let (Some(addressee), Some(ours)) = (addressee, bot_username) {
            if !addressee.eq_ignore_ascii_case(ours) {
                return None;
            }
        }

        match name.to_ascii_lowercase().as_str() {
            "start" => Some(Self::Start),
            "help" => Some(Self::Help),
            "dump" => Some(Self::Dump),
            "set" => Some(Self::Set(args.trim().to_string())),
            _ => None,
        }
    }
}

/// Parse `/set` arguments: `<@handle|user_id> <rating>`
pub fn parse_set_args(args: &str) -> HandlerResult<(UserRef, i64)> {
    let usage = || HandlerError::InvalidArguments(render::SET_USAGE);

    let mut parts = args.split_whitespace();
    let (Some(target), Some(rating), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(usage());
    };

    let target = if let Some(handle) = target.strip_prefix('@') {
        if handle.is_empty() {
            return Err(usage());
        }
        UserRef::by_handle(handle)
    } else {
        UserRef::by_id(UserId::parse(target).map_err(|_| usage())?)
    };
    let rating = rating.parse::<i64>().map_err(|_| usage())?;

    Ok((target, rating))
}
