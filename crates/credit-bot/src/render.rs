//! Reply texts

use credit_core::{RatingCommand, UserRecord};
use credit_service::Outcome;

pub const THROTTLED: &str = "Wait a little!";
pub const APOLOGY: &str = "I am not feeling well...";
pub const ADMIN_ONLY: &str = "Only the administrator can do that.";
pub const EMPTY_LEDGER: &str = "The ledger is empty.";
pub const SET_USAGE: &str = "Usage: /set <@handle|user_id> <rating>";

pub const HELP: &str = "Reply to someone's message with + (or 👍 ❤️ 🔥 💯 🙏) to give them \
one social credit, or with - (or 👎 💩 🤡) to take one away. \
Mentioning them works too.\n\
The same person can only be rated by you once a minute.";

/// Applied reaction: `Plus one social credit to Bob. (@bob) Total rating: 3`
pub fn applied(command: RatingCommand, target: &UserRecord, rating: i64) -> String {
    let name = target
        .first_name
        .clone()
        .unwrap_or_else(|| target.display_name());
    match target.handle.as_deref() {
        Some(handle) => format!(
            "{} one social credit to {name}. (@{handle}) Total rating: {rating}",
            command.label()
        ),
        None => format!(
            "{} one social credit to {name}. Total rating: {rating}",
            command.label()
        ),
    }
}

/// Text for an applied outcome, if it is one
pub fn applied_outcome(
    outcome: &Outcome,
    command: Option<RatingCommand>,
    target: Option<&UserRecord>,
) -> Option<String> {
    let rating = outcome.rating()?;
    Some(applied(command?, target?, rating))
}

pub fn protected_target(joke: &str) -> String {
    format!("Thank you! I am not *that* type...\nBut I like jokes.\n{joke}")
}

pub fn self_target(joke: &str) -> String {
    format!("I like you too...Are you Chuck?\n{joke}")
}

/// MarkdownV2 greeting that mentions the user by id
pub fn start_greeting(user_id: i64, first_name: &str) -> String {
    format!(
        "Hi [{}](tg://user?id={user_id})\\!",
        escape_markdown_v2(first_name)
    )
}

/// One `/dump` message
pub fn dump_page(page: &[UserRecord], first_index: usize) -> String {
    page.iter()
        .enumerate()
        .map(|(i, record)| {
            let mut line = format!("{}. {}", first_index + i + 1, record.display_name());
            if let Some(handle) = &record.handle {
                line.push_str(&format!(" @{handle}"));
            }
            if let Some(id) = record.user_id {
                line.push_str(&format!(" [{id}]"));
            }
            line.push_str(&format!(": {}", record.rating()));
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn rating_set(record: &UserRecord) -> String {
    format!(
        "Rating of {} set to {}.",
        record.display_name(),
        record.rating()
    )
}

/// Escape the characters MarkdownV2 reserves
pub fn escape_markdown_v2(text: &str) -> String {
    const RESERVED: &[char] = &[
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
        '\\',
    ];
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if RESERVED.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
