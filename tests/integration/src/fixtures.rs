//! Test fixtures
//!
//! Telegram users and the updates they send, built as Bot API JSON.

use std::sync::atomic::{AtomicI64, Ordering};

use serde_json::{json, Value};

use credit_bot::telegram::Update;

use crate::helpers::{ADMIN_ID, BOT_ID, BOT_USERNAME};

/// Counter for unique update and message ids
static COUNTER: AtomicI64 = AtomicI64::new(1);

fn next_id() -> i64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

pub const CHAT_ID: i64 = -100;

/// A Telegram account
#[derive(Debug, Clone)]
pub struct Member {
    pub id: i64,
    pub first_name: &'static str,
    pub username: Option<&'static str>,
    pub is_bot: bool,
}

impl Member {
    pub const fn new(id: i64, first_name: &'static str, username: Option<&'static str>) -> Self {
        Self {
            id,
            first_name,
            username,
            is_bot: false,
        }
    }

    fn to_json(&self) -> Value {
        let mut user = json!({
            "id": self.id,
            "is_bot": self.is_bot,
            "first_name": self.first_name,
        });
        if let Some(username) = self.username {
            user["username"] = json!(username);
        }
        user
    }
}

pub fn alice() -> Member {
    Member::new(100, "Alice", Some("alice"))
}

pub fn bob() -> Member {
    Member::new(200, "Bob", Some("bob"))
}

pub fn carol() -> Member {
    Member::new(300, "Carol", None)
}

pub fn admin() -> Member {
    Member::new(ADMIN_ID, "Root", Some("root"))
}

pub fn the_bot() -> Member {
    Member {
        is_bot: true,
        ..Member::new(BOT_ID, "Credit", Some(BOT_USERNAME))
    }
}

pub fn other_bot() -> Member {
    Member {
        is_bot: true,
        ..Member::new(555, "Helper", Some("helper_bot"))
    }
}

fn update(message: Value) -> Update {
    serde_json::from_value(json!({
        "update_id": next_id(),
        "message": message,
    }))
    .expect("fixture is a valid update")
}

fn message(from: &Member, text: &str) -> Value {
    json!({
        "message_id": next_id(),
        "from": from.to_json(),
        "chat": {"id": CHAT_ID},
        "text": text,
    })
}

/// `from` sends `text` with no target
pub fn plain(from: &Member, text: &str) -> Update {
    update(message(from, text))
}

/// `from` replies to a message by `target`
pub fn reply(from: &Member, target: &Member, text: &str) -> Update {
    let mut msg = message(from, text);
    msg["reply_to_message"] = message(target, "original message");
    update(msg)
}

/// `from` sends `text`, which must contain `@handle`, as a mention
pub fn mention(from: &Member, text: &str, handle: &str) -> Update {
    let needle = format!("@{handle}");
    let byte_offset = text.find(&needle).expect("mention appears in text");
    let offset = text[..byte_offset].encode_utf16().count();
    let length = needle.encode_utf16().count();

    let mut msg = message(from, text);
    msg["entities"] = json!([{"type": "mention", "offset": offset, "length": length}]);
    update(msg)
}
