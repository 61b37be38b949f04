//! User references - whatever a platform event tells us about a user
//!
//! Resolution precedence is explicit: numeric id, then handle, then first name.
//! The first lookup in that order that matches a stored record wins.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::UserId;

/// Strip a leading `@` and surrounding whitespace from a handle
pub fn normalize_handle(handle: &str) -> &str {
    let handle = handle.trim();
    handle.strip_prefix('@').unwrap_or(handle)
}

/// Platform handles are case-insensitive
pub fn same_handle(a: &str, b: &str) -> bool {
    normalize_handle(a).eq_ignore_ascii_case(normalize_handle(b))
}

/// One identifying field, in resolution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Id(UserId),
    Handle(&'a str),
    FirstName(&'a str),
}

/// Identifying fields supplied by an event for some user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub user_id: Option<UserId>,
    pub handle: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserRef {
    /// Reference by numeric id only
    pub fn by_id(id: UserId) -> Self {
        Self {
            user_id: Some(id),
            ..Self::default()
        }
    }

    /// Reference by handle only (leading `@` is dropped)
    pub fn by_handle(handle: impl AsRef<str>) -> Self {
        Self {
            handle: Some(normalize_handle(handle.as_ref()).to_string()),
            ..Self::default()
        }
    }

    /// Reference by display name only
    pub fn by_first_name(first_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            ..Self::default()
        }
    }

    /// Attach display names
    pub fn with_names(mut self, first_name: Option<String>, last_name: Option<String>) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }

    /// Attach a handle (leading `@` is dropped)
    pub fn with_handle(mut self, handle: Option<String>) -> Self {
        self.handle = handle.map(|h| normalize_handle(&h).to_string());
        self
    }

    /// True when no field can be used for lookup
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.handle.is_none() && self.first_name.is_none()
    }

    /// True when a new record can be created from this reference
    pub fn is_creatable(&self) -> bool {
        self.user_id.is_some() || self.handle.is_some()
    }

    /// Lookups in precedence order, skipping absent fields
    pub fn lookups(&self) -> impl Iterator<Item = Lookup<'_>> {
        let id = self.user_id.map(Lookup::Id);
        let handle = self.handle.as_deref().map(Lookup::Handle);
        let first_name = self.first_name.as_deref().map(Lookup::FirstName);
        [id, handle, first_name].into_iter().flatten()
    }

    /// Canonical key if the reference carries one
    pub fn key(&self) -> Option<UserKey> {
        match (self.user_id, self.handle.as_deref()) {
            (Some(id), _) => Some(UserKey::Id(id)),
            (None, Some(handle)) => Some(UserKey::handle(handle)),
            (None, None) => None,
        }
    }
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lookups().next() {
            Some(Lookup::Id(id)) => write!(f, "id:{id}"),
            Some(Lookup::Handle(handle)) => write!(f, "@{handle}"),
            Some(Lookup::FirstName(name)) => write!(f, "name:{name}"),
            None => f.write_str("<empty>"),
        }
    }
}

/// Canonical identity of a stored user, used as the rate-limit pair component
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserKey {
    Id(UserId),
    Handle(String),
}

impl UserKey {
    /// Handle key, normalized so that `@Bob` and `bob` compare equal
    pub fn handle(handle: &str) -> Self {
        Self::Handle(normalize_handle(handle).to_ascii_lowercase())
    }
}

impl From<UserId> for UserKey {
    fn from(id: UserId) -> Self {
        Self::Id(id)
    }
}

/// Every key a stored user is known by: the id and/or the handle.
///
/// A user first seen by handle keeps matching window events recorded under that
/// handle after the id becomes known, and the other way round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserKeys {
    primary: UserKey,
    alias: Option<UserKey>,
}

impl UserKeys {
    /// Keys for an id and/or a handle; `None` when neither is known
    pub fn new(user_id: Option<UserId>, handle: Option<&str>) -> Option<Self> {
        let handle = handle.map(UserKey::handle);
        match user_id {
            Some(id) => Some(Self {
                primary: UserKey::Id(id),
                alias: handle,
            }),
            None => handle.map(|primary| Self {
                primary,
                alias: None,
            }),
        }
    }

    /// The canonical key (id when known), recorded for new window events
    pub fn primary(&self) -> &UserKey {
        &self.primary
    }

    pub fn contains(&self, key: &UserKey) -> bool {
        &self.primary == key || self.alias.as_ref() == Some(key)
    }
}

impl From<UserKey> for UserKeys {
    fn from(primary: UserKey) -> Self {
        Self {
            primary,
            alias: None,
        }
    }
}

impl fmt::Display for UserKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} ({alias})", self.primary),
            None => write!(f, "{}", self.primary),
        }
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Handle(handle) => write!(f, "@{handle}"),
        }
    }
}
