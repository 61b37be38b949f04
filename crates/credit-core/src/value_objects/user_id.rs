//! Platform user id - the stable numeric identity a chat platform assigns to an account

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Platform-stable user identifier (64-bit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UserId(i64);

impl UserId {
    /// Create a new UserId from a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, UserIdParseError> {
        s.trim()
            .parse::<i64>()
            .map(UserId)
            .map_err(|_| UserIdParseError::InvalidFormat)
    }
}

/// Error when parsing a UserId from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserIdParseError {
    #[error("invalid user id format")]
    InvalidFormat,
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::str::FromStr for UserId {
    type Err = UserIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserId::parse(s)
    }
}

impl Serialize for UserId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

// Older ledgers keyed users by stringified ids, so accept both forms
impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct UserIdVisitor;

        impl<'de> Visitor<'de> for UserIdVisitor {
            type Value = UserId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer representing a user id")
            }

            fn visit_i64<E>(self, value: i64) -> Result<UserId, E>
            where
                E: de::Error,
            {
                Ok(UserId(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<UserId, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(UserId)
                    .map_err(|_| de::Error::custom("user id out of range"))
            }

            fn visit_str<E>(self, value: &str) -> Result<UserId, E>
            where
                E: de::Error,
            {
                UserId::parse(value).map_err(|_| de::Error::custom("invalid user id string"))
            }
        }

        deserializer.deserialize_any(UserIdVisitor)
    }
}
