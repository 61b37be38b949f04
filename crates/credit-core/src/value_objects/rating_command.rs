//! Rating commands - the closed set of "+"/"-" style triggers and their deltas

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ratings that are exact multiples of this value are milestones
pub const DEFAULT_MILESTONE_EVERY: i64 = 25;

const PLUS_SYMBOLS: &[&str] = &["+", "👍", "❤", "🔥", "💯", "🙏"];
const MINUS_SYMBOLS: &[&str] = &["-", "👎", "💩", "🤡"];

/// A recognized rating action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingCommand {
    Plus,
    Minus,
}

impl RatingCommand {
    /// Recognize a command from the beginning of a message.
    ///
    /// Only the leading symbol matters, so `"+ well said"` and `"👍🏽"` both count.
    /// Anything else is not a command.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim_start();
        if PLUS_SYMBOLS.iter().any(|s| text.starts_with(s)) {
            Some(Self::Plus)
        } else if MINUS_SYMBOLS.iter().any(|s| text.starts_with(s)) {
            Some(Self::Minus)
        } else {
            None
        }
    }

    /// Signed change applied to the target's rating
    #[inline]
    pub const fn delta(self) -> i64 {
        match self {
            Self::Plus => 1,
            Self::Minus => -1,
        }
    }

    /// Human label used in replies
    pub const fn label(self) -> &'static str {
        match self {
            Self::Plus => "Plus",
            Self::Minus => "Minus",
        }
    }

    /// All trigger symbols for this command
    pub fn symbols(self) -> &'static [&'static str] {
        match self {
            Self::Plus => PLUS_SYMBOLS,
            Self::Minus => MINUS_SYMBOLS,
        }
    }
}

impl fmt::Display for RatingCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Check whether a rating is a milestone (zero and negative multiples included)
#[inline]
pub fn is_milestone(rating: i64, every: i64) -> bool {
    every > 0 && rating % every == 0
}
