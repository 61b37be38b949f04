//! Result of one rating reaction

use credit_core::{RatingCommand, RewardAsset, UserRecord};

/// What happened to a reaction. Policy outcomes are values, never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Rating changed to the contained value
    AppliedNormal(i64),
    /// Rating changed and landed on a milestone
    AppliedMilestone(i64),
    /// Same reactor and target inside the window; `since` is the earlier acceptance
    Throttled { since: i64 },
    /// Reactor tried to rate themselves
    SelfTarget,
    /// Target is the bot's own identity
    ProtectedTarget,
    /// Message did not start with a rating symbol
    UnknownCommand,
    /// Target could not be identified
    ResolutionFailed,
}

impl Outcome {
    /// Rating after the change, for applied outcomes
    pub fn rating(&self) -> Option<i64> {
        match self {
            Self::AppliedNormal(r) | Self::AppliedMilestone(r) => Some(*r),
            _ => None,
        }
    }

    #[inline]
    pub fn is_applied(&self) -> bool {
        self.rating().is_some()
    }
}

/// Full reaction result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub outcome: Outcome,
    /// Target as stored (applied) or as resolved (short-circuited)
    pub target: Option<UserRecord>,
    pub command: Option<RatingCommand>,
    /// Milestone attachment, when one was picked
    pub reward: Option<RewardAsset>,
}

impl Reaction {
    pub(crate) fn unknown_command() -> Self {
        Self::bare(Outcome::UnknownCommand, None)
    }

    pub(crate) fn bare(outcome: Outcome, command: Option<RatingCommand>) -> Self {
        Self {
            outcome,
            target: None,
            command,
            reward: None,
        }
    }

    pub(crate) fn with_target(mut self, target: UserRecord) -> Self {
        self.target = Some(target);
        self
    }
}
