//! Rating update engine
//!
//! Runs one reaction through the gates in order: command, target resolution,
//! protected target, self-rating, appreciation window, ledger write, milestone.
//! Nothing is written before the window accepts the pair, and a failed ledger
//! write takes the window registration back out.

use tracing::{debug, error, info, instrument, warn};

use credit_core::{is_milestone, same_handle, RatingCommand, UserRecord, UserRef, WindowDecision};

use crate::dto::{Outcome, Reaction};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::resolver::IdentityResolver;

/// Rating update engine
pub struct RatingEngine<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RatingEngine<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply a "+"/"-" style message from `reactor` to `target`
    #[instrument(skip(self, reactor, target), fields(reactor = %reactor, target = %target))]
    pub async fn apply_reaction(
        &self,
        text: &str,
        reactor: &UserRef,
        target: &UserRef,
    ) -> ServiceResult<Reaction> {
        let Some(command) = RatingCommand::parse(text) else {
            return Ok(Reaction::unknown_command());
        };

        let Some(reactor_id) = reactor.user_id else {
            debug!("Reactor has no user id");
            return Ok(Reaction::bare(Outcome::ResolutionFailed, Some(command)));
        };

        let resolved = IdentityResolver::new(self.ctx).lookup(target).await?;
        let Some((record, keys)) = resolved.and_then(|r| r.keys().map(|k| (r, k))) else {
            debug!("Target could not be resolved");
            return Ok(Reaction::bare(Outcome::ResolutionFailed, Some(command)));
        };

        let policy = self.ctx.policy();
        let protected_by_id = record.user_id.is_some() && record.user_id == policy.protected_id;
        let protected_by_handle = policy
            .protected_handle
            .as_deref()
            .zip(record.handle.as_deref())
            .is_some_and(|(protected, handle)| same_handle(protected, handle));
        if protected_by_id || protected_by_handle {
            debug!("Target is the protected identity");
            return Ok(
                Reaction::bare(Outcome::ProtectedTarget, Some(command)).with_target(record)
            );
        }

        if record.is_same_user(&UserRecord::from_ref(reactor)) {
            debug!("Reactor targeted themselves");
            return Ok(Reaction::bare(Outcome::SelfTarget, Some(command)).with_target(record));
        }

        let now = self.ctx.now();
        let event = match self.ctx.window().try_register(reactor_id, &keys, now).await? {
            WindowDecision::Accepted(event) => event,
            WindowDecision::Throttled { since } => {
                info!(
                    reactor_id = %reactor_id,
                    target = %keys,
                    elapsed = now - since,
                    "Not updated, pair is inside the window"
                );
                return Ok(Reaction::bare(Outcome::Throttled { since }, Some(command))
                    .with_target(record));
            }
        };

        let stored = match self.ctx.ledger().adjust_rating(&record, command.delta()).await {
            Ok(stored) => stored,
            Err(e) => {
                if let Err(revoke_error) = self.ctx.window().revoke(&event).await {
                    error!(error = %revoke_error, "Failed to revoke window registration");
                }
                return Err(e.into());
            }
        };

        let rating = stored.rating();
        info!(
            reactor_id = %reactor_id,
            target = %keys,
            command = %command,
            rating,
            "Rating updated"
        );

        if !is_milestone(rating, policy.milestone_every) {
            return Ok(
                Reaction::bare(Outcome::AppliedNormal(rating), Some(command)).with_target(stored)
            );
        }

        let reward = match self.ctx.rewards().pick_reward_asset().await {
            Ok(reward) => reward,
            Err(e) => {
                warn!(error = %e, "Milestone reward unavailable");
                None
            }
        };
        info!(target = %keys, rating, has_reward = reward.is_some(), "Milestone reached");

        Ok(Reaction {
            outcome: Outcome::AppliedMilestone(rating),
            target: Some(stored),
            command: Some(command),
            reward,
        })
    }
}
