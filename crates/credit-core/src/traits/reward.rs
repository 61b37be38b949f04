//! Milestone rewards - attachments the transport sends on milestone ratings

use async_trait::async_trait;

use super::storage::RepoResult;

/// A non-text attachment (GIF, short video)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardAsset {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait RewardSource: Send + Sync {
    /// Pick a random asset; `None` when there is nothing to send
    async fn pick_reward_asset(&self) -> RepoResult<Option<RewardAsset>>;
}

/// Reward source that never has anything to send
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRewards;

#[async_trait]
impl RewardSource for NoRewards {
    async fn pick_reward_asset(&self) -> RepoResult<Option<RewardAsset>> {
        Ok(None)
    }
}
