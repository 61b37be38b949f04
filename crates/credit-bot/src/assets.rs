//! Milestone reward assets read from a directory

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rand::seq::SliceRandom;
use tokio::fs;
use tracing::{debug, warn};

use credit_core::{DomainError, RepoResult, RewardAsset, RewardSource};

const EXTENSIONS: &[&str] = &["gif", "mp4"];

/// Picks a random GIF or MP4 from a directory on every call
#[derive(Debug, Clone)]
pub struct DirectoryRewardSource {
    dir: PathBuf,
}

impl DirectoryRewardSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Candidate files, sorted by name
    pub async fn list(&self) -> io::Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(&self.dir).await?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if is_animation(&path) && entry.file_type().await?.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

fn is_animation(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

fn asset_error(path: &Path, e: &io::Error) -> DomainError {
    DomainError::InternalError(format!("reward asset {}: {e}", path.display()))
}

#[async_trait]
impl RewardSource for DirectoryRewardSource {
    async fn pick_reward_asset(&self) -> RepoResult<Option<RewardAsset>> {
        let files = match self.list().await {
            Ok(files) => files,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(dir = %self.dir.display(), "Reward directory does not exist");
                return Ok(None);
            }
            Err(e) => return Err(asset_error(&self.dir, &e)),
        };

        let Some(path) = files.choose(&mut rand::thread_rng()).cloned() else {
            debug!(dir = %self.dir.display(), "No reward assets available");
            return Ok(None);
        };

        let bytes = fs::read(&path).await.map_err(|e| asset_error(&path, &e))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!(file = %file_name, size = bytes.len(), "Picked reward asset");

        Ok(Some(RewardAsset { file_name, bytes }))
    }
}
