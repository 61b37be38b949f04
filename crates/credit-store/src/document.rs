//! JSON document persistence
//!
//! A document is read whole and written whole. Writes go to a sibling temp file
//! which is fsynced and then renamed over the target, so a crash leaves either the
//! old or the new version on disk, never a torn one.

use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error};

/// Document persistence errors
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DocumentError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A typed JSON file
#[derive(Debug, Clone)]
pub struct JsonDocument<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document.
    ///
    /// A missing file reads as the default value. A file that exists but does not
    /// parse is moved aside to `<name>.corrupt-<unix>` and also reads as the default.
    /// Any other I/O failure is returned.
    pub async fn load(&self) -> Result<T, DocumentError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Document missing, starting empty");
                return Ok(T::default());
            }
            Err(e) => return Err(DocumentError::io(&self.path, e)),
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(value),
            Err(parse_error) => {
                let quarantine = self.quarantine_path();
                error!(
                    path = %self.path.display(),
                    moved_to = %quarantine.display(),
                    error = %parse_error,
                    "Document is unreadable, moving it aside and starting empty"
                );
                fs::rename(&self.path, &quarantine)
                    .await
                    .map_err(|e| DocumentError::io(&self.path, e))?;
                Ok(T::default())
            }
        }
    }

    /// Replace the document atomically
    pub async fn save(&self, value: &T) -> Result<(), DocumentError> {
        let bytes = serde_json::to_vec_pretty(value).map_err(|source| DocumentError::Encode {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DocumentError::io(parent, e))?;
        }

        let tmp = self.temp_path();
        let mut file = fs::File::create(&tmp)
            .await
            .map_err(|e| DocumentError::io(&tmp, e))?;
        file.write_all(&bytes)
            .await
            .map_err(|e| DocumentError::io(&tmp, e))?;
        file.sync_all()
            .await
            .map_err(|e| DocumentError::io(&tmp, e))?;
        drop(file);

        if let Err(e) = fs::rename(&tmp, &self.path).await {
            fs::remove_file(&tmp).await.ok();
            return Err(DocumentError::io(&self.path, e));
        }

        debug!(path = %self.path.display(), bytes = bytes.len(), "Document saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling(".tmp")
    }

    fn quarantine_path(&self) -> PathBuf {
        self.sibling(&format!(".corrupt-{}", Utc::now().timestamp()))
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(suffix);
        self.path.with_file_name(name)
    }
}

/// Check that a directory exists (creating it if needed) and accepts writes
pub async fn probe_writable(dir: &Path) -> bool {
    if fs::create_dir_all(dir).await.is_err() {
        return false;
    }
    let probe = dir.join(".write-probe");
    let ok = fs::write(&probe, b"ok").await.is_ok();
    fs::remove_file(&probe).await.ok();
    ok
}
