//! Appreciation window document model

use credit_core::{UserId, UserKey};
use serde::{Deserialize, Serialize};

use super::current_version;

/// Contents of `appreciations.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowDocument {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(default)]
    pub events: Vec<AppreciationRow>,
}

impl Default for WindowDocument {
    fn default() -> Self {
        Self {
            version: current_version(),
            events: Vec::new(),
        }
    }
}

/// One persisted window entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppreciationRow {
    pub timestamp: i64,
    pub reactor_id: UserId,
    pub target: UserKey,
}
