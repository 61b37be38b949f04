//! Ledger document model

use credit_core::UserId;
use serde::{Deserialize, Serialize};

use super::current_version;

/// Contents of `ledger.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerDocument {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(default)]
    pub users: Vec<UserRow>,
}

impl Default for LedgerDocument {
    fn default() -> Self {
        Self {
            version: current_version(),
            users: Vec::new(),
        }
    }
}

/// One persisted user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
}
