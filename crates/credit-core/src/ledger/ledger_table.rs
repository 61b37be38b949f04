//! Ledger table - insertion-ordered user records with merge-on-upsert

use crate::entities::UserRecord;
use crate::error::DomainError;
use crate::value_objects::{same_handle, UserRef};

/// All user records in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerTable {
    records: Vec<UserRecord>,
}

impl LedgerTable {
    /// Create a table from already-stored records
    pub fn new(records: Vec<UserRecord>) -> Self {
        Self { records }
    }

    /// Borrow the records in insertion order
    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<UserRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve a reference: id, then handle, then first name; first match wins
    pub fn find(&self, reference: &UserRef) -> Option<&UserRecord> {
        reference
            .lookups()
            .find_map(|lookup| self.records.iter().find(|r| r.matches(&lookup)))
    }

    /// Rating for a reference; unknown users read as 0
    pub fn rating(&self, reference: &UserRef) -> i64 {
        self.find(reference).map_or(0, UserRecord::rating)
    }

    /// Row an upsert of `record` would merge into.
    ///
    /// Matches by id first. A handle match is only accepted when the stored row has no
    /// id yet or the same id. First names never select a row for writing.
    fn position_for(&self, record: &UserRecord) -> Option<usize> {
        if let Some(id) = record.user_id {
            if let Some(pos) = self.records.iter().position(|r| r.user_id == Some(id)) {
                return Some(pos);
            }
        }

        let handle = record.handle.as_deref()?;
        self.records.iter().position(|r| {
            let handle_matches = r.handle.as_deref().is_some_and(|h| same_handle(h, handle));
            let id_compatible = match (r.user_id, record.user_id) {
                (Some(stored), Some(incoming)) => stored == incoming,
                _ => true,
            };
            handle_matches && id_compatible
        })
    }

    /// Merge `record` into its row, or append it. Returns the stored row and whether
    /// the table changed.
    pub fn upsert(&mut self, record: &UserRecord) -> Result<(UserRecord, bool), DomainError> {
        if !record.has_identity() {
            return Err(DomainError::MissingIdentity);
        }

        match self.position_for(record) {
            Some(pos) => {
                let stored = &mut self.records[pos];
                let changed = stored.merge(record);
                Ok((stored.clone(), changed))
            }
            None => {
                self.records.push(record.clone());
                Ok((record.clone(), true))
            }
        }
    }

    /// Add `delta` to the row matching `record` (created at 0 if absent) and merge the
    /// supplied display fields in the same step.
    pub fn adjust(&mut self, record: &UserRecord, delta: i64) -> Result<UserRecord, DomainError> {
        if !record.has_identity() {
            return Err(DomainError::MissingIdentity);
        }

        let current = self
            .position_for(record)
            .map_or(0, |pos| self.records[pos].rating());
        let next = current
            .checked_add(delta)
            .ok_or_else(|| DomainError::InvalidRating(format!("{current} + {delta} overflows")))?;

        let patch = UserRecord {
            rating: Some(next),
            ..record.clone()
        };
        self.upsert(&patch).map(|(stored, _)| stored)
    }
}
