//! User record - identity plus social credit, the unit of the ledger

use crate::value_objects::{
    normalize_handle, same_handle, Lookup, UserId, UserKey, UserKeys, UserRef,
};

/// One ledger row.
///
/// Every field is optional so that a record can double as a partial update:
/// merging only copies fields that are `Some`. Stored records always carry a
/// `user_id` or a `handle`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: Option<UserId>,
    pub handle: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub rating: Option<i64>,
}

impl UserRecord {
    /// Fresh record for a user seen for the first time (rating 0)
    pub fn first_contact(reference: &UserRef) -> Self {
        Self {
            rating: Some(0),
            ..Self::from_ref(reference)
        }
    }

    /// Partial record carrying only the identity and display fields of a reference
    pub fn from_ref(reference: &UserRef) -> Self {
        Self {
            user_id: reference.user_id,
            handle: reference
                .handle
                .as_deref()
                .map(|h| normalize_handle(h).to_string()),
            first_name: reference.first_name.clone(),
            last_name: reference.last_name.clone(),
            rating: None,
        }
    }

    /// Current rating; a missing rating reads as 0
    #[inline]
    pub fn rating(&self) -> i64 {
        self.rating.unwrap_or(0)
    }

    /// Builder-style rating setter
    pub fn with_rating(mut self, rating: i64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// True when the record can be stored
    #[inline]
    pub fn has_identity(&self) -> bool {
        self.user_id.is_some() || self.handle.is_some()
    }

    /// Canonical key: the numeric id when known, else the handle
    pub fn key(&self) -> Option<UserKey> {
        match (self.user_id, self.handle.as_deref()) {
            (Some(id), _) => Some(UserKey::Id(id)),
            (None, Some(handle)) => Some(UserKey::handle(handle)),
            (None, None) => None,
        }
    }

    /// Every key the record is known by, for matching window events
    pub fn keys(&self) -> Option<UserKeys> {
        UserKeys::new(self.user_id, self.handle.as_deref())
    }

    /// Check a single lookup against this record
    pub fn matches(&self, lookup: &Lookup<'_>) -> bool {
        match lookup {
            Lookup::Id(id) => self.user_id == Some(*id),
            Lookup::Handle(handle) => self
                .handle
                .as_deref()
                .is_some_and(|h| same_handle(h, handle)),
            Lookup::FirstName(name) => self.first_name.as_deref() == Some(*name),
        }
    }

    /// Same person as `other`, judged by id first and by handle when an id is missing
    pub fn is_same_user(&self, other: &UserRecord) -> bool {
        match (self.user_id, other.user_id) {
            (Some(a), Some(b)) => a == b,
            _ => match (self.handle.as_deref(), other.handle.as_deref()) {
                (Some(a), Some(b)) => same_handle(a, b),
                _ => false,
            },
        }
    }

    /// Could `other` describe the same person? Unlike [`Self::is_same_user`], a
    /// missing field on either side is no evidence against it.
    pub fn is_compatible_with(&self, other: &UserRecord) -> bool {
        match (self.user_id, other.user_id) {
            (Some(a), Some(b)) => a == b,
            _ => match (self.handle.as_deref(), other.handle.as_deref()) {
                (Some(a), Some(b)) => same_handle(a, b),
                _ => true,
            },
        }
    }

    /// Copy every supplied field of `patch` into `self`. Returns true if anything changed.
    pub fn merge(&mut self, patch: &UserRecord) -> bool {
        let mut changed = false;
        changed |= merge_field(&mut self.user_id, &patch.user_id);
        changed |= merge_field(&mut self.handle, &patch.handle);
        changed |= merge_field(&mut self.first_name, &patch.first_name);
        changed |= merge_field(&mut self.last_name, &patch.last_name);
        changed |= merge_field(&mut self.rating, &patch.rating);
        changed
    }

    /// Name to show in replies: first name, else handle, else id
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.first_name {
            return name.clone();
        }
        if let Some(handle) = &self.handle {
            return handle.clone();
        }
        self.user_id
            .map_or_else(|| "someone".to_string(), |id| id.to_string())
    }
}

fn merge_field<T: Clone + PartialEq>(slot: &mut Option<T>, value: &Option<T>) -> bool {
    match value {
        Some(v) if slot.as_ref() != Some(v) => {
            *slot = Some(v.clone());
            true
        }
        _ => false,
    }
}
