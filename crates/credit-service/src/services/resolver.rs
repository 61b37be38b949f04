//! Identity resolver
//!
//! Turns whatever a platform event says about a user into a ledger record.
//! Precedence is id, then handle, then first name. A stored record whose id or
//! handle contradicts the reference is never returned for it.

use tracing::{debug, info, instrument};

use credit_core::{UserRecord, UserRef};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Identity resolver
pub struct IdentityResolver<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve a reference and persist the result.
    ///
    /// Known records are refreshed with any newly supplied display fields. Unknown
    /// users are created at rating 0 when the reference carries an id or a handle.
    #[instrument(skip(self, reference), fields(reference = %reference))]
    pub async fn resolve(&self, reference: &UserRef) -> ServiceResult<UserRecord> {
        let incoming = UserRecord::from_ref(reference);

        match self.find_compatible(reference, &incoming).await? {
            Some(stored) => {
                let mut merged = stored.clone();
                if !merged.merge(&incoming) {
                    return Ok(stored);
                }
                let updated = self.ctx.ledger().upsert(&merged).await?;
                debug!(user = ?updated.key(), "Refreshed display fields");
                Ok(updated)
            }
            None if reference.is_creatable() => {
                let created = self
                    .ctx
                    .ledger()
                    .upsert(&UserRecord::first_contact(reference))
                    .await?;
                info!(user = ?created.key(), "New user recorded");
                Ok(created)
            }
            None => Err(ServiceError::not_found("User", reference.to_string())),
        }
    }

    /// Resolve a reference without writing anything.
    ///
    /// Returns the stored record merged with the supplied fields, a fresh rating-0
    /// record for a creatable unknown reference, or `None` when nothing identifies
    /// the user. The result is what [`resolve`](Self::resolve) would store.
    #[instrument(skip(self, reference), fields(reference = %reference))]
    pub async fn lookup(&self, reference: &UserRef) -> ServiceResult<Option<UserRecord>> {
        if reference.is_empty() {
            return Ok(None);
        }
        let incoming = UserRecord::from_ref(reference);

        Ok(match self.find_compatible(reference, &incoming).await? {
            Some(mut stored) => {
                stored.merge(&incoming);
                Some(stored)
            }
            None if reference.is_creatable() => Some(UserRecord::first_contact(reference)),
            None => None,
        })
    }

    async fn find_compatible(
        &self,
        reference: &UserRef,
        incoming: &UserRecord,
    ) -> ServiceResult<Option<UserRecord>> {
        let found = self.ctx.ledger().find(reference).await?;
        Ok(found.filter(|stored| {
            let compatible = stored.is_compatible_with(incoming);
            if !compatible {
                debug!(stored = ?stored.key(), "Match contradicts the reference, ignoring it");
            }
            compatible
        }))
    }
}
