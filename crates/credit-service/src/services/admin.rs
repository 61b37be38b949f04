//! Admin service
//!
//! `/dump` and `/set`. Both are restricted to the configured administrator and
//! refuse everyone when no administrator is configured.

use tracing::{info, instrument, warn};

use credit_core::{UserId, UserRecord, UserRef};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::resolver::IdentityResolver;

/// Admin service
pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Check the requester against the configured administrator
    pub fn require_admin(&self, requester: UserId, operation: &str) -> ServiceResult<()> {
        if self.ctx.policy().admin_id == Some(requester) {
            return Ok(());
        }
        warn!(requester = %requester, operation, "Admin command refused");
        Err(ServiceError::permission_denied(operation))
    }

    /// Every record in insertion order, split into pages
    #[instrument(skip(self))]
    pub async fn dump(&self, requester: UserId) -> ServiceResult<Vec<Vec<UserRecord>>> {
        self.require_admin(requester, "/dump")?;

        let records = self.ctx.ledger().scan().await?;
        let page_size = self.ctx.policy().dump_page_size;
        info!(records = records.len(), page_size, "Dumping ledger");

        Ok(records
            .chunks(page_size)
            .map(<[UserRecord]>::to_vec)
            .collect())
    }

    /// Set a rating directly, bypassing the appreciation window
    #[instrument(skip(self))]
    pub async fn override_rating(
        &self,
        requester: UserId,
        target: &UserRef,
        rating: i64,
    ) -> ServiceResult<UserRecord> {
        self.require_admin(requester, "/set")?;

        if !target.is_creatable() {
            return Err(ServiceError::validation("target needs a user id or a handle"));
        }

        let record = IdentityResolver::new(self.ctx)
            .lookup(target)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", target.to_string()))?;

        let stored = self.ctx.ledger().upsert(&record.with_rating(rating)).await?;
        info!(target = %target, rating, "Rating overridden");
        Ok(stored)
    }
}
