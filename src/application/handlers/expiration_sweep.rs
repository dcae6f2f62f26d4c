//! Expiration sweep.
//!
//! Intended to run once per day, but safe at any cadence: the selection
//! predicate (`is_member` and expiration strictly before now) excludes
//! members a previous run already demoted, so repeated runs converge.
//! Each member transition is independent; a failing row is logged and
//! skipped without aborting the batch.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::notification::NotificationDispatcher;
use crate::ports::{MembershipStore, UserDirectory};

/// Handler for the scheduled expiration sweep.
pub struct ExpirationSweepHandler {
    memberships: Arc<dyn MembershipStore>,
    users: Arc<dyn UserDirectory>,
    notifier: NotificationDispatcher,
}

impl ExpirationSweepHandler {
    /// Creates the handler over its collaborators.
    pub fn new(
        memberships: Arc<dyn MembershipStore>,
        users: Arc<dyn UserDirectory>,
        notifier: NotificationDispatcher,
    ) -> Self {
        Self {
            memberships,
            users,
            notifier,
        }
    }

    /// Demotes every member whose expiration is strictly before `now`.
    ///
    /// Returns the number of members deactivated in this run.
    pub async fn sweep(&self, now: Timestamp) -> usize {
        let expired = match self.memberships.find_expired(now).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(error = %e, "Expiration sweep could not load expired members");
                return 0;
            }
        };

        let mut deactivated = 0;
        for mut record in expired {
            let user_id = record.user_id;
            record.expire(now);

            if let Err(e) = self.memberships.upsert(&record).await {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to demote expired member; skipping");
                continue;
            }
            deactivated += 1;

            match self.users.find(user_id).await {
                Ok(Some(user)) => self.notifier.send_expiration_notice(&user).await,
                Ok(None) => {
                    tracing::debug!(user_id = %user_id, "No account for expired member; no notice sent")
                }
                Err(e) => {
                    tracing::warn!(user_id = %user_id, error = %e, "User lookup failed; no notice sent")
                }
            }
        }

        tracing::info!(deactivated, "Expiration sweep finished");
        deactivated
    }
}
