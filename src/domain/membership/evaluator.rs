//! Active-membership predicate.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::MembershipStore;

/// Store-backed answer to "is this user an active member right now".
///
/// Called on every price computation, so it stays a single keyed lookup
/// plus the pure [`MembershipRecord::is_active_at`] check. It never
/// fails: a missing record or a store error both evaluate to inactive,
/// so pricing degrades to the non-member price instead of breaking the
/// surrounding page render.
///
/// [`MembershipRecord::is_active_at`]: crate::domain::membership::MembershipRecord::is_active_at
#[derive(Clone)]
pub struct MembershipEvaluator {
    store: Arc<dyn MembershipStore>,
}

impl MembershipEvaluator {
    /// Creates an evaluator over the given store.
    pub fn new(store: Arc<dyn MembershipStore>) -> Self {
        Self { store }
    }

    /// True iff `user_id` holds an active, unexpired membership at `now`.
    pub async fn is_active(&self, user_id: UserId, now: Timestamp) -> bool {
        match self.store.find_by_user(user_id).await {
            Ok(Some(record)) => record.is_active_at(now),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    error = %e,
                    "Membership lookup failed; treating user as inactive"
                );
                false
            }
        }
    }
}
