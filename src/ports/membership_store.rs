//! Membership store port.
//!
//! Defines the contract for persisting and retrieving per-user
//! membership records. Implementations handle the actual storage.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::membership::MembershipRecord;

/// Persistence port for membership records.
///
/// Each user has at most one record, keyed by `user_id`. Records are
/// created implicitly on first grant via `upsert`.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Find the record for a user.
    ///
    /// Returns `None` if the user has no membership history.
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<MembershipRecord>, DomainError>;

    /// Insert or replace the record for `record.user_id`.
    async fn upsert(&self, record: &MembershipRecord) -> Result<(), DomainError>;

    /// All members with `is_member` set whose expiration is strictly
    /// before `now`.
    ///
    /// This is the expiration sweep's selection predicate; members it
    /// has already demoted no longer match, which is what makes the
    /// sweep safe to re-run.
    async fn find_expired(&self, now: Timestamp) -> Result<Vec<MembershipRecord>, DomainError>;
}
