//! In-memory membership store for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::membership::MembershipRecord;
use crate::ports::MembershipStore;

/// In-memory membership store.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. This is acceptable
/// for test code but this adapter should NOT be used in production.
#[derive(Default)]
pub struct InMemoryMembershipStore {
    records: RwLock<HashMap<UserId, MembershipRecord>>,
    fail_next_find: AtomicBool,
}

impl InMemoryMembershipStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a record directly (for test setup).
    pub fn insert(&self, record: MembershipRecord) {
        self.records
            .write()
            .expect("InMemoryMembershipStore: records lock poisoned")
            .insert(record.user_id, record);
    }

    /// Makes the next `find_by_user` call fail with a database error.
    pub fn fail_next_find(&self) {
        self.fail_next_find.store(true, Ordering::SeqCst);
    }

    /// Returns the current record for a user (for test assertions).
    pub fn record(&self, user_id: UserId) -> Option<MembershipRecord> {
        self.records
            .read()
            .expect("InMemoryMembershipStore: records lock poisoned")
            .get(&user_id)
            .cloned()
    }
}

#[async_trait]
impl MembershipStore for InMemoryMembershipStore {
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<MembershipRecord>, DomainError> {
        if self.fail_next_find.swap(false, Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Injected store failure",
            ));
        }
        Ok(self.record(user_id))
    }

    async fn upsert(&self, record: &MembershipRecord) -> Result<(), DomainError> {
        self.insert(record.clone());
        Ok(())
    }

    async fn find_expired(&self, now: Timestamp) -> Result<Vec<MembershipRecord>, DomainError> {
        Ok(self
            .records
            .read()
            .expect("InMemoryMembershipStore: records lock poisoned")
            .values()
            .filter(|record| record.is_expired_at(now))
            .cloned()
            .collect())
    }
}
