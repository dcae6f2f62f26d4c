//! In-memory user directory for testing.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{UserAccount, UserDirectory};

/// In-memory user directory.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. This is acceptable
/// for test code but this adapter should NOT be used in production.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<UserId, UserAccount>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an account (for test setup).
    pub fn insert(&self, account: UserAccount) {
        self.users
            .write()
            .expect("InMemoryUserDirectory: users lock poisoned")
            .insert(account.id, account);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find(&self, user_id: UserId) -> Result<Option<UserAccount>, DomainError> {
        Ok(self
            .users
            .read()
            .expect("InMemoryUserDirectory: users lock poisoned")
            .get(&user_id)
            .cloned())
    }
}
