//! User directory port.
//!
//! Account storage is owned by the platform; notifications only need a
//! display name and an email address.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, UserId};

/// The slice of a platform account this crate cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Platform account identifier.
    pub id: UserId,

    /// Name used in customer-facing text.
    pub display_name: String,

    /// Registered email address.
    pub email: String,
}

/// Port over the platform's account storage.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve an account by id. Returns `None` for unknown users.
    async fn find(&self, user_id: UserId) -> Result<Option<UserAccount>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_directory_is_object_safe() {
        fn _accepts_dyn(_directory: &dyn UserDirectory) {}
    }
}
