//! Authenticated caller identity for permission-gated admin actions.

use serde::{Deserialize, Serialize};

use super::UserId;

/// The identity behind a manual admin action.
///
/// The platform authenticates the caller; this type only carries the
/// already-resolved capability the premium actions care about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Platform account performing the action.
    pub user_id: UserId,

    /// Whether the account holds the store-manager capability.
    pub can_manage_store: bool,
}

impl Actor {
    /// Creates an actor with the store-manager capability.
    pub fn store_manager(user_id: UserId) -> Self {
        Self {
            user_id,
            can_manage_store: true,
        }
    }

    /// Creates an actor without elevated capabilities.
    pub fn customer(user_id: UserId) -> Self {
        Self {
            user_id,
            can_manage_store: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_manager_has_capability() {
        let actor = Actor::store_manager(UserId::new(1));
        assert!(actor.can_manage_store);
    }

    #[test]
    fn customer_lacks_capability() {
        let actor = Actor::customer(UserId::new(2));
        assert!(!actor.can_manage_store);
    }
}
