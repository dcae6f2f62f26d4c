//! Order gateway port.
//!
//! Orders belong to the commerce platform; this crate only reads them
//! and owns two narrow writes: the grant-once flag and a human-readable
//! order note.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, OrderId, ProductId, UserId};

/// Read-only view of a platform order, reduced to what the grant
/// workflow needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Platform order identifier.
    pub id: OrderId,

    /// Purchasing account; `None` for guest checkout.
    pub user_id: Option<UserId>,

    /// Product ids of the order's line items.
    pub product_ids: Vec<ProductId>,

    /// Grant-once flag: once true, the grant workflow is a permanent
    /// no-op for this order.
    pub premium_granted: bool,
}

impl Order {
    /// First line item whose product id is in `allowlist`, if any.
    pub fn first_qualifying_item(&self, allowlist: &HashSet<ProductId>) -> Option<ProductId> {
        self.product_ids
            .iter()
            .copied()
            .find(|id| allowlist.contains(id))
    }
}

/// Port over the platform's order storage.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Resolve an order by id. Returns `None` when the platform does
    /// not know the order.
    async fn find(&self, order_id: OrderId) -> Result<Option<Order>, DomainError>;

    /// Persist the grant-once flag against the order.
    async fn mark_premium_granted(&self, order_id: OrderId) -> Result<(), DomainError>;

    /// Attach a human-readable note to the order's history.
    async fn add_note(&self, order_id: OrderId, note: &str) -> Result<(), DomainError>;
}
