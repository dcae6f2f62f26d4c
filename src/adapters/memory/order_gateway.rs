//! In-memory order gateway for testing.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, OrderId};
use crate::ports::{Order, OrderGateway};

/// In-memory order gateway.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. This is acceptable
/// for test code but this adapter should NOT be used in production.
#[derive(Default)]
pub struct InMemoryOrderGateway {
    orders: RwLock<HashMap<OrderId, Order>>,
    notes: RwLock<Vec<(OrderId, String)>>,
}

impl InMemoryOrderGateway {
    /// Creates an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an order (for test setup).
    pub fn insert(&self, order: Order) {
        self.orders
            .write()
            .expect("InMemoryOrderGateway: orders lock poisoned")
            .insert(order.id, order);
    }

    /// Notes recorded against an order (for test assertions).
    pub fn notes_for(&self, order_id: OrderId) -> Vec<String> {
        self.notes
            .read()
            .expect("InMemoryOrderGateway: notes lock poisoned")
            .iter()
            .filter(|(id, _)| *id == order_id)
            .map(|(_, note)| note.clone())
            .collect()
    }
}

#[async_trait]
impl OrderGateway for InMemoryOrderGateway {
    async fn find(&self, order_id: OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self
            .orders
            .read()
            .expect("InMemoryOrderGateway: orders lock poisoned")
            .get(&order_id)
            .cloned())
    }

    async fn mark_premium_granted(&self, order_id: OrderId) -> Result<(), DomainError> {
        let mut orders = self
            .orders
            .write()
            .expect("InMemoryOrderGateway: orders lock poisoned");
        match orders.get_mut(&order_id) {
            Some(order) => {
                order.premium_granted = true;
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::OrderNotFound, "Order not found")),
        }
    }

    async fn add_note(&self, order_id: OrderId, note: &str) -> Result<(), DomainError> {
        self.notes
            .write()
            .expect("InMemoryOrderGateway: notes lock poisoned")
            .push((order_id, note.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ProductId, UserId};

    fn order(id: u64) -> Order {
        Order {
            id: OrderId::new(id),
            user_id: Some(UserId::new(42)),
            product_ids: vec![ProductId::new(12)],
            premium_granted: false,
        }
    }

    #[tokio::test]
    async fn mark_premium_granted_flips_flag() {
        let gateway = InMemoryOrderGateway::new();
        gateway.insert(order(1001));

        gateway.mark_premium_granted(OrderId::new(1001)).await.unwrap();

        let found = gateway.find(OrderId::new(1001)).await.unwrap().unwrap();
        assert!(found.premium_granted);
    }

    #[tokio::test]
    async fn mark_premium_granted_unknown_order_errors() {
        let gateway = InMemoryOrderGateway::new();
        let result = gateway.mark_premium_granted(OrderId::new(9)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn notes_accumulate_per_order() {
        let gateway = InMemoryOrderGateway::new();
        gateway.insert(order(1001));

        gateway.add_note(OrderId::new(1001), "first").await.unwrap();
        gateway.add_note(OrderId::new(1001), "second").await.unwrap();

        assert_eq!(gateway.notes_for(OrderId::new(1001)), vec!["first", "second"]);
    }
}
