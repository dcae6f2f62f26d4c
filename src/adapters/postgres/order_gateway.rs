//! PostgreSQL implementation of OrderGateway.
//!
//! Reads the platform's `orders` and `order_items` tables and owns the
//! two premium writes: the grant-once flag column and rows in
//! `order_notes`.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, OrderId, ProductId, UserId};
use crate::ports::{Order, OrderGateway};

/// PostgreSQL implementation of the OrderGateway port.
pub struct PostgresOrderGateway {
    pool: PgPool,
}

impl PostgresOrderGateway {
    /// Creates a new gateway over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    user_id: Option<i64>,
    premium_granted: bool,
}

fn order_id_as_i64(order_id: OrderId) -> Result<i64, DomainError> {
    i64::try_from(order_id.value()).map_err(|_| {
        DomainError::new(
            ErrorCode::ValidationFailed,
            format!("Order id out of range: {}", order_id),
        )
    })
}

#[async_trait]
impl OrderGateway for PostgresOrderGateway {
    async fn find(&self, order_id: OrderId) -> Result<Option<Order>, DomainError> {
        let id = order_id_as_i64(order_id)?;

        let row: Option<OrderRow> = sqlx::query_as(
            r#"
            SELECT user_id, premium_granted
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find order: {}", e))
        })?;

        let row = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let item_ids: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT product_id
            FROM order_items
            WHERE order_id = $1
            ORDER BY product_id ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to load order items: {}", e),
            )
        })?;

        let user_id = match row.user_id {
            Some(raw) => Some(UserId::new(u64::try_from(raw).map_err(|_| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", raw))
            })?)),
            None => None,
        };

        let product_ids = item_ids
            .into_iter()
            .map(|raw| {
                u64::try_from(raw).map(ProductId::new).map_err(|_| {
                    DomainError::new(ErrorCode::DatabaseError, format!("Invalid product_id: {}", raw))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Order {
            id: order_id,
            user_id,
            product_ids,
            premium_granted: row.premium_granted,
        }))
    }

    async fn mark_premium_granted(&self, order_id: OrderId) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET premium_granted = TRUE
            WHERE id = $1
            "#,
        )
        .bind(order_id_as_i64(order_id)?)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to mark order: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::OrderNotFound, "Order not found"));
        }

        Ok(())
    }

    async fn add_note(&self, order_id: OrderId, note: &str) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO order_notes (order_id, note, created_at)
            VALUES ($1, $2, NOW())
            "#,
        )
        .bind(order_id_as_i64(order_id)?)
        .bind(note)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to add order note: {}", e))
        })?;

        Ok(())
    }
}
