//! PostgreSQL implementation of UserDirectory.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{UserAccount, UserDirectory};

/// PostgreSQL implementation of the UserDirectory port.
///
/// Read-only view over the platform's `users` table.
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    /// Creates a new directory over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    display_name: String,
    email: String,
}

impl TryFrom<UserRow> for UserAccount {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = u64::try_from(row.id).map_err(|_| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user id: {}", row.id))
        })?;

        Ok(UserAccount {
            id: UserId::new(id),
            display_name: row.display_name,
            email: row.email,
        })
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find(&self, user_id: UserId) -> Result<Option<UserAccount>, DomainError> {
        let id = i64::try_from(user_id.value()).map_err(|_| {
            DomainError::new(
                ErrorCode::ValidationFailed,
                format!("User id out of range: {}", user_id),
            )
        })?;

        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, display_name, email
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find user: {}", e))
        })?;

        row.map(UserAccount::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_row_conversion_maps_fields() {
        let row = UserRow {
            id: 42,
            display_name: "Alex".to_string(),
            email: "alex@example.com".to_string(),
        };

        let account = UserAccount::try_from(row).unwrap();
        assert_eq!(account.id, UserId::new(42));
        assert_eq!(account.email, "alex@example.com");
    }

    #[test]
    fn user_row_conversion_rejects_negative_id() {
        let row = UserRow {
            id: -5,
            display_name: String::new(),
            email: String::new(),
        };

        assert!(UserAccount::try_from(row).is_err());
    }
}
