//! PostgreSQL implementation of MembershipStore.
//!
//! Persists membership records in the `premium_memberships` table,
//! keyed by user id; `upsert` is an `ON CONFLICT` update so first
//! grants and renewals go through the same statement.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::membership::MembershipRecord;
use crate::ports::MembershipStore;

/// PostgreSQL implementation of the MembershipStore port.
pub struct PostgresMembershipStore {
    pool: PgPool,
}

impl PostgresMembershipStore {
    /// Creates a new store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a membership record.
#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    user_id: i64,
    is_member: bool,
    activation_at: Option<DateTime<Utc>>,
    expiration_at: Option<DateTime<Utc>>,
    last_expired_at: Option<DateTime<Utc>>,
}

impl TryFrom<MembershipRow> for MembershipRecord {
    type Error = DomainError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        let user_id = u64::try_from(row.user_id).map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid user_id: {}", row.user_id),
            )
        })?;

        Ok(MembershipRecord {
            user_id: UserId::new(user_id),
            is_member: row.is_member,
            activation_at: row.activation_at.map(Timestamp::from_datetime),
            expiration_at: row.expiration_at.map(Timestamp::from_datetime),
            last_expired_at: row.last_expired_at.map(Timestamp::from_datetime),
        })
    }
}

fn user_id_as_i64(user_id: UserId) -> Result<i64, DomainError> {
    i64::try_from(user_id.value()).map_err(|_| {
        DomainError::new(
            ErrorCode::ValidationFailed,
            format!("User id out of range: {}", user_id),
        )
    })
}

#[async_trait]
impl MembershipStore for PostgresMembershipStore {
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<MembershipRecord>, DomainError> {
        let row: Option<MembershipRow> = sqlx::query_as(
            r#"
            SELECT user_id, is_member, activation_at, expiration_at, last_expired_at
            FROM premium_memberships
            WHERE user_id = $1
            "#,
        )
        .bind(user_id_as_i64(user_id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find membership: {}", e))
        })?;

        row.map(MembershipRecord::try_from).transpose()
    }

    async fn upsert(&self, record: &MembershipRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO premium_memberships (
                user_id, is_member, activation_at, expiration_at, last_expired_at
            ) VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                is_member = EXCLUDED.is_member,
                activation_at = EXCLUDED.activation_at,
                expiration_at = EXCLUDED.expiration_at,
                last_expired_at = EXCLUDED.last_expired_at
            "#,
        )
        .bind(user_id_as_i64(record.user_id)?)
        .bind(record.is_member)
        .bind(record.activation_at.map(|ts| *ts.as_datetime()))
        .bind(record.expiration_at.map(|ts| *ts.as_datetime()))
        .bind(record.last_expired_at.map(|ts| *ts.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save membership: {}", e))
        })?;

        Ok(())
    }

    async fn find_expired(&self, now: Timestamp) -> Result<Vec<MembershipRecord>, DomainError> {
        let rows: Vec<MembershipRow> = sqlx::query_as(
            r#"
            SELECT user_id, is_member, activation_at, expiration_at, last_expired_at
            FROM premium_memberships
            WHERE is_member = TRUE
              AND expiration_at IS NOT NULL
              AND expiration_at < $1
            ORDER BY expiration_at ASC
            "#,
        )
        .bind(now.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find expired memberships: {}", e),
            )
        })?;

        rows.into_iter().map(MembershipRecord::try_from).collect()
    }
}
