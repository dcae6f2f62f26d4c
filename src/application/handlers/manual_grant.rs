//! Manual admin actions: grant by order, grant/revoke by profile.
//!
//! All three are permission-gated on the store-manager capability and
//! verified before any mutation. They return a human-readable message
//! for the admin UI that invokes them.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{Actor, DomainError, ErrorCode, OrderId, Timestamp, UserId};
use crate::domain::membership::{MembershipRecord, PremiumPolicy};
use crate::ports::MembershipStore;

use super::grant_on_order::{GrantOnOrderHandler, GrantOutcome};

/// Result of a manual admin action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualActionResult {
    /// Whether the action achieved (or had already achieved) its goal.
    pub success: bool,

    /// Message for the admin performing the action.
    pub message: String,
}

impl ManualActionResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

fn require_store_manager(actor: &Actor) -> Result<(), DomainError> {
    if actor.can_manage_store {
        Ok(())
    } else {
        Err(DomainError::new(
            ErrorCode::PermissionDenied,
            "Store-manager capability required",
        ))
    }
}

/// Command to force the grant workflow for an order.
#[derive(Debug, Clone)]
pub struct ManualOrderGrantCommand {
    pub order_id: OrderId,
    pub actor: Actor,
}

/// Handler for the order-page "activate premium manually" action.
///
/// Runs the exact same workflow as the order-status hooks, so the
/// idempotency flag and all eligibility checks apply unchanged.
pub struct GrantOrderManuallyHandler {
    workflow: Arc<GrantOnOrderHandler>,
}

impl GrantOrderManuallyHandler {
    pub fn new(workflow: Arc<GrantOnOrderHandler>) -> Self {
        Self { workflow }
    }

    pub async fn handle(&self, cmd: ManualOrderGrantCommand) -> Result<ManualActionResult, DomainError> {
        require_store_manager(&cmd.actor)?;

        tracing::info!(
            order_id = %cmd.order_id,
            actor = %cmd.actor.user_id,
            "Manual premium activation triggered"
        );

        let outcome = self.workflow.grant_at(cmd.order_id, Timestamp::now()).await;
        Ok(describe_outcome(outcome))
    }
}

fn describe_outcome(outcome: GrantOutcome) -> ManualActionResult {
    match outcome {
        GrantOutcome::Granted { expires_at } => ManualActionResult::ok(format!(
            "Premium membership activated until {}",
            expires_at.format_day_month_year()
        )),
        GrantOutcome::AlreadyGranted => {
            ManualActionResult::ok("Premium already activated for this order")
        }
        GrantOutcome::NotConfigured => {
            ManualActionResult::failed("No premium products configured in settings")
        }
        GrantOutcome::NoQualifyingItem => {
            ManualActionResult::failed("Order contains no premium product")
        }
        GrantOutcome::GuestOrder => {
            ManualActionResult::failed("Guest orders cannot receive a membership")
        }
        GrantOutcome::OrderNotFound => ManualActionResult::failed("Order not found"),
        GrantOutcome::Failed => ManualActionResult::failed("Activation failed; check the logs"),
    }
}

/// Command to grant membership from the user profile screen.
///
/// `expiration_date` is an optional calendar date (`YYYY-MM-DD`)
/// interpreted as end-of-day; absent, the configured duration applies.
#[derive(Debug, Clone)]
pub struct GrantProfileCommand {
    pub user_id: UserId,
    pub expiration_date: Option<String>,
    pub actor: Actor,
}

/// Handler for the profile-level manual grant.
pub struct GrantProfileHandler {
    memberships: Arc<dyn MembershipStore>,
    policy: PremiumPolicy,
}

impl GrantProfileHandler {
    pub fn new(memberships: Arc<dyn MembershipStore>, policy: PremiumPolicy) -> Self {
        Self { memberships, policy }
    }

    pub async fn handle(&self, cmd: GrantProfileCommand) -> Result<ManualActionResult, DomainError> {
        require_store_manager(&cmd.actor)?;

        let now = Timestamp::now();
        let expires_at = match cmd.expiration_date.as_deref() {
            Some(raw) => parse_expiration_date(raw)?,
            None => self.policy.expiration_from(now),
        };

        let mut record = self
            .memberships
            .find_by_user(cmd.user_id)
            .await?
            .unwrap_or_else(|| MembershipRecord::new(cmd.user_id));

        // A manual grant is an adjustment, not a new purchase: an
        // existing activation date stays on record.
        record.grant_preserving_activation(now, expires_at);
        self.memberships.upsert(&record).await?;

        tracing::info!(
            user_id = %cmd.user_id,
            actor = %cmd.actor.user_id,
            expires_at = %expires_at.format_day_month_year(),
            "Premium membership granted manually"
        );

        Ok(ManualActionResult::ok(format!(
            "Premium membership active until {}",
            expires_at.format_day_month_year()
        )))
    }
}

fn parse_expiration_date(raw: &str) -> Result<Timestamp, DomainError> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        DomainError::validation(
            "expiration_date",
            format!("Invalid expiration date '{}': expected YYYY-MM-DD", raw),
        )
    })?;
    Ok(Timestamp::end_of_day(date))
}

/// Command to revoke membership from the user profile screen.
#[derive(Debug, Clone)]
pub struct RevokeProfileCommand {
    pub user_id: UserId,
    pub actor: Actor,
}

/// Handler for the profile-level manual revoke.
pub struct RevokeProfileHandler {
    memberships: Arc<dyn MembershipStore>,
}

impl RevokeProfileHandler {
    pub fn new(memberships: Arc<dyn MembershipStore>) -> Self {
        Self { memberships }
    }

    pub async fn handle(&self, cmd: RevokeProfileCommand) -> Result<ManualActionResult, DomainError> {
        require_store_manager(&cmd.actor)?;

        let mut record = match self.memberships.find_by_user(cmd.user_id).await? {
            Some(record) => record,
            None => return Ok(ManualActionResult::failed("User has no membership on record")),
        };

        // Expiration stays in place as history; only the role flag goes.
        record.revoke();
        self.memberships.upsert(&record).await?;

        tracing::info!(
            user_id = %cmd.user_id,
            actor = %cmd.actor.user_id,
            "Premium membership revoked manually"
        );

        Ok(ManualActionResult::ok("Premium membership revoked"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        CapturingMailer, InMemoryMembershipStore, InMemoryOrderGateway, InMemoryUserDirectory,
    };
    use crate::domain::foundation::{DiscountRate, ProductId};
    use crate::domain::notification::NotificationDispatcher;
    use crate::ports::Order;

    fn policy() -> PremiumPolicy {
        PremiumPolicy {
            premium_product_ids: [ProductId::new(12)].into_iter().collect(),
            discount_rate: DiscountRate::try_from_percent(8.0).unwrap(),
            duration_days: 365,
            email_subject: None,
            email_body: None,
            send_expiration_email: false,
        }
    }

    fn manager() -> Actor {
        Actor::store_manager(UserId::new(1))
    }

    fn workflow(memberships: Arc<InMemoryMembershipStore>, orders: Arc<InMemoryOrderGateway>) -> Arc<GrantOnOrderHandler> {
        let mailer = Arc::new(CapturingMailer::new());
        let notifier = NotificationDispatcher::new(mailer, policy());
        Arc::new(GrantOnOrderHandler::new(
            orders,
            memberships,
            Arc::new(InMemoryUserDirectory::new()),
            notifier,
            policy(),
        ))
    }

    #[tokio::test]
    async fn order_grant_requires_capability() {
        let memberships = Arc::new(InMemoryMembershipStore::new());
        let orders = Arc::new(InMemoryOrderGateway::new());
        let handler = GrantOrderManuallyHandler::new(workflow(memberships.clone(), orders));

        let result = handler
            .handle(ManualOrderGrantCommand {
                order_id: OrderId::new(1001),
                actor: Actor::customer(UserId::new(7)),
            })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
        assert!(memberships.record(UserId::new(42)).is_none());
    }

    #[tokio::test]
    async fn order_grant_reports_workflow_outcome() {
        let memberships = Arc::new(InMemoryMembershipStore::new());
        let orders = Arc::new(InMemoryOrderGateway::new());
        orders.insert(Order {
            id: OrderId::new(1001),
            user_id: Some(UserId::new(42)),
            product_ids: vec![ProductId::new(12)],
            premium_granted: false,
        });
        let handler = GrantOrderManuallyHandler::new(workflow(memberships.clone(), orders));

        let result = handler
            .handle(ManualOrderGrantCommand {
                order_id: OrderId::new(1001),
                actor: manager(),
            })
            .await
            .unwrap();

        assert!(result.success);
        assert!(result.message.contains("activated until"));
        assert!(memberships.record(UserId::new(42)).unwrap().is_member);
    }

    #[tokio::test]
    async fn order_grant_on_missing_order_fails_with_message() {
        let memberships = Arc::new(InMemoryMembershipStore::new());
        let orders = Arc::new(InMemoryOrderGateway::new());
        let handler = GrantOrderManuallyHandler::new(workflow(memberships, orders));

        let result = handler
            .handle(ManualOrderGrantCommand {
                order_id: OrderId::new(9999),
                actor: manager(),
            })
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.message, "Order not found");
    }

    #[tokio::test]
    async fn profile_grant_uses_explicit_end_of_day_expiration() {
        let memberships = Arc::new(InMemoryMembershipStore::new());
        let handler = GrantProfileHandler::new(memberships.clone(), policy());

        let result = handler
            .handle(GrantProfileCommand {
                user_id: UserId::new(42),
                expiration_date: Some("2027-01-31".to_string()),
                actor: manager(),
            })
            .await
            .unwrap();

        assert!(result.success);
        let record = memberships.record(UserId::new(42)).unwrap();
        assert!(record.is_member);
        let expiration = record.expiration_at.unwrap();
        assert_eq!(expiration.format_day_month_year(), "31/01/2027");
        assert_eq!(
            expiration.as_datetime().format("%H:%M:%S").to_string(),
            "23:59:59"
        );
    }

    #[tokio::test]
    async fn profile_grant_falls_back_to_configured_duration() {
        let memberships = Arc::new(InMemoryMembershipStore::new());
        let handler = GrantProfileHandler::new(memberships.clone(), policy());
        let before = Timestamp::now();

        handler
            .handle(GrantProfileCommand {
                user_id: UserId::new(42),
                expiration_date: None,
                actor: manager(),
            })
            .await
            .unwrap();

        let after = Timestamp::now();
        let expiration = memberships.record(UserId::new(42)).unwrap().expiration_at.unwrap();
        assert!(!expiration.is_before(&before.add_days(365)));
        assert!(!expiration.is_after(&after.add_days(365)));
    }

    #[tokio::test]
    async fn profile_grant_rejects_malformed_date_without_mutation() {
        let memberships = Arc::new(InMemoryMembershipStore::new());
        let handler = GrantProfileHandler::new(memberships.clone(), policy());

        let result = handler
            .handle(GrantProfileCommand {
                user_id: UserId::new(42),
                expiration_date: Some("31/01/2027".to_string()),
                actor: manager(),
            })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.message.contains("YYYY-MM-DD"));
        assert!(memberships.record(UserId::new(42)).is_none());
    }

    #[tokio::test]
    async fn profile_grant_preserves_existing_activation() {
        let memberships = Arc::new(InMemoryMembershipStore::new());
        let first_activation = Timestamp::now().minus_days(100);
        let mut record = MembershipRecord::new(UserId::new(42));
        record.grant(first_activation, first_activation.add_days(365));
        memberships.insert(record);

        let handler = GrantProfileHandler::new(memberships.clone(), policy());
        handler
            .handle(GrantProfileCommand {
                user_id: UserId::new(42),
                expiration_date: Some("2027-06-30".to_string()),
                actor: manager(),
            })
            .await
            .unwrap();

        let record = memberships.record(UserId::new(42)).unwrap();
        assert_eq!(record.activation_at, Some(first_activation));
    }

    #[tokio::test]
    async fn revoke_clears_flag_and_keeps_expiration() {
        let memberships = Arc::new(InMemoryMembershipStore::new());
        let now = Timestamp::now();
        let mut record = MembershipRecord::new(UserId::new(42));
        record.grant(now, now.add_days(365));
        memberships.insert(record);

        let handler = RevokeProfileHandler::new(memberships.clone());
        let result = handler
            .handle(RevokeProfileCommand {
                user_id: UserId::new(42),
                actor: manager(),
            })
            .await
            .unwrap();

        assert!(result.success);
        let record = memberships.record(UserId::new(42)).unwrap();
        assert!(!record.is_member);
        assert_eq!(record.expiration_at, Some(now.add_days(365)));
    }

    #[tokio::test]
    async fn revoke_without_record_reports_failure() {
        let memberships = Arc::new(InMemoryMembershipStore::new());
        let handler = RevokeProfileHandler::new(memberships);

        let result = handler
            .handle(RevokeProfileCommand {
                user_id: UserId::new(42),
                actor: manager(),
            })
            .await
            .unwrap();

        assert!(!result.success);
    }

    #[tokio::test]
    async fn revoke_requires_capability() {
        let memberships = Arc::new(InMemoryMembershipStore::new());
        let handler = RevokeProfileHandler::new(memberships);

        let result = handler
            .handle(RevokeProfileCommand {
                user_id: UserId::new(42),
                actor: Actor::customer(UserId::new(7)),
            })
            .await;

        assert_eq!(result.unwrap_err().code, ErrorCode::PermissionDenied);
    }
}
