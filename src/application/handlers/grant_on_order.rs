//! Grant workflow triggered by order lifecycle events.
//!
//! Three distinct platform events can fire for one logical order, in
//! any order and more than once, so the workflow must tolerate
//! duplicate invocation. The persisted `premium_granted` flag on the
//! order is the idempotency short-circuit; the check-then-set window
//! between reading and writing it is a known, accepted race (two
//! near-simultaneous triggers can both pass the check, which only
//! re-extends the expiration and sends one extra email).
//!
//! No failure here may abort the surrounding order-processing pipeline:
//! every error is caught, logged, and reported as an outcome.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, OrderId, Timestamp};
use crate::domain::membership::{MembershipRecord, PremiumPolicy};
use crate::domain::notification::NotificationDispatcher;
use crate::ports::{MembershipStore, OrderGateway, UserDirectory};

/// The order lifecycle events bound to the grant workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderLifecycleEvent {
    /// Order moved to completed.
    Completed,

    /// Payment confirmed by the gateway.
    PaymentComplete,

    /// Order moved to processing.
    Processing,
}

/// What one invocation of the grant workflow did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantOutcome {
    /// Membership activated until `expires_at`; order marked.
    Granted {
        /// New expiration of the membership.
        expires_at: Timestamp,
    },

    /// Order already processed; nothing mutated, nothing sent.
    AlreadyGranted,

    /// No premium products configured; feature disabled by design.
    NotConfigured,

    /// No line item matches the premium allowlist.
    NoQualifyingItem,

    /// Guest checkout; guests cannot receive membership.
    GuestOrder,

    /// The platform does not know this order.
    OrderNotFound,

    /// An internal error occurred after the checks; logged, not raised.
    Failed,
}

/// Handler for the order-event grant workflow.
pub struct GrantOnOrderHandler {
    orders: Arc<dyn OrderGateway>,
    memberships: Arc<dyn MembershipStore>,
    users: Arc<dyn UserDirectory>,
    notifier: NotificationDispatcher,
    policy: PremiumPolicy,
}

impl GrantOnOrderHandler {
    /// Creates the handler over its collaborators.
    pub fn new(
        orders: Arc<dyn OrderGateway>,
        memberships: Arc<dyn MembershipStore>,
        users: Arc<dyn UserDirectory>,
        notifier: NotificationDispatcher,
        policy: PremiumPolicy,
    ) -> Self {
        Self {
            orders,
            memberships,
            users,
            notifier,
            policy,
        }
    }

    /// Entry point for all three order-status hooks.
    pub async fn on_order_event(&self, event: OrderLifecycleEvent, order_id: OrderId) -> GrantOutcome {
        tracing::debug!(order_id = %order_id, ?event, "Order event received");
        self.grant_at(order_id, Timestamp::now()).await
    }

    /// Runs the workflow at an explicit instant.
    ///
    /// The manual order action uses this directly; tests use it to pin
    /// the clock.
    pub async fn grant_at(&self, order_id: OrderId, now: Timestamp) -> GrantOutcome {
        match self.try_grant(order_id, now).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(order_id = %order_id, error = %e, "Grant workflow failed");
                GrantOutcome::Failed
            }
        }
    }

    async fn try_grant(&self, order_id: OrderId, now: Timestamp) -> Result<GrantOutcome, DomainError> {
        let order = match self.orders.find(order_id).await? {
            Some(order) => order,
            None => {
                tracing::warn!(order_id = %order_id, "Order not found; skipping grant");
                return Ok(GrantOutcome::OrderNotFound);
            }
        };

        if order.premium_granted {
            tracing::debug!(order_id = %order_id, "Premium already granted for order");
            return Ok(GrantOutcome::AlreadyGranted);
        }

        if !self.policy.is_configured() {
            tracing::debug!("No premium products configured; grant workflow disabled");
            return Ok(GrantOutcome::NotConfigured);
        }

        let qualifying = match order.first_qualifying_item(&self.policy.premium_product_ids) {
            Some(product_id) => product_id,
            None => {
                tracing::debug!(order_id = %order_id, "No premium product in order");
                return Ok(GrantOutcome::NoQualifyingItem);
            }
        };

        let user_id = match order.user_id {
            Some(user_id) => user_id,
            None => {
                tracing::debug!(order_id = %order_id, "Guest order; no membership granted");
                return Ok(GrantOutcome::GuestOrder);
            }
        };

        let mut record = self
            .memberships
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| MembershipRecord::new(user_id));

        let expires_at = self.policy.expiration_from(now);
        record.grant(now, expires_at);
        self.memberships.upsert(&record).await?;

        self.orders.mark_premium_granted(order_id).await?;

        // Notification and order note are best-effort from here on; the
        // grant itself is already persisted.
        match self.users.find(user_id).await {
            Ok(Some(user)) => self.notifier.send_confirmation(&user, expires_at).await,
            Ok(None) => {
                tracing::warn!(user_id = %user_id, "User record missing; skipping confirmation")
            }
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "User lookup failed; skipping confirmation")
            }
        }

        let note = format!(
            "Premium membership activated until {}",
            expires_at.format_day_month_year()
        );
        if let Err(e) = self.orders.add_note(order_id, &note).await {
            tracing::warn!(order_id = %order_id, error = %e, "Failed to add order note");
        }

        tracing::info!(
            order_id = %order_id,
            user_id = %user_id,
            product_id = %qualifying,
            expires_at = %expires_at.format_day_month_year(),
            "Premium membership granted"
        );

        Ok(GrantOutcome::Granted { expires_at })
    }
}
