//! Notification dispatcher.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::membership::PremiumPolicy;
use crate::ports::{Mailer, OutboundEmail, UserAccount};

use super::template::{
    render_confirmation_body, render_expiration_body, DEFAULT_CONFIRMATION_SUBJECT,
    EXPIRATION_SUBJECT,
};

/// Renders and sends the membership emails.
///
/// One attempt per message, no retry queue. A send failure is logged
/// and swallowed: the grant and the sweep both treat notification as
/// strictly best-effort.
#[derive(Clone)]
pub struct NotificationDispatcher {
    mailer: Arc<dyn Mailer>,
    policy: PremiumPolicy,
}

impl NotificationDispatcher {
    /// Creates a dispatcher over the given transport and policy.
    pub fn new(mailer: Arc<dyn Mailer>, policy: PremiumPolicy) -> Self {
        Self { mailer, policy }
    }

    /// Sends the activation confirmation with the new expiration date.
    pub async fn send_confirmation(&self, user: &UserAccount, expires_at: Timestamp) {
        let subject = self
            .policy
            .email_subject
            .clone()
            .unwrap_or_else(|| DEFAULT_CONFIRMATION_SUBJECT.to_string());
        let html_body = render_confirmation_body(
            self.policy.email_body.as_deref(),
            &user.display_name,
            expires_at,
            self.policy.discount_rate,
        );

        self.dispatch(user, subject, html_body, "confirmation").await;
    }

    /// Sends the expiration notice, if the policy enables it.
    pub async fn send_expiration_notice(&self, user: &UserAccount) {
        if !self.policy.send_expiration_email {
            tracing::debug!(user_id = %user.id, "Expiration email disabled; skipping notice");
            return;
        }

        let html_body = render_expiration_body(&user.display_name);
        self.dispatch(user, EXPIRATION_SUBJECT.to_string(), html_body, "expiration")
            .await;
    }

    async fn dispatch(&self, user: &UserAccount, subject: String, html_body: String, kind: &str) {
        let email = OutboundEmail {
            to: user.email.clone(),
            subject,
            html_body,
        };

        match self.mailer.send(email).await {
            Ok(()) => {
                tracing::info!(user_id = %user.id, kind, "Premium notification sent");
            }
            Err(e) => {
                tracing::warn!(
                    user_id = %user.id,
                    kind,
                    error = %e,
                    "Premium notification failed; continuing without it"
                );
            }
        }
    }
}
