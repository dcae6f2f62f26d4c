//! Mailer port.
//!
//! Outbound email is fire-and-forget from the caller's perspective:
//! one attempt, no retry queue. Failures surface as `MailerError` so
//! the dispatcher can log them, but they never propagate further.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the email transport.
#[derive(Debug, Error)]
pub enum MailerError {
    /// Could not reach the provider at all.
    #[error("Email transport error: {0}")]
    Transport(String),

    /// The provider refused the message.
    #[error("Email rejected by provider: {0}")]
    Rejected(String),
}

/// A rendered HTML email ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    /// Recipient address.
    pub to: String,

    /// Subject line.
    pub subject: String,

    /// HTML body.
    pub html_body: String,
}

/// Port over the outbound email transport.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends one email. A single attempt; the caller decides what a
    /// failure means.
    async fn send(&self, email: OutboundEmail) -> Result<(), MailerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailer_is_object_safe() {
        fn _accepts_dyn(_mailer: &dyn Mailer) {}
    }

    #[test]
    fn mailer_error_displays_reason() {
        let err = MailerError::Rejected("invalid recipient".to_string());
        assert_eq!(format!("{}", err), "Email rejected by provider: invalid recipient");
    }
}
