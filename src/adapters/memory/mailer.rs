//! Capturing mailer for testing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{Mailer, MailerError, OutboundEmail};

/// Mailer that records sent messages instead of delivering them.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. This is acceptable
/// for test code but this adapter should NOT be used in production.
#[derive(Default)]
pub struct CapturingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    fail_next: AtomicBool,
}

impl CapturingMailer {
    /// Creates an empty capturing mailer.
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages sent so far (for test assertions).
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent
            .lock()
            .expect("CapturingMailer: sent lock poisoned")
            .clone()
    }

    /// Makes the next `send` call fail with a transport error.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailerError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(MailerError::Transport("Injected mailer failure".to_string()));
        }
        self.sent
            .lock()
            .expect("CapturingMailer: sent lock poisoned")
            .push(email);
        Ok(())
    }
}
