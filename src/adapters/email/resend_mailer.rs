//! Resend email transport.
//!
//! Implements the `Mailer` port over the Resend HTTP API. One request
//! per message, no retries; the API key stays wrapped in
//! `secrecy::SecretString` and never appears in logs or errors.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::config::EmailConfig;
use crate::ports::{Mailer, MailerError, OutboundEmail};

/// Resend transport for outbound membership emails.
pub struct ResendMailer {
    api_key: SecretString,
    from_header: String,
    api_base_url: String,
    http_client: reqwest::Client,
}

impl ResendMailer {
    /// Creates a mailer from the email configuration.
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            api_key: config.resend_api_key.clone(),
            from_header: config.from_header(),
            api_base_url: "https://api.resend.com".to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailerError> {
        let payload = serde_json::json!({
            "from": self.from_header,
            "to": [email.to],
            "subject": email.subject,
            "html": email.html_body,
        });

        let response = self
            .http_client
            .post(format!("{}/emails", self.api_base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailerError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Resend rejected message");
            Err(MailerError::Rejected(format!("{}: {}", status, body)))
        }
    }
}
