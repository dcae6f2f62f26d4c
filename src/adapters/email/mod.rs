//! Email adapters.

mod resend_mailer;

pub use resend_mailer::ResendMailer;
