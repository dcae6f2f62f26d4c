//! Notification domain module.
//!
//! Renders and dispatches the membership confirmation and expiration
//! emails. Sending is best-effort: failures are logged and swallowed so
//! a mail outage can never roll back a grant or abort a sweep.

mod dispatcher;
mod template;

pub use dispatcher::NotificationDispatcher;
pub use template::{
    render_confirmation_body, render_expiration_body, DEFAULT_CONFIRMATION_SUBJECT,
    EXPIRATION_SUBJECT,
};
