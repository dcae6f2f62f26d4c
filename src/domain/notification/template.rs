//! Email template rendering.
//!
//! The confirmation body is either the admin-configured template with
//! three named placeholders substituted, or a built-in default. The
//! expiration notice is fixed-format and takes no customization.

use crate::domain::foundation::{DiscountRate, Timestamp};

/// Subject used when no custom confirmation subject is configured.
pub const DEFAULT_CONFIRMATION_SUBJECT: &str = "Your Premium membership is active!";

/// Subject of the expiration notice.
pub const EXPIRATION_SUBJECT: &str = "Your Premium membership has expired";

/// Renders the confirmation email body.
///
/// A custom template may use `{user_name}`, `{expiration_date}` and
/// `{discount_rate}`; its newlines become `<br>` since the message is
/// sent as HTML. Without a custom template the built-in body is used.
pub fn render_confirmation_body(
    custom_template: Option<&str>,
    user_name: &str,
    expires_at: Timestamp,
    rate: DiscountRate,
) -> String {
    let formatted_date = expires_at.format_day_month_year();

    match custom_template {
        Some(template) => template
            .replace("{user_name}", user_name)
            .replace("{expiration_date}", &formatted_date)
            .replace("{discount_rate}", &rate.to_string())
            .replace('\n', "<br>"),
        None => format!(
            "Hello {user_name},<br><br>\
             Congratulations! Your Premium membership is now active.<br><br>\
             You get {rate}% off our entire catalog, on top of any running promotion.<br><br>\
             Your membership is valid until {formatted_date}.<br><br>\
             Enjoy it right away in our shop!<br><br>\
             Best regards,<br>The store team"
        ),
    }
}

/// Renders the fixed-format expiration notice body.
pub fn render_expiration_body(user_name: &str) -> String {
    format!(
        "Hello {user_name},<br><br>\
         Your Premium membership has expired.<br><br>\
         You can renew it in our shop.<br><br>\
         Thank you!"
    )
}
