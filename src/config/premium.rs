//! Premium feature configuration

use std::collections::HashSet;

use serde::Deserialize;

use crate::domain::foundation::{DiscountRate, ProductId};
use crate::domain::membership::PremiumPolicy;

use super::error::ValidationError;

/// Premium membership settings, written by the store's settings surface.
#[derive(Debug, Clone, Deserialize)]
pub struct PremiumConfig {
    /// Comma-separated ids of the membership products ("5, 12").
    /// Empty means the feature is unconfigured and grants never fire.
    #[serde(default)]
    pub product_ids: String,

    /// Member discount as a percentage of the regular price.
    #[serde(default = "default_discount_rate")]
    pub discount_rate_percent: f64,

    /// Membership duration per purchase, in days.
    #[serde(default = "default_duration_days")]
    pub duration_days: u32,

    /// Custom confirmation email subject.
    #[serde(default)]
    pub email_subject: Option<String>,

    /// Custom confirmation email body; supports `{user_name}`,
    /// `{expiration_date}` and `{discount_rate}`.
    #[serde(default)]
    pub email_body: Option<String>,

    /// Whether the expiration sweep notifies demoted members.
    #[serde(default)]
    pub send_expiration_email: bool,
}

impl PremiumConfig {
    /// Parses the comma-separated product id list, ignoring blanks and
    /// non-numeric entries the way the settings field always has.
    pub fn parsed_product_ids(&self) -> HashSet<ProductId> {
        self.product_ids
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .filter_map(|part| part.parse().ok())
            .map(ProductId::new)
            .collect()
    }

    /// Validate premium configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.discount_rate_percent.is_finite()
            || !(0.0..=100.0).contains(&self.discount_rate_percent)
        {
            return Err(ValidationError::InvalidDiscountRate);
        }
        if self.duration_days == 0 {
            return Err(ValidationError::InvalidDuration);
        }
        Ok(())
    }

    /// Builds the domain policy the core consumes.
    pub fn to_policy(&self) -> Result<PremiumPolicy, ValidationError> {
        self.validate()?;
        let discount_rate = DiscountRate::try_from_percent(self.discount_rate_percent)
            .map_err(|_| ValidationError::InvalidDiscountRate)?;

        Ok(PremiumPolicy {
            premium_product_ids: self.parsed_product_ids(),
            discount_rate,
            duration_days: self.duration_days,
            email_subject: self.email_subject.clone(),
            email_body: self.email_body.clone(),
            send_expiration_email: self.send_expiration_email,
        })
    }
}

impl Default for PremiumConfig {
    fn default() -> Self {
        Self {
            product_ids: String::new(),
            discount_rate_percent: default_discount_rate(),
            duration_days: default_duration_days(),
            email_subject: None,
            email_body: None,
            send_expiration_email: false,
        }
    }
}

fn default_discount_rate() -> f64 {
    8.0
}

fn default_duration_days() -> u32 {
    365
}
