//! Read-only premium configuration consumed by the core.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DiscountRate, ProductId, Timestamp};

/// Premium feature configuration, owned by the settings surface and
/// read-only to this crate.
///
/// An empty product allowlist means the feature is unconfigured: the
/// grant workflow becomes a silent no-op, by contract rather than error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumPolicy {
    /// Products whose purchase grants membership. Also the exclusion
    /// list for member pricing: the membership product itself is never
    /// discounted.
    pub premium_product_ids: HashSet<ProductId>,

    /// Member discount, percent of the regular price.
    pub discount_rate: DiscountRate,

    /// Membership duration granted per purchase, in days.
    pub duration_days: u32,

    /// Custom confirmation email subject; `None` uses the built-in one.
    pub email_subject: Option<String>,

    /// Custom confirmation email body with `{user_name}`,
    /// `{expiration_date}` and `{discount_rate}` placeholders.
    pub email_body: Option<String>,

    /// Whether the expiration sweep sends a notice to demoted members.
    pub send_expiration_email: bool,
}

impl PremiumPolicy {
    /// True when a product allowlist has been configured.
    pub fn is_configured(&self) -> bool {
        !self.premium_product_ids.is_empty()
    }

    /// True when `product_id` is one of the membership products.
    pub fn is_membership_product(&self, product_id: ProductId) -> bool {
        self.premium_product_ids.contains(&product_id)
    }

    /// Expiration for a grant performed at `now`.
    pub fn expiration_from(&self, now: Timestamp) -> Timestamp {
        now.add_days(i64::from(self.duration_days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy_with_ids(ids: &[u64]) -> PremiumPolicy {
        PremiumPolicy {
            premium_product_ids: ids.iter().copied().map(ProductId::new).collect(),
            discount_rate: DiscountRate::try_from_percent(8.0).unwrap(),
            duration_days: 365,
            email_subject: None,
            email_body: None,
            send_expiration_email: false,
        }
    }

    #[test]
    fn empty_allowlist_is_unconfigured() {
        assert!(!policy_with_ids(&[]).is_configured());
        assert!(policy_with_ids(&[12]).is_configured());
    }

    #[test]
    fn membership_product_check_uses_allowlist() {
        let policy = policy_with_ids(&[12]);
        assert!(policy.is_membership_product(ProductId::new(12)));
        assert!(!policy.is_membership_product(ProductId::new(5)));
    }

    #[test]
    fn expiration_is_duration_days_after_now() {
        let policy = policy_with_ids(&[12]);
        let now = Timestamp::now();
        assert_eq!(policy.expiration_from(now), now.add_days(365));
    }
}
