//! Member price resolution.
//!
//! One function decides every member price. The discount is a fixed
//! share of the *regular* price subtracted from the *current* price, so
//! the member benefit in currency units stays constant no matter what
//! sale the platform has already applied, and applying the function to
//! its own output is never needed anywhere.
//!
//! The `apply_member_discount` flag exists for display composition:
//! fetching the undiscounted comparison value is the same call with the
//! flag off, instead of suspending and restoring a global price filter.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DiscountRate, Money};
use crate::domain::membership::PremiumPolicy;

use super::{PricedProduct, ProductKind};

/// Resolves the price a given viewer pays for `product`.
///
/// Returns `None` only for unpriced products (no current price), which
/// pass through unchanged. Every other input yields a price:
///
/// - with `apply_member_discount` off, the current price untouched;
/// - for non-members, the current price untouched, bit-exact;
/// - for membership products themselves, variable parents, or products
///   without a positive regular price, the current price untouched;
/// - otherwise `max(0, current - rate * regular)`, with the single
///   rounding step inside [`DiscountRate::amount_off`].
pub fn resolve_price(
    product: &PricedProduct,
    member_active: bool,
    apply_member_discount: bool,
    policy: &PremiumPolicy,
) -> Option<Money> {
    let current = product.current_price?;

    if !apply_member_discount || !member_active {
        return Some(current);
    }
    if policy.is_membership_product(product.id) {
        return Some(current);
    }
    if product.kind == ProductKind::Variable {
        return Some(current);
    }

    let regular = match product.regular_price {
        Some(regular) if regular.is_positive() => regular,
        _ => return Some(current),
    };

    Some(current.minus_clamped(policy.discount_rate.amount_off(regular)))
}

/// Detail-page price composition for an active member: the current
/// price (to be struck through) next to the member price and the rate
/// for the label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Price a non-member would see right now.
    pub list_price: Money,

    /// Price the member pays.
    pub member_price: Money,

    /// Rate shown on the member badge.
    pub rate: DiscountRate,
}

/// Computes the member display breakdown, or `None` when plain pricing
/// should be shown instead: viewer is not a member, the product is a
/// variable parent, a membership product, unpriced, or the discount has
/// no effect on it.
pub fn price_breakdown(
    product: &PricedProduct,
    member_active: bool,
    policy: &PremiumPolicy,
) -> Option<PriceBreakdown> {
    if !member_active {
        return None;
    }
    if product.kind == ProductKind::Variable {
        return None;
    }
    if policy.is_membership_product(product.id) {
        return None;
    }

    let list_price = resolve_price(product, member_active, false, policy)?;
    if !list_price.is_positive() {
        return None;
    }
    let member_price = resolve_price(product, member_active, true, policy)?;
    if member_price == list_price {
        return None;
    }

    Some(PriceBreakdown {
        list_price,
        member_price,
        rate: policy.discount_rate,
    })
}
