//! Cart total recomputation.
//!
//! The cart does not carry its own discount formula: each line goes
//! through [`resolve_price`] exactly as the catalog and detail pages
//! do, so all three surfaces show the same number for the same inputs.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Money;
use crate::domain::membership::PremiumPolicy;

use super::{resolve_price, PricedProduct};

/// One cart line: a priced product and its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product as priced at cart-recompute time.
    pub product: PricedProduct,

    /// Units of the product in the cart.
    pub quantity: u32,
}

impl CartLine {
    /// Creates a cart line.
    pub fn new(product: PricedProduct, quantity: u32) -> Self {
        Self { product, quantity }
    }
}

/// Recomputes the cart total for a viewer.
///
/// Unpriced lines contribute nothing, matching how the platform skips
/// them in its own totals.
pub fn member_cart_total(lines: &[CartLine], member_active: bool, policy: &PremiumPolicy) -> Money {
    lines.iter().fold(Money::ZERO, |total, line| {
        let unit = resolve_price(&line.product, member_active, true, policy).unwrap_or(Money::ZERO);
        total.plus(unit.times(line.quantity))
    })
}
