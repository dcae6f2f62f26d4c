//! Product pricing inputs.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, ProductId};

/// How a catalog product resolves its price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// Standalone product with its own price.
    Simple,

    /// One concrete variant of a variable product; priced like a
    /// simple product.
    Variation,

    /// Parent of variations; delegates pricing to them and is never
    /// discounted at its own level.
    Variable,
}

/// The pricing view of a product at one resolution point.
///
/// `regular_price` is the canonical list price before any promotion;
/// `current_price` is what the platform would show a non-member right
/// now, possibly already lowered by an unrelated sale. Either may be
/// absent for unpriced products, which pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedProduct {
    /// Catalog identifier (the variation's own id for variations).
    pub id: ProductId,

    /// Pricing behavior of this catalog entry.
    pub kind: ProductKind,

    /// Canonical pre-promotion price.
    pub regular_price: Option<Money>,

    /// Price currently displayed to non-members.
    pub current_price: Option<Money>,
}

impl PricedProduct {
    /// A simple product with the given prices.
    pub fn simple(id: ProductId, regular_price: Option<Money>, current_price: Option<Money>) -> Self {
        Self {
            id,
            kind: ProductKind::Simple,
            regular_price,
            current_price,
        }
    }

    /// A concrete variation with the given prices.
    pub fn variation(
        id: ProductId,
        regular_price: Option<Money>,
        current_price: Option<Money>,
    ) -> Self {
        Self {
            id,
            kind: ProductKind::Variation,
            regular_price,
            current_price,
        }
    }

    /// A variable parent; carries whatever aggregate price the platform
    /// computed but is never discounted itself.
    pub fn variable_parent(id: ProductId, current_price: Option<Money>) -> Self {
        Self {
            id,
            kind: ProductKind::Variable,
            regular_price: None,
            current_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_constructor_sets_kind() {
        let product = PricedProduct::simple(
            ProductId::new(5),
            Some(Money::from_cents(10_000)),
            Some(Money::from_cents(9_000)),
        );
        assert_eq!(product.kind, ProductKind::Simple);
    }

    #[test]
    fn variable_parent_has_no_regular_price() {
        let product = PricedProduct::variable_parent(ProductId::new(7), Some(Money::from_cents(5_000)));
        assert_eq!(product.kind, ProductKind::Variable);
        assert!(product.regular_price.is_none());
    }
}
