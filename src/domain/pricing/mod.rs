//! Pricing domain module.
//!
//! The member-discount computation and its display/cart compositions.
//! Every price a member sees - catalog listing, product detail, cart
//! line - flows through [`resolve_price`] so the three surfaces can
//! never disagree on the same inputs.

mod cart;
mod engine;
mod product;

pub use cart::{member_cart_total, CartLine};
pub use engine::{price_breakdown, resolve_price, PriceBreakdown};
pub use product::{PricedProduct, ProductKind};
