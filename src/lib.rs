//! Boutique Premium - Membership lifecycle and member pricing.
//!
//! This crate implements the premium-membership tier of the boutique
//! storefront: activation on qualifying purchase, time-boxed expiration,
//! and member-discount pricing applied consistently across catalog
//! listings, product detail pages, and cart totals.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
