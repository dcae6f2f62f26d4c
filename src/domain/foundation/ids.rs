//! Strongly-typed identifier value objects.
//!
//! The surrounding platform assigns numeric identifiers to users, orders,
//! and products; these newtypes keep them from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Platform identifier for a customer account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Creates a UserId from a raw platform identifier.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Platform identifier for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Creates an OrderId from a raw platform identifier.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Platform identifier for a catalog product or variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Creates a ProductId from a raw platform identifier.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_preserves_value() {
        let id = UserId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(format!("{}", id), "42");
    }

    #[test]
    fn order_id_parses_from_string() {
        let id: OrderId = "1001".parse().unwrap();
        assert_eq!(id, OrderId::new(1001));
    }

    #[test]
    fn order_id_rejects_non_numeric_string() {
        let result: Result<OrderId, _> = "abc".parse();
        assert!(result.is_err());
    }

    #[test]
    fn product_id_serializes_transparently() {
        let id = ProductId::new(12);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "12");
    }

    #[test]
    fn ids_of_different_kinds_are_distinct_types() {
        // Compile-time property; equality only within a kind.
        assert_ne!(ProductId::new(5), ProductId::new(12));
        assert_eq!(UserId::new(5).value(), 5);
    }
}
