//! Money value object with fixed 2-decimal currency precision.
//!
//! Amounts are stored as integer cents so arithmetic never accumulates
//! float error; any rounding happens in exactly one place, when a
//! fractional amount is converted to cents.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Currency amount in integer cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from integer cents.
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Returns true if the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Parses a decimal string such as `"90"`, `"90.5"` or `"90.00"`.
    ///
    /// At most two fractional digits are accepted; anything else is an
    /// invalid price and rejected so callers can fall back to
    /// pass-through behavior.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("amount"));
        }

        let (units, frac) = match trimmed.split_once('.') {
            Some((u, f)) => (u, f),
            None => (trimmed, ""),
        };

        if units.is_empty() || !units.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::invalid_format("amount", "not a decimal number"));
        }
        if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                "amount",
                "at most two fractional digits",
            ));
        }

        let units: i64 = units
            .parse()
            .map_err(|_| ValidationError::invalid_format("amount", "integer part too large"))?;
        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().unwrap_or(0) * 10,
            _ => frac.parse::<i64>().unwrap_or(0),
        };

        units
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .map(Self)
            .ok_or_else(|| ValidationError::invalid_format("amount", "amount too large"))
    }

    /// Adds two amounts.
    pub fn plus(&self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Subtracts `other`, flooring the result at zero.
    pub fn minus_clamped(&self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0).max(0))
    }

    /// Scales the amount by an integer quantity.
    pub fn times(&self, quantity: u32) -> Money {
        Money(self.0.saturating_mul(i64::from(quantity)))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}
