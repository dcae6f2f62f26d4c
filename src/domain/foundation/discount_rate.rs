//! Discount rate value object (percentage with 2-decimal precision).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Money, ValidationError};

/// A percentage in [0, 100] stored as basis points.
///
/// Storing basis points keeps the rate exact at the configured 2-decimal
/// precision; the only rounding in a discount computation happens once,
/// in [`DiscountRate::amount_off`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// Creates a rate from a percentage, rejecting values outside [0, 100].
    pub fn try_from_percent(percent: f64) -> Result<Self, ValidationError> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(ValidationError::out_of_range(
                "discount_rate",
                0,
                100,
                percent as i64,
            ));
        }
        Ok(Self((percent * 100.0).round() as u32))
    }

    /// Creates a rate directly from basis points (1% = 100 bps).
    pub fn from_basis_points(bps: u32) -> Result<Self, ValidationError> {
        if bps > 10_000 {
            return Err(ValidationError::out_of_range(
                "discount_rate",
                0,
                10_000,
                i64::from(bps),
            ));
        }
        Ok(Self(bps))
    }

    /// Returns the rate in basis points.
    pub fn basis_points(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage.
    pub fn percent(&self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Computes the absolute amount this rate takes off `base`.
    ///
    /// This is the single rounding step of a member-price computation:
    /// cents are rounded half-up here, and callers only do exact integer
    /// subtraction afterwards.
    pub fn amount_off(&self, base: Money) -> Money {
        let numerator = i128::from(base.cents()) * i128::from(self.0);
        let cents = (numerator + 5_000) / 10_000;
        Money::from_cents(cents as i64)
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Prints the bare percentage number ("8", "8.5", "8.25"); callers append
/// the percent sign where the surrounding text needs it.
impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}", self.0 / 100)
        } else if self.0 % 10 == 0 {
            write!(f, "{}.{}", self.0 / 100, (self.0 % 100) / 10)
        } else {
            write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
        }
    }
}
