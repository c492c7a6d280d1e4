//! Prices in minor currency units.
//!
//! Catalog prices are stored as whole cents so arithmetic stays exact. All
//! prices are USD; formatting for display happens here rather than in clients.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Prices can't be negative.
    #[error("price must be at least 0 (got {0})")]
    Negative(i32),
}

/// A price in cents.
///
/// Serializes as a bare integer (`2400` for $24.00).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i32);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(0);

    /// Create a price from cents.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `cents` is below zero.
    pub const fn from_cents(cents: i32) -> Result<Self, PriceError> {
        if cents < 0 {
            return Err(PriceError::Negative(cents));
        }
        Ok(Self(cents))
    }

    /// The amount in cents.
    #[must_use]
    pub const fn cents(&self) -> i32 {
        self.0
    }

    /// Whether this price is valid (non-negative).
    ///
    /// Deserialized prices aren't checked until schema validation runs.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 >= 0
    }

    /// Line total for `quantity` units, widened to `i64`.
    #[must_use]
    pub fn times(&self, quantity: i32) -> i64 {
        i64::from(self.0) * i64::from(quantity)
    }

    /// Format for display (e.g., "$24.00").
    #[must_use]
    pub fn display(&self) -> String {
        format_cents(i64::from(self.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Format an amount of cents as dollars, e.g. `8900` -> `"$89.00"`.
#[must_use]
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}
