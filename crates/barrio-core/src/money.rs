//! # Money Module
//!
//! Provides the `Money` type for menu prices, line totals and table totals.
//!
//! ## Whole Units Only
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Menu prices are whole pesos: Espresso = 1800, Latte = 2800             │
//! │                                                                         │
//! │  There is no minor unit to track, so Money wraps a plain i64 and        │
//! │  every total is exact:                                                  │
//! │    2 × Latte (2800) + 2 × Medialuna (900) = 7400                        │
//! │                                                                         │
//! │  Floats never enter the engine. Only the display layer adds the         │
//! │  currency symbol and the thousands separator ("$7.400").               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use barrio_core::money::Money;
//!
//! let latte = Money::from_units(2800);
//! let line = latte.multiply_quantity(2);
//! assert_eq!(line.units(), 5600);
//! assert_eq!(line.to_string(), "$5.600");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

/// Default symbol used by `Display`.
pub const DEFAULT_SYMBOL: &str = "$";

/// Default thousands separator used by `Display` (es-AR style).
pub const DEFAULT_SEPARATOR: char = '.';

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in whole currency units.
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► OrderItem.line_total() ──► Table.total()
///                                                   │
///                     Σ OCCUPIED + WAITING_PAYMENT  ▼
///                                        SalesSummary.current_session
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole units.
    ///
    /// ```rust
    /// use barrio_core::money::Money;
    ///
    /// let espresso = Money::from_units(1800);
    /// assert_eq!(espresso.units(), 1800);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the amount in whole units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies a unit price by a line quantity.
    ///
    /// ```rust
    /// use barrio_core::money::Money;
    ///
    /// let medialuna = Money::from_units(900);
    /// assert_eq!(medialuna.multiply_quantity(2).units(), 1800);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Formats the amount with an explicit symbol and thousands separator.
    ///
    /// ```rust
    /// use barrio_core::money::Money;
    ///
    /// let daily = Money::from_units(161_700);
    /// assert_eq!(daily.format_with("$", '.'), "$161.700");
    /// assert_eq!(daily.format_with("ARS ", ','), "ARS 161,700");
    /// assert_eq!(Money::from_units(-1800).format_with("$", '.'), "-$1.800");
    /// ```
    pub fn format_with(&self, symbol: &str, separator: char) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(separator);
            }
            grouped.push(ch);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}{}", sign, symbol, grouped)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly display using the default symbol and separator.
///
/// Screens should format through the configured currency settings instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(DEFAULT_SYMBOL, DEFAULT_SEPARATOR))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(2800);
        assert_eq!(money.units(), 2800);
        assert!(money.is_positive());
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::from_units(7400).to_string(), "$7.400");
        assert_eq!(Money::from_units(900).to_string(), "$900");
        assert_eq!(Money::from_units(0).to_string(), "$0");
        assert_eq!(Money::from_units(1_234_567).to_string(), "$1.234.567");
        assert_eq!(Money::from_units(-154_300).to_string(), "-$154.300");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(500);

        assert_eq!((a + b).units(), 1500);
        assert_eq!((a * 3u32).units(), 3000);

        let mut c = a;
        c += b;
        assert_eq!(c.units(), 1500);
    }

    #[test]
    fn test_sum() {
        let lines = [Money::from_units(5600), Money::from_units(1800)];
        let total: Money = lines.iter().sum();
        assert_eq!(total.units(), 7400);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::default();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());

        assert!(Money::from_units(900).is_positive());
        assert!(!Money::from_units(-100).is_positive());
    }
}
