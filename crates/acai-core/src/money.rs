//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A 500ml açaí with three toppings summed as floats can print           │
//! │  "R$ 25,000000001" or round the wrong way.                             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    1800 + 200 + 500 = 2500 centavos, exactly                           │
//! │    Formatted as "R$ 25,00" only at display time                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use acai_core::money::Money;
//!
//! let size = Money::from_cents(1800);   // R$ 18,00
//! let topping = Money::from_cents(250); // R$ 2,50
//!
//! let total = size + topping;
//! assert_eq!(total.to_string(), "R$ 20,50");
//! assert_eq!(topping.surcharge(), "+ R$ 2,50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::MAX_PRICE_CENTS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (the smallest BRL unit).
///
/// ## Where Money is Used
/// ```text
/// Size.price ──────┐
///                  ├──► PricedOrder.total_price ──► "Total: R$ 25,00"
/// Topping.price ───┘
///
/// Product.base_price ──► "A partir de R$ 12,00" (display only)
/// Combo.price / original_price ──► "R$ 69,90" / "R$ 84,00"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use acai_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // R$ 10,99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal price typed into an admin form.
    ///
    /// Accepts a `.` or `,` decimal separator and at most two fractional
    /// digits. Magnitudes above `MAX_PRICE_CENTS` are rejected. No floating
    /// point is involved.
    ///
    /// ## Example
    /// ```rust
    /// use acai_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("12.00").unwrap().cents(), 1200);
    /// assert_eq!(Money::parse_decimal("2,5").unwrap().cents(), 250);
    /// assert_eq!(Money::parse_decimal("7").unwrap().cents(), 700);
    /// assert!(Money::parse_decimal("1.999").is_err());
    /// assert!(Money::parse_decimal("abc").is_err());
    /// ```
    pub fn parse_decimal(input: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let input = input.trim();
        if input.is_empty() {
            return Err(ValidationError::Required {
                field: "price".to_string(),
            });
        }

        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let (whole, frac) = match digits.split_once(['.', ',']) {
            Some((whole, frac)) => (whole, frac),
            None => (digits, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("expected a number"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a number"));
        }
        if frac.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("value too large"))?
        };
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid("expected a number"))? * 10,
            _ => frac.parse().map_err(|_| invalid("expected a number"))?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .filter(|c| *c <= MAX_PRICE_CENTS)
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "price".to_string(),
                min: 0,
                max: MAX_PRICE_CENTS,
            })?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Addition that reports overflow instead of wrapping.
    #[inline]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(sum) => Some(Money(sum)),
            None => None,
        }
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the reais portion.
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Renders the value as a topping surcharge: `+ R$ 2,00`.
    pub fn surcharge(&self) -> String {
        format!("+ {}", self)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Brazilian real formatting: `R$ 1.234,56`.
///
/// Thousands are grouped with `.`, the decimal separator is `,` and there
/// are always two fractional digits.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let reais = self.reais().unsigned_abs().to_string();

        let mut grouped = String::with_capacity(reais.len() + reais.len() / 3);
        for (i, c) in reais.chars().enumerate() {
            if i > 0 && (reais.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        write!(f, "{}R$ {},{:02}", sign, grouped, self.cents_part())
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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.reais(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(2500).to_string(), "R$ 25,00");
        assert_eq!(Money::from_cents(6990).to_string(), "R$ 69,90");
        assert_eq!(Money::from_cents(5).to_string(), "R$ 0,05");
        assert_eq!(Money::from_cents(0).to_string(), "R$ 0,00");
        assert_eq!(Money::from_cents(-550).to_string(), "-R$ 5,50");
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::from_cents(123_456).to_string(), "R$ 1.234,56");
        assert_eq!(Money::from_cents(100_000_000).to_string(), "R$ 1.000.000,00");
        assert_eq!(Money::from_cents(99_999).to_string(), "R$ 999,99");
    }

    #[test]
    fn test_surcharge() {
        assert_eq!(Money::from_cents(200).surcharge(), "+ R$ 2,00");
    }

    #[test]
    fn test_sum() {
        let total: Money = [1800, 200, 500].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 2500);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("12.00").unwrap().cents(), 1200);
        assert_eq!(Money::parse_decimal(" 34,9 ").unwrap().cents(), 3490);
        assert_eq!(Money::parse_decimal(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse_decimal("0").unwrap().cents(), 0);
        assert_eq!(Money::parse_decimal("-3").unwrap().cents(), -300);

        assert!(Money::parse_decimal("").is_err());
        assert!(Money::parse_decimal(".").is_err());
        assert!(Money::parse_decimal("1.2.3").is_err());
        assert!(Money::parse_decimal("12.345").is_err());
        assert!(Money::parse_decimal("R$ 12").is_err());
    }

    #[test]
    fn test_parse_decimal_rejects_huge_values() {
        assert_eq!(Money::parse_decimal("1000000,00").unwrap().cents(), MAX_PRICE_CENTS);
        assert!(matches!(
            Money::parse_decimal("1000000,01"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(Money::parse_decimal("92233720368547758.07").is_err());
        assert!(Money::parse_decimal("99999999999999999999").is_err());
    }

    #[test]
    fn test_checked_add() {
        assert_eq!(
            Money::from_cents(1800).checked_add(Money::from_cents(200)),
            Some(Money::from_cents(2000))
        );
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    }
}
