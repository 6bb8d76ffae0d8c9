//! # Money Module
//!
//! Provides the `Money` type for every amount on an invoice, a product or the
//! dashboard.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  INVOICE TOTALS MUST BE EXACT TO THE CENT                               │
//! │                                                                         │
//! │  With floating point:                                                   │
//! │    2.5 tax + 0.1 tax + 0.2 tax = 2.8000000000000003                     │
//! │                                                                         │
//! │  With integer cents:                                                    │
//! │    250 + 10 + 20 = 280 cents → "$2.80"                                  │
//! │                                                                         │
//! │  total = subtotal + tax − discount holds exactly, always.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nimbus_core::money::Money;
//!
//! let price: Money = "10.00".parse().unwrap();
//! let line = price * 2_i64 + Money::from_cents(200) - Money::from_cents(100);
//! assert_eq!(line.to_string(), "$21.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// Signed, so that a discount larger than the rest of a line shows up as a
/// negative total instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use nimbus_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -$5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Calculates tax at the given rate, rounding half away from zero.
    ///
    /// Integer math: `(amount × bps ± 5000) / 10000`, computed in i128.
    ///
    /// ```rust
    /// use nimbus_core::money::Money;
    /// use nimbus_core::types::TaxRate;
    ///
    /// // 10% of $9.99 = $0.999 → $1.00
    /// let tax = Money::from_cents(999).calculate_tax(TaxRate::from_bps(1000));
    /// assert_eq!(tax.cents(), 100);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let scaled = self.0 as i128 * rate.bps() as i128;
        let half = if scaled < 0 { -5000 } else { 5000 };
        Money::from_cents(((scaled + half) / 10000) as i64)
    }

    /// Multiplies a unit price by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Divides evenly into `parts`, rounding half away from zero.
    ///
    /// Returns zero when `parts` is zero; an average over nothing is nothing.
    ///
    /// ```rust
    /// use nimbus_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(3501).divide_rounded(3).cents(), 1167);
    /// assert_eq!(Money::from_cents(1000).divide_rounded(0).cents(), 0);
    /// ```
    pub fn divide_rounded(&self, parts: u64) -> Money {
        if parts == 0 {
            return Money::zero();
        }
        let n = parts as i128;
        let v = self.0 as i128;
        let rounded = if v < 0 {
            -((-v * 2 + n) / (n * 2))
        } else {
            (v * 2 + n) / (n * 2)
        };
        Money::from_cents(rounded as i64)
    }

    /// Formats as a plain decimal without currency symbol ("26.50").
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses user input such as `"10"`, `"10.5"`, `"10.50"` or `"-3.25"`.
///
/// More than two fraction digits is rejected rather than silently rounded,
/// and so is any amount beyond [`MAX_AMOUNT`](crate::MAX_AMOUNT) either side
/// of zero.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let too_large = || ValidationError::TooLarge {
            field: "amount".to_string(),
            max: crate::MAX_AMOUNT,
        };

        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a decimal number like 10.50"));
        }
        if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("at most two decimal places are allowed"));
        }

        let major: i64 = whole
            .parse()
            .map_err(|_| too_large())?;
        let minor: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().unwrap_or(0) * 10,
            _ => frac.parse::<i64>().unwrap_or(0),
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(too_large)?;

        if cents > crate::MAX_AMOUNT.0 {
            return Err(too_large());
        }

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
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
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(2650).to_string(), "$26.50");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(2650).to_decimal_string(), "26.50");
        assert_eq!(Money::from_cents(-1).to_decimal_string(), "-0.01");
    }

    #[test]
    fn test_parse_accepts_common_forms() {
        assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<Money>().unwrap().cents(), 1050);
        assert_eq!("10.50".parse::<Money>().unwrap().cents(), 1050);
        assert_eq!(" 0.05 ".parse::<Money>().unwrap().cents(), 5);
        assert_eq!("-3.25".parse::<Money>().unwrap().cents(), -325);
        assert_eq!("7.".parse::<Money>().unwrap().cents(), 700);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(matches!("".parse::<Money>(), Err(ValidationError::Required { .. })));
        assert!("abc".parse::<Money>().is_err());
        assert!("1.234".parse::<Money>().is_err());
        assert!(".5".parse::<Money>().is_err());
        assert!("1,50".parse::<Money>().is_err());
        assert!("NaN".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn test_parse_upper_bound() {
        assert_eq!("10000000".parse::<Money>().unwrap(), crate::MAX_AMOUNT);
        assert_eq!("-10000000.00".parse::<Money>().unwrap().cents(), -1_000_000_000);

        assert!(matches!(
            "10000000.01".parse::<Money>(),
            Err(ValidationError::TooLarge { .. })
        ));
        assert!(matches!(
            "92233720368547758".parse::<Money>(),
            Err(ValidationError::TooLarge { .. })
        ));
        assert!("-10000000.01".parse::<Money>().is_err());
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3_i64).cents(), 3000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_ten_percent_tax() {
        let rate = TaxRate::from_bps(1000);
        assert_eq!(Money::from_cents(1000).calculate_tax(rate).cents(), 100);
        assert_eq!(Money::from_cents(999).calculate_tax(rate).cents(), 100);
        assert_eq!(Money::from_cents(5).calculate_tax(rate).cents(), 1);
        assert_eq!(Money::from_cents(4).calculate_tax(rate).cents(), 0);
    }

    #[test]
    fn test_divide_rounded() {
        assert_eq!(Money::from_cents(3501).divide_rounded(3).cents(), 1167);
        assert_eq!(Money::from_cents(1000).divide_rounded(4).cents(), 250);
        assert_eq!(Money::from_cents(5).divide_rounded(2).cents(), 3);
        assert_eq!(Money::from_cents(-5).divide_rounded(2).cents(), -3);
        assert!(Money::from_cents(1000).divide_rounded(0).is_zero());
    }
}
