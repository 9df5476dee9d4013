//! # Money Module
//!
//! Provides the `Money` type used for every amount that flows through a
//! sales report: prices, subtotals, profits, totals and averages.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SUMMING A DAY OF SALES                                                 │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │    → Σ of 10,000 receipts drifts away from the till                     │
//! │                                                                         │
//! │  With integer cents:                                                    │
//! │    10 + 20 = 30                                                         │
//! │    → totalSales == Σ sale.total, exactly, for any number of receipts    │
//! │                                                                         │
//! │  Only ratios (margins) leave the integer domain, as f64 percentages.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let line = price * 3;                // $32.97
//! let cost = Money::from_cents(2100);
//!
//! assert_eq!(line.cents(), 3297);
//! assert_eq!((line - cost).cents(), 1197);
//! ```

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::Serialize;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative lines (returns, corrections) are accepted by
///   the aggregation and must be representable
/// - **Single field tuple struct**: serializes as a bare integer, so a sales
///   export carries `"total": 15000` for $150.00
/// - **Cents on the wire**: deserialization accepts integers only. A
///   fractional number such as `19.99` is rejected with a message naming the
///   expected unit instead of being guessed at.
///
/// ## Where Money is Used
/// ```text
/// SaleItem.final_unit_price × quantity ──► SaleItem.subtotal
///                                               │
///                       Σ per sale ◄────────────┘
///                           │
///                           ▼
///  Sale.total ──► SalesSummary.total_sales ──► average_sale
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(150, 0).cents(), 15000);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit amount by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Expresses `self` as a percentage of `base`.
    ///
    /// Returns exactly `0.0` when `base` is zero or negative, which is the
    /// guard every margin in a report relies on.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let profit = Money::from_cents(3000);
    /// let revenue = Money::from_cents(15000);
    /// assert_eq!(profit.percent_of(revenue), 20.0);
    /// assert_eq!(profit.percent_of(Money::zero()), 0.0);
    /// ```
    pub fn percent_of(&self, base: Money) -> f64 {
        if base.0 <= 0 {
            return 0.0;
        }
        // Scale before dividing so whole-number percentages come out exact
        self.0 as f64 * 100.0 / base.0 as f64
    }

    /// Divides into `parts` equal shares, rounded to the nearest cent
    /// (halves away from zero). Zero parts yields zero.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(15000).divide_rounded(2).cents(), 7500);
    /// assert_eq!(Money::from_cents(1000).divide_rounded(3).cents(), 333);
    /// assert_eq!(Money::from_cents(1000).divide_rounded(0).cents(), 0);
    /// ```
    pub fn divide_rounded(&self, parts: usize) -> Money {
        if parts == 0 {
            return Money::zero();
        }
        // i128 so that huge totals over many parts cannot overflow
        let cents = self.0 as i128;
        let parts = parts as i128;
        let quotient = cents / parts;
        let remainder = cents % parts;
        let rounded = if remainder.abs() * 2 >= parts {
            quotient + cents.signum()
        } else {
            quotient
        };
        Money::from_cents(rounded as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and the plain-text report. Currency localization is the
/// frontend's job.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
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

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
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

/// Reads an amount in integer cents.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_i64(CentsVisitor)
    }
}

struct CentsVisitor;

impl Visitor<'_> for CentsVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an amount in integer cents (e.g. 1999 for $19.99)")
    }

    fn visit_i64<E: de::Error>(self, cents: i64) -> Result<Money, E> {
        Ok(Money(cents))
    }

    fn visit_u64<E: de::Error>(self, cents: u64) -> Result<Money, E> {
        i64::try_from(cents)
            .map(Money)
            .map_err(|_| E::custom(format!("amount {} cents is out of range", cents)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Money, E> {
        Err(E::custom(format!(
            "amount {} is not in integer cents (write {} for {:.2})",
            value,
            (value * 100.0).round(),
            value
        )))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_integer_cents_only() {
        assert_eq!(serde_json::from_str::<Money>("1999").unwrap().cents(), 1999);
        assert_eq!(serde_json::from_str::<Money>("-550").unwrap().cents(), -550);
        assert_eq!(serde_json::to_string(&Money::from_cents(1999)).unwrap(), "1999");

        let err = serde_json::from_str::<Money>("19.99").unwrap_err().to_string();
        assert!(err.contains("amount 19.99 is not in integer cents (write 1999"), "{err}");

        assert!(serde_json::from_str::<Money>("9223372036854775808").is_err());
        assert!(serde_json::from_str::<Money>("\"19.99\"").is_err());
    }

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let mut acc = Money::zero();
        acc += a;
        acc -= b;
        assert_eq!(acc.cents(), 500);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(10),
            Money::from_cents(20),
            Money::from_cents(-5),
        ];
        let by_ref: Money = amounts.iter().sum();
        let by_value: Money = amounts.into_iter().sum();
        assert_eq!(by_ref.cents(), 25);
        assert_eq!(by_value.cents(), 25);
    }

    #[test]
    fn test_percent_of_guards_non_positive_base() {
        let profit = Money::from_cents(2000);
        assert_eq!(profit.percent_of(Money::from_cents(10000)), 20.0);
        assert_eq!(profit.percent_of(Money::zero()), 0.0);
        assert_eq!(profit.percent_of(Money::from_cents(-100)), 0.0);
        assert_eq!(Money::from_cents(-500).percent_of(Money::from_cents(1000)), -50.0);
    }

    #[test]
    fn test_divide_rounded() {
        assert_eq!(Money::from_cents(15000).divide_rounded(2).cents(), 7500);
        // 1000 / 6 = 166.67 → 167
        assert_eq!(Money::from_cents(1000).divide_rounded(6).cents(), 167);
        // 5 / 2 = 2.5 → 3 (half away from zero)
        assert_eq!(Money::from_cents(5).divide_rounded(2).cents(), 3);
        assert_eq!(Money::from_cents(-5).divide_rounded(2).cents(), -3);
        assert_eq!(Money::from_cents(999).divide_rounded(0), Money::zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_string(&Money::from_cents(15000)).unwrap();
        assert_eq!(json, "15000");
        let parsed: Money = serde_json::from_str("-250").unwrap();
        assert_eq!(parsed.cents(), -250);
    }
}
