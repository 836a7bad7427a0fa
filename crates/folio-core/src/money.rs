//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Discounting a cart of three 3.33 books at 5%:                          │
//! │    float:  (3.33 + 3.33 + 3.33) × 0.05 = 0.4995000000000001            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents, per book, truncated                       │
//! │    333 × 5 / 100 = 16 cents, three times = 48 cents                     │
//! │    Every checkout produces the exact same number                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use folio_core::money::Money;
//! use folio_core::types::DiscountRate;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Percent off, truncated toward zero
//! let off = price.percent(DiscountRate::new(40).unwrap());
//! assert_eq!(off.cents(), 439); // 1099 × 40 / 100 = 439.6 → 439
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: book prices are never negative, but validation needs
///   to be able to see a negative value in order to reject it
/// - **Single field tuple struct**: serializes as a bare integer
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds two amounts, or `None` if the sum does not fit in i64 cents.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Returns `rate` percent of this amount, truncated toward zero.
    ///
    /// ## Implementation
    /// Integer math: `cents * rate / 100`, widened to i128 so large amounts
    /// cannot overflow before the division.
    ///
    /// Rules call this once per book and sum the results. Applying it to a
    /// cart total instead would round differently:
    /// ```rust
    /// use folio_core::money::Money;
    /// use folio_core::types::DiscountRate;
    ///
    /// let rate = DiscountRate::new(5).unwrap();
    /// let per_book: Money = [333, 333, 333]
    ///     .iter()
    ///     .map(|c| Money::from_cents(*c).percent(rate))
    ///     .sum();
    /// assert_eq!(per_book.cents(), 48);
    /// assert_eq!(Money::from_cents(999).percent(rate).cents(), 49);
    /// ```
    #[inline]
    pub fn percent(&self, rate: DiscountRate) -> Money {
        let cents = self.0 as i128 * rate.percent() as i128 / 100;
        Money(cents as i64)
    }

    /// Ratio of this amount to `whole`, for display only.
    ///
    /// Returns 0.0 when `whole` is zero.
    pub fn ratio_of(&self, whole: Money) -> f64 {
        if whole.is_zero() {
            return 0.0;
        }
        self.0 as f64 / whole.0 as f64
    }

    /// Returns the amount in major units (dollars) for display or wire
    /// encoding. Never feed this back into a calculation.
    #[inline]
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
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
