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
//! │  A cart page that sums prices as floats and a checkout page that       │
//! │  sums them again can disagree by a fraction of a poisha.               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    ৳950.00 is stored as 95000 poisha                                    │
//! │    Every subtotal is an exact integer sum                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use glow_core::money::Money;
//!
//! let price = Money::from_major(850);     // ৳850
//! let line = price * 2u32;                // ৳1700
//! let total = line + Money::from_major(1450);
//! assert_eq!(total.major(), 3150);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::CURRENCY_SYMBOL;

/// Minor units per major unit (poisha per taka).
pub const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (poisha).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for discounts
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support; serializes as a bare integer
///
/// ## Where Money is Used
/// ```text
/// Product.price / sale_price ──► effective_unit_price ──► line total
///                                                            │
///                    cart_subtotal ◄─────────────────────────┘
///                         │
///                         ▼
///   subtotal + shipping_charge(zone) − discount ──► Order.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (poisha).
    ///
    /// ```rust
    /// use glow_core::money::Money;
    ///
    /// let price = Money::from_minor(95050); // ৳950.50
    /// assert_eq!(price.minor(), 95050);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole taka.
    ///
    /// Catalog prices are whole amounts, so this is the usual constructor.
    /// Panics on overflow; use [`Money::checked_from_major`] for untrusted input.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * MINOR_PER_MAJOR)
    }

    /// Like [`Money::from_major`], but `None` when the amount does not fit.
    #[inline]
    pub const fn checked_from_major(major: i64) -> Option<Self> {
        match major.checked_mul(MINOR_PER_MAJOR) {
            Some(minor) => Some(Money(minor)),
            None => None,
        }
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts, only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -৳5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * MINOR_PER_MAJOR - minor)
        } else {
            Money(major * MINOR_PER_MAJOR + minor)
        }
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the whole-taka portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the poisha portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
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

    /// Multiplies money by a line quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Ruby Woo ৳1950 (sale)
    /// Quantity: 3
    ///      │
    ///      ▼
    /// multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: ৳5850
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders `৳950` for whole amounts and `৳950.50` otherwise.
///
/// For debugging and logs; the UI formats through
/// [`crate::config::StoreConfig::format_currency`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let major = self.major().abs();
        if self.minor_part() == 0 {
            write!(f, "{sign}{CURRENCY_SYMBOL}{major}")
        } else {
            write!(f, "{sign}{CURRENCY_SYMBOL}{major}.{:02}", self.minor_part())
        }
    }
}

/// Default money is zero.
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

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Multiplication by i64.
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

// =============================================================================
// Unit Tests
// =============================================================================
