//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In the browser form that used to compute these totals:                 │
//! │    2300 * 1.14 = 2621.9999999999995  ❌ WRONG!                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (cêntimos)                           │
//! │    230000 cêntimos × 1400 bp / 10000 = 32200 cêntimos of VAT            │
//! │    Every rate multiplication is rounded once, half-to-even             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bizdesk_core::money::Money;
//!
//! // Catalogue prices are whole Kwanza
//! let basic = Money::from_major(15000);
//! assert_eq!(basic.minor(), 1_500_000);
//!
//! // Arithmetic operations
//! let doubled = basic * 2;
//! let total = basic + Money::from_minor(50);
//! assert_eq!(doubled.major(), 30000);
//! assert_eq!(total.minor(), 1_500_050);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::num::NonZeroU32;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::{DiscountRate, Quantity, TaxRate, FULL_PPM, MILLI_PER_UNIT};

/// Minor units per major unit (100 cêntimos = 1 Kwanza).
pub const MINOR_PER_MAJOR: i64 = 100;

/// Denominator of a basis-point rate (10000 bp = 100%).
pub(crate) const BPS_DENOMINATOR: i128 = 10_000;

/// Denominator of a parts-per-million rate.
pub(crate) const PPM_DENOMINATOR: i128 = FULL_PPM as i128;

// =============================================================================
// Rounding
// =============================================================================

/// Divides `numerator` by a positive `denominator`, rounding half to even.
///
/// ## Bankers Rounding Explained
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────┐
/// │  Standard rounding always rounds 0.5 UP, causing systematic bias:  │
/// │    0.5 → 1, 1.5 → 2, 2.5 → 3, 3.5 → 4 (always up = +bias)         │
/// │                                                                     │
/// │  Bankers Rounding rounds 0.5 to nearest EVEN number:               │
/// │    0.5 → 0, 1.5 → 2, 2.5 → 2, 3.5 → 4 (alternates = no bias)      │
/// └─────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Uses floored division so negative amounts (credit notes) round with the
/// same rule.
pub(crate) fn div_round_half_even(numerator: i128, denominator: i128) -> i128 {
    debug_assert!(denominator > 0, "denominator must be positive");

    let quotient = numerator.div_euclid(denominator);
    let remainder = numerator.rem_euclid(denominator);
    let twice = remainder * 2;

    if twice > denominator || (twice == denominator && quotient % 2 != 0) {
        quotient + 1
    } else {
        quotient
    }
}

/// Applies a basis-point rate to an amount of minor units.
fn apply_bps(minor: i64, bps: u32) -> i64 {
    div_round_half_even(minor as i128 * bps as i128, BPS_DENOMINATOR) as i64
}

/// Applies a parts-per-million rate to an amount of minor units.
fn apply_ppm(minor: i64, ppm: u32) -> i64 {
    div_round_half_even(minor as i128 * ppm as i128, PPM_DENOMINATOR) as i64
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in minor units of the local currency.
///
/// ## Design Decisions
/// - **i64 (signed)**: credit notes and corrections may go negative; the
///   calculators themselves reject negative inputs
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serializes as the raw minor-unit integer**
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  PlanTier.base_price ──► PricingResult.total_due / monthly_equivalent  │
/// │                                                                         │
/// │  LineItem.unit_price ──► line total ──► DocumentTotals.subtotal        │
/// │                                              │                          │
/// │                                              ▼                          │
/// │                                    VAT ──► DocumentTotals.total         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (cêntimos).
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole major units (Kwanza).
    ///
    /// ## Example
    /// ```rust
    /// use bizdesk_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(35000).minor(), 3_500_000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * MINOR_PER_MAJOR)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the whole major-unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor-unit portion (always 0-99).
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

    /// The value as a floating point number of major units. Display only.
    #[inline]
    pub fn as_major_f64(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    /// Calculates tax on this amount, rounded half to even.
    ///
    /// ## Example
    /// ```rust
    /// use bizdesk_core::money::Money;
    /// use bizdesk_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_major(2300);
    /// let vat = subtotal.calculate_tax(TaxRate::from_bps(1400)); // 14%
    /// assert_eq!(vat, Money::from_major(322));
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(apply_bps(self.0, rate.bps()))
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Prices `quantity` units at this unit price less `discount`, rounding
    /// once, half to even, at the end.
    ///
    /// Returns `None` when the result does not fit the money type.
    ///
    /// ## Example
    /// ```rust
    /// use bizdesk_core::money::Money;
    /// use bizdesk_core::types::{DiscountRate, Quantity};
    ///
    /// // 1.5 h at 1000 Kz, 10% off
    /// let total = Money::from_major(1000)
    ///     .checked_line_amount(Quantity::from_milli(1500), DiscountRate::from_percent(10));
    /// assert_eq!(total, Some(Money::from_major(1350)));
    /// ```
    pub fn checked_line_amount(&self, quantity: Quantity, discount: DiscountRate) -> Option<Money> {
        let kept = PPM_DENOMINATOR - discount.ppm() as i128;
        let numerator = (self.0 as i128)
            .checked_mul(quantity.milli() as i128)?
            .checked_mul(kept)?;
        let rounded = div_round_half_even(numerator, MILLI_PER_UNIT as i128 * PPM_DENOMINATOR);
        i64::try_from(rounded).ok().map(Money)
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Returns the amount left after a percentage discount.
    ///
    /// The discount amount is rounded half to even and then subtracted, so
    /// `discounted + discount_amount == original` always holds.
    ///
    /// ## Example
    /// ```rust
    /// use bizdesk_core::money::Money;
    /// use bizdesk_core::types::DiscountRate;
    ///
    /// let gross = Money::from_major(2000);
    /// let net = gross.apply_discount(DiscountRate::from_percent(10));
    /// assert_eq!(net, Money::from_major(1800));
    /// ```
    pub fn apply_discount(&self, discount: DiscountRate) -> Money {
        Money(self.0 - self.discount_amount(discount).0)
    }

    /// The amount a discount takes off this value, rounded half to even.
    pub fn discount_amount(&self, discount: DiscountRate) -> Money {
        Money(apply_ppm(self.0, discount.ppm()))
    }

    /// Splits this amount evenly over `parts`, rounded half to even.
    ///
    /// Used for the monthly equivalent of a multi-month subscription.
    pub fn divide_evenly(&self, parts: NonZeroU32) -> Money {
        Money(div_round_half_even(self.0 as i128, i128::from(parts.get())) as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly rendering with the Kwanza suffix. Use the application's
/// configured formatter for anything user-facing.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02} Kz",
            sign,
            self.major().abs(),
            self.minor_part()
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
