//! # Domain Types
//!
//! Value objects shared by the calculators.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    PlanTier     │   │  BillingPeriod  │   │  PricingResult  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Basic          │   │  Monthly        │   │  monthly equiv. │       │
//! │  │  Premium        │   │  Quarterly      │   │  total due      │       │
//! │  │  Pro            │   │  Annual         │   │  valid until    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │ DocumentTotals  │   │ TaxRate /       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │ DiscountRate    │       │
//! │  │  quantity (‰)   │   │  subtotal       │   │  ─────────────  │       │
//! │  │  unit_price     │   │  tax            │   │  tax: bps       │       │
//! │  │  discount       │   │  total          │   │  discount: ppm  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All of these are transient: built from user input, recomputed on every
//! edit, and handed back to the caller. Nothing here has identity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

/// Basis points in 100%.
pub const FULL_BPS: u32 = 10_000;

/// Parts per million in 100%.
pub const FULL_PPM: u32 = 1_000_000;

/// Thousandths in one unit of quantity.
pub const MILLI_PER_UNIT: i64 = 1_000;

// =============================================================================
// Rates
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1400 bps = 14% (Angolan IVA)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

/// A percentage discount in parts per million of the amount.
///
/// Used both for the billing-period discount of a subscription and the
/// per-line discount of a sales document. `100_000` = 10% off; the form
/// accepts up to four decimals of a percent (`12.3456%` = `123_456`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount from parts per million. Range is checked by the
    /// calculators, not here.
    #[inline]
    pub const fn from_ppm(ppm: u32) -> Self {
        DiscountRate(ppm)
    }

    /// Creates a discount from basis points (`1250` = 12.5%).
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps * 100)
    }

    /// Creates a discount from a whole percentage (`10` = 10%).
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        DiscountRate(pct * 10_000)
    }

    #[inline]
    pub const fn ppm(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Returns the rate as a fraction of one (for display only).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / FULL_PPM as f64
    }

    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Subscription Catalogue Keys
// =============================================================================

/// Subscription service level. Prices live in [`crate::catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    Basic,
    Premium,
    Pro,
}

impl Default for PlanTier {
    fn default() -> Self {
        PlanTier::Basic
    }
}

/// Subscription commitment length. Durations and discounts live in
/// [`crate::catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BillingPeriod {
    Monthly,
    Quarterly,
    Annual,
}

impl Default for BillingPeriod {
    fn default() -> Self {
        BillingPeriod::Monthly
    }
}

/// Duration and discount attached to a billing period.
///
/// ## Invariants
/// - `duration_months >= 1`
/// - `discount` is in `[0%, 100%)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PeriodInfo {
    pub duration_months: u32,
    pub discount: DiscountRate,
}

// =============================================================================
// Pricing Result
// =============================================================================

/// The price of a subscription for one billing period.
///
/// ## Invariants
/// - `total_due >= 0`
/// - `monthly_equivalent = total_due / duration_months`, rounded to the
///   minor unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub tier: PlanTier,
    pub period: BillingPeriod,
    /// Base price × duration, before the period discount.
    pub gross: Money,
    /// What the period discount took off `gross`.
    pub discount_amount: Money,
    pub monthly_equivalent: Money,
    pub total_due: Money,
    #[ts(as = "String")]
    pub issued_on: NaiveDate,
    #[ts(as = "String")]
    pub valid_until: NaiveDate,
}

// =============================================================================
// Sales Document Types
// =============================================================================

/// How many units a document line sells, in thousandths.
///
/// Services go by the hour and goods by weight, so `1.5` and `2.25` are
/// ordinary quantities. Serializes as the raw thousandths integer, the way
/// [`Money`] serializes as minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quantity(i64);

impl Quantity {
    /// Whole units (`3` = three units).
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Quantity(units * MILLI_PER_UNIT)
    }

    /// Thousandths of a unit (`1500` = one and a half units).
    #[inline]
    pub const fn from_milli(milli: i64) -> Self {
        Quantity(milli)
    }

    #[inline]
    pub const fn milli(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::zero()
    }
}

impl From<i64> for Quantity {
    fn from(units: i64) -> Self {
        Quantity::from_units(units)
    }
}

/// Shortest decimal form: `2`, `1.5`, `0.125`.
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        let unit = MILLI_PER_UNIT.unsigned_abs();
        let (whole, frac) = (abs / unit, abs % unit);

        let sign = if self.0 < 0 { "-" } else { "" };
        let text = if frac == 0 {
            format!("{}{}", sign, whole)
        } else {
            let frac = format!("{:03}", frac);
            format!("{}{}.{}", sign, whole, frac.trim_end_matches('0'))
        };
        f.pad(&text)
    }
}

/// One row of a sales document.
///
/// ## Invariants (checked by [`crate::line_item::compute_line_total`])
/// - `quantity >= 0`
/// - `unit_price >= 0`
/// - `discount` within 0%..=100%
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub quantity: Quantity,
    pub unit_price: Money,
    #[serde(default)]
    pub discount: DiscountRate,
}

impl LineItem {
    /// `quantity` accepts a [`Quantity`] or a whole number of units.
    pub fn new(quantity: impl Into<Quantity>, unit_price: Money, discount: DiscountRate) -> Self {
        LineItem {
            quantity: quantity.into(),
            unit_price,
            discount,
        }
    }
}

/// Document-level totals.
///
/// `total = subtotal + tax`; `tax = subtotal × tax_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTotals {
    pub subtotal: Money,
    pub tax_rate: TaxRate,
    pub tax: Money,
    pub total: Money,
}

/// Kind of sales document the invoice form can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// "Fatura/Recibo": invoice and receipt in one, paid on issue.
    InvoiceReceipt,
    /// "Fatura Proforma": a quote; carries no payment.
    Proforma,
}

impl DocumentKind {
    /// Label printed on the document.
    pub const fn label(&self) -> &'static str {
        match self {
            DocumentKind::InvoiceReceipt => "Fatura/Recibo",
            DocumentKind::Proforma => "Fatura Proforma",
        }
    }
}

impl Default for DocumentKind {
    fn default() -> Self {
        DocumentKind::InvoiceReceipt
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
