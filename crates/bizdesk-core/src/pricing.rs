//! # Pricing Calculator
//!
//! Prices a subscription for the company-registration wizard.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PlanTier ──► base_price ─────┐                                        │
//! │                               ▼                                        │
//! │  BillingPeriod ──► months ──► gross = base × months                   │
//! │        │                      │                                        │
//! │        └──► discount ───────► total_due = gross × (1 − discount)       │
//! │                               │                                        │
//! │                               ▼                                        │
//! │                        monthly_equivalent = total_due / months         │
//! │                                                                         │
//! │  issue date ──► months ──► valid_until (clamped, see validity)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The wizard calls this again every time the plan or period changes; there
//! is no cached state between calls.

use chrono::NaiveDate;
use tracing::debug;

use crate::catalog::{base_price, period_info};
use crate::error::CoreResult;
use crate::types::{BillingPeriod, PeriodInfo, PlanTier, PricingResult};
use crate::validation::validate_duration_months;
use crate::validity::expiry_date;

/// Prices `tier` for one `period` starting on `issue_date`.
///
/// ## Example
/// ```rust
/// use bizdesk_core::pricing::compute_pricing;
/// use bizdesk_core::{BillingPeriod, Money, PlanTier};
/// use chrono::NaiveDate;
///
/// let issued = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// let quote = compute_pricing(PlanTier::Basic, BillingPeriod::Annual, issued).unwrap();
///
/// assert_eq!(quote.total_due, Money::from_major(153_000));
/// assert_eq!(quote.monthly_equivalent, Money::from_major(12_750));
/// assert_eq!(quote.valid_until, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
/// ```
pub fn compute_pricing(
    tier: PlanTier,
    period: BillingPeriod,
    issue_date: NaiveDate,
) -> CoreResult<PricingResult> {
    let result = price_period(tier, period, period_info(period), issue_date)?;

    debug!(
        tier = tier.code(),
        period = period.code(),
        total_due = result.total_due.minor(),
        valid_until = %result.valid_until,
        "priced subscription"
    );

    Ok(result)
}

fn price_period(
    tier: PlanTier,
    period: BillingPeriod,
    info: PeriodInfo,
    issue_date: NaiveDate,
) -> CoreResult<PricingResult> {
    let months = validate_duration_months(info.duration_months)?;
    let gross = base_price(tier).multiply_quantity(i64::from(months.get()));
    let discount_amount = gross.discount_amount(info.discount);
    let total_due = gross - discount_amount;
    let monthly_equivalent = total_due.divide_evenly(months);
    let valid_until = expiry_date(issue_date, months.get())?;

    Ok(PricingResult {
        tier,
        period,
        gross,
        discount_amount,
        monthly_equivalent,
        total_due,
        issued_on: issue_date,
        valid_until,
    })
}

/// Prices every tier for every period, tier-major in catalogue order.
///
/// This is the grid the plan-selection step renders.
pub fn quote_all(issue_date: NaiveDate) -> CoreResult<Vec<PricingResult>> {
    PlanTier::ALL
        .into_iter()
        .flat_map(|tier| {
            BillingPeriod::ALL
                .into_iter()
                .map(move |period| compute_pricing(tier, period, issue_date))
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
