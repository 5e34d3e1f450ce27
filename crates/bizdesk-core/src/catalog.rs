//! # Plan Catalogue
//!
//! Static price list for the subscription wizard.
//!
//! ```text
//! ┌──────────────────────────────┐   ┌──────────────────────────────────────┐
//! │  Tier      Base / month      │   │  Period      Months   Discount       │
//! │  ───────   ─────────────     │   │  ──────────  ──────   ────────       │
//! │  Basic        15 000 Kz      │   │  Monthly        1        0%          │
//! │  Premium      35 000 Kz      │   │  Quarterly      3        5%          │
//! │  Pro          75 000 Kz      │   │  Annual        12       15%          │
//! └──────────────────────────────┘   └──────────────────────────────────────┘
//! ```
//!
//! Lookups on the enums are total. The only way to hit an unknown plan or
//! period is parsing a label that came from outside, which is where
//! [`CoreError::UnknownPlan`] / [`CoreError::UnknownPeriod`] are raised.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::money::Money;
use crate::types::{BillingPeriod, DiscountRate, PeriodInfo, PlanTier};

/// Base monthly price of a plan tier.
pub fn base_price(tier: PlanTier) -> Money {
    match tier {
        PlanTier::Basic => Money::from_major(15_000),
        PlanTier::Premium => Money::from_major(35_000),
        PlanTier::Pro => Money::from_major(75_000),
    }
}

/// Duration and discount of a billing period.
pub fn period_info(period: BillingPeriod) -> PeriodInfo {
    let (duration_months, discount) = match period {
        BillingPeriod::Monthly => (1, DiscountRate::zero()),
        BillingPeriod::Quarterly => (3, DiscountRate::from_percent(5)),
        BillingPeriod::Annual => (12, DiscountRate::from_percent(15)),
    };

    PeriodInfo {
        duration_months,
        discount,
    }
}

// =============================================================================
// PlanTier
// =============================================================================

impl PlanTier {
    /// Every tier, in the order the wizard shows them.
    pub const ALL: [PlanTier; 3] = [PlanTier::Basic, PlanTier::Premium, PlanTier::Pro];

    #[inline]
    pub fn base_price(&self) -> Money {
        base_price(*self)
    }

    /// Label stored on the company record and shown in the dashboard.
    pub const fn label(&self) -> &'static str {
        match self {
            PlanTier::Basic => "Básico",
            PlanTier::Premium => "Premium",
            PlanTier::Pro => "Pro",
        }
    }

    /// Stable lowercase identifier.
    pub const fn code(&self) -> &'static str {
        match self {
            PlanTier::Basic => "basic",
            PlanTier::Premium => "premium",
            PlanTier::Pro => "pro",
        }
    }

    /// Feature bullets advertised for the tier.
    pub fn features(&self) -> Vec<&'static str> {
        let mut features = vec!["Software Certificado AGT", "Multi-utilizador"];
        if *self != PlanTier::Basic {
            features.push("Inventário Avançado");
        }
        features
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts the stored label or the English code, case-insensitively.
impl FromStr for PlanTier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        PlanTier::ALL
            .into_iter()
            .find(|tier| {
                needle.eq_ignore_ascii_case(tier.code())
                    || needle.to_lowercase() == tier.label().to_lowercase()
            })
            .or_else(|| needle.eq_ignore_ascii_case("basico").then_some(PlanTier::Basic))
            .ok_or_else(|| {
                tracing::warn!(plan = %needle, "rejected unknown plan tier");
                CoreError::UnknownPlan(needle.to_string())
            })
    }
}

// =============================================================================
// BillingPeriod
// =============================================================================

impl BillingPeriod {
    /// Every period, shortest first.
    pub const ALL: [BillingPeriod; 3] = [
        BillingPeriod::Monthly,
        BillingPeriod::Quarterly,
        BillingPeriod::Annual,
    ];

    #[inline]
    pub fn info(&self) -> PeriodInfo {
        period_info(*self)
    }

    #[inline]
    pub fn duration_months(&self) -> u32 {
        self.info().duration_months
    }

    #[inline]
    pub fn discount(&self) -> DiscountRate {
        self.info().discount
    }

    pub const fn label(&self) -> &'static str {
        match self {
            BillingPeriod::Monthly => "Mensal",
            BillingPeriod::Quarterly => "Trimestral",
            BillingPeriod::Annual => "Anual",
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            BillingPeriod::Monthly => "monthly",
            BillingPeriod::Quarterly => "quarterly",
            BillingPeriod::Annual => "annual",
        }
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BillingPeriod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        BillingPeriod::ALL
            .into_iter()
            .find(|period| {
                needle.eq_ignore_ascii_case(period.code())
                    || needle.eq_ignore_ascii_case(period.label())
            })
            .ok_or_else(|| {
                tracing::warn!(period = %needle, "rejected unknown billing period");
                CoreError::UnknownPeriod(needle.to_string())
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
