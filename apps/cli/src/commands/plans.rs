//! # Plan Catalogue
//!
//! `bizdesk plans`: the tiers the registration wizard offers.

use bizdesk_core::{BillingPeriod, DiscountRate, Money, PlanTier};
use serde::Serialize;

use crate::config::CliConfig;
use crate::error::CliError;

use super::to_json;

/// Plan as shown in the catalogue listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanView {
    pub tier: PlanTier,
    pub label: &'static str,
    pub monthly_price: Money,
    pub features: Vec<&'static str>,
}

/// Billing period as shown in the catalogue listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodView {
    pub period: BillingPeriod,
    pub label: &'static str,
    pub duration_months: u32,
    /// Parts per million, as every discount rate serializes.
    pub discount: DiscountRate,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub currency: String,
    pub plans: Vec<PlanView>,
    pub periods: Vec<PeriodView>,
}

pub fn catalog_view(config: &CliConfig) -> CatalogView {
    CatalogView {
        currency: config.currency_code.clone(),
        plans: PlanTier::ALL
            .into_iter()
            .map(|tier| PlanView {
                tier,
                label: tier.label(),
                monthly_price: tier.base_price(),
                features: tier.features(),
            })
            .collect(),
        periods: BillingPeriod::ALL
            .into_iter()
            .map(|period| PeriodView {
                period,
                label: period.label(),
                duration_months: period.duration_months(),
                discount: period.discount(),
            })
            .collect(),
    }
}

/// Lists plans and billing periods.
pub fn list_plans(config: &CliConfig, json: bool) -> Result<String, CliError> {
    let view = catalog_view(config);
    if json {
        return to_json(&view);
    }

    let mut out = String::new();
    for plan in &view.plans {
        out.push_str(&format!(
            "{:<10} {:>16} / mês\n",
            plan.label,
            config.format_currency(plan.monthly_price)
        ));
        for feature in &plan.features {
            out.push_str(&format!("  - {}\n", feature));
        }
    }

    out.push('\n');
    for period in &view.periods {
        out.push_str(&format!(
            "{:<10} {:>2} meses  desconto {}%\n",
            period.label,
            period.duration_months,
            period.discount.percentage()
        ));
    }

    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_view() {
        let view = catalog_view(&CliConfig::default());

        assert_eq!(view.plans.len(), 3);
        assert_eq!(view.plans[0].label, "Básico");
        assert_eq!(view.plans[2].monthly_price, Money::from_major(75000));
        assert_eq!(view.periods[2].discount, DiscountRate::from_percent(15));
    }

    #[test]
    fn test_text_listing() {
        let out = list_plans(&CliConfig::default(), false).unwrap();

        assert!(out.contains("Premium"));
        assert!(out.contains("35 000,00 Kz"));
        assert!(out.contains("Inventário Avançado"));
        assert!(out.contains("Trimestral"));
        assert!(out.contains("desconto 5%"));
    }
}
