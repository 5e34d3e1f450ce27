//! # Pricing Commands
//!
//! `bizdesk quote`, `bizdesk quote-all` and `bizdesk expiry`.

use bizdesk_core::validity::{days_remaining, expiry_date, is_active};
use bizdesk_core::{compute_pricing, BillingPeriod, PlanTier, PricingResult};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::error::CliError;

use super::to_json;

/// Quotes one plan for one billing period.
///
/// Plan and period are matched by code or label, case-insensitively.
pub fn quote(
    config: &CliConfig,
    plan: &str,
    period: &str,
    issued: NaiveDate,
    json: bool,
) -> Result<String, CliError> {
    let tier: PlanTier = plan.parse()?;
    let period: BillingPeriod = period.parse()?;

    let result = compute_pricing(tier, period, issued)?;
    info!(
        plan = tier.code(),
        period = period.code(),
        total_due = result.total_due.minor(),
        "Quoted subscription"
    );

    if json {
        return to_json(&result);
    }
    Ok(render_quote(config, &result))
}

/// Quotes every tier for every period.
pub fn quote_all(config: &CliConfig, issued: NaiveDate, json: bool) -> Result<String, CliError> {
    let results = bizdesk_core::quote_all(issued)?;
    if json {
        return to_json(&results);
    }

    let mut out = format!(
        "{:<10} {:<11} {:>18} {:>18} {:>11}\n",
        "Plano", "Período", "Total", "Por mês", "Válido até"
    );
    for result in &results {
        out.push_str(&format!(
            "{:<10} {:<11} {:>18} {:>18} {:>11}\n",
            result.tier.label(),
            result.period.label(),
            config.format_currency(result.total_due),
            config.format_currency(result.monthly_equivalent),
            config.format_date(result.valid_until),
        ));
    }
    Ok(out.trim_end().to_string())
}

/// Expiry of a subscription relative to `today`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryView {
    pub issued_on: NaiveDate,
    pub duration_months: u32,
    pub valid_until: NaiveDate,
    pub days_remaining: i64,
    pub active: bool,
}

/// Computes when a subscription issued on `issued` expires.
pub fn expiry(
    config: &CliConfig,
    issued: NaiveDate,
    months: u32,
    today: NaiveDate,
    json: bool,
) -> Result<String, CliError> {
    let valid_until = expiry_date(issued, months)?;
    let view = ExpiryView {
        issued_on: issued,
        duration_months: months,
        valid_until,
        days_remaining: days_remaining(valid_until, today),
        active: is_active(valid_until, today),
    };

    if json {
        return to_json(&view);
    }

    Ok(format!(
        "Emitido em:   {}\nDuração:      {} meses\nVálido até:   {}\nDias em falta: {}{}",
        config.format_date(view.issued_on),
        view.duration_months,
        config.format_date(view.valid_until),
        view.days_remaining,
        if view.active { "" } else { " (expirado)" }
    ))
}

fn render_quote(config: &CliConfig, result: &PricingResult) -> String {
    let discount = result.period.discount();
    let mut lines = vec![
        format!("Plano:        {} ({})", result.tier, result.period),
        format!("Bruto:        {}", config.format_currency(result.gross)),
    ];
    if !discount.is_zero() {
        lines.push(format!(
            "Desconto {}%: -{}",
            discount.percentage(),
            config.format_currency(result.discount_amount)
        ));
    }
    lines.push(format!("Total:        {}", config.format_currency(result.total_due)));
    lines.push(format!(
        "Por mês:      {}",
        config.format_currency(result.monthly_equivalent)
    ));
    lines.push(format!("Válido até:   {}", config.format_date(result.valid_until)));
    lines.join("\n")
}
