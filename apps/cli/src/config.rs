//! # Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BIZDESK_*`)
//! 2. Defaults (this file)
//!
//! Read-only after loading; commands receive it by reference.

use bizdesk_core::validation::parse_tax_rate;
use bizdesk_core::{Money, TaxRate, VAT_RATE};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol, printed after the amount
    pub currency_symbol: String,

    /// VAT applied to sales documents
    pub vat_rate: TaxRate,

    /// How dates are printed
    pub date_format: DateFormat,
}

/// Output format for calendar dates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    /// `31/01/2024`, as the dashboard shows it
    #[default]
    Pt,

    /// `2024-01-31`, as records are stored
    Iso,
}

impl Default for CliConfig {
    /// Kwanza, 14% IVA, Portuguese dates.
    fn default() -> Self {
        CliConfig {
            currency_code: "AOA".to_string(),
            currency_symbol: "Kz".to_string(),
            vat_rate: VAT_RATE,
            date_format: DateFormat::Pt,
        }
    }
}

impl CliConfig {
    /// Loads configuration from the process environment.
    ///
    /// ## Environment Variables
    /// - `BIZDESK_CURRENCY_CODE`: Override currency code
    /// - `BIZDESK_CURRENCY_SYMBOL`: Override currency symbol
    /// - `BIZDESK_VAT_RATE`: VAT percentage (e.g., "14")
    /// - `BIZDESK_DATE_FORMAT`: `pt` or `iso`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CliConfig::default();

        if let Some(code) = lookup("BIZDESK_CURRENCY_CODE") {
            config.currency_code = code;
        }

        if let Some(symbol) = lookup("BIZDESK_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(rate) = lookup("BIZDESK_VAT_RATE") {
            config.vat_rate = parse_tax_rate("BIZDESK_VAT_RATE", &rate)
                .map_err(|e| ConfigError::InvalidValue("BIZDESK_VAT_RATE".to_string(), e.to_string()))?;
        }

        if let Some(format) = lookup("BIZDESK_DATE_FORMAT") {
            config.date_format = match format.trim().to_ascii_lowercase().as_str() {
                "pt" => DateFormat::Pt,
                "iso" => DateFormat::Iso,
                other => {
                    return Err(ConfigError::InvalidValue(
                        "BIZDESK_DATE_FORMAT".to_string(),
                        format!("expected 'pt' or 'iso', got '{}'", other),
                    ))
                }
            };
        }

        Ok(config)
    }

    /// Formats an amount with space-grouped thousands and a decimal comma.
    ///
    /// ## Example
    /// ```rust
    /// use bizdesk_cli::config::CliConfig;
    /// use bizdesk_core::Money;
    ///
    /// let config = CliConfig::default();
    /// assert_eq!(config.format_currency(Money::from_major(153000)), "153 000,00 Kz");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let digits = amount.major().abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(c);
        }

        format!(
            "{}{},{:02} {}",
            if amount.is_negative() { "-" } else { "" },
            grouped,
            amount.minor_part(),
            self.currency_symbol
        )
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        match self.date_format {
            DateFormat::Pt => date.format("%d/%m/%Y").to_string(),
            DateFormat::Iso => date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.currency_code, "AOA");
        assert_eq!(config.vat_rate, VAT_RATE);
        assert_eq!(config.date_format, DateFormat::Pt);
    }

    #[test]
    fn test_overrides() {
        let config = CliConfig::from_lookup(lookup_from(&[
            ("BIZDESK_CURRENCY_CODE", "EUR"),
            ("BIZDESK_CURRENCY_SYMBOL", "€"),
            ("BIZDESK_VAT_RATE", "23"),
            ("BIZDESK_DATE_FORMAT", "ISO"),
        ]))
        .unwrap();

        assert_eq!(config.currency_code, "EUR");
        assert_eq!(config.vat_rate.bps(), 2300);
        assert_eq!(config.date_format, DateFormat::Iso);
        assert_eq!(config.format_currency(Money::from_minor(150)), "1,50 €");
    }

    #[test]
    fn test_invalid_vat_rate() {
        let err = CliConfig::from_lookup(lookup_from(&[("BIZDESK_VAT_RATE", "140")])).unwrap_err();
        assert!(err.to_string().starts_with("Invalid value for BIZDESK_VAT_RATE"));

        assert!(CliConfig::from_lookup(lookup_from(&[("BIZDESK_VAT_RATE", "")])).is_err());
    }

    #[test]
    fn test_invalid_date_format() {
        assert!(CliConfig::from_lookup(lookup_from(&[("BIZDESK_DATE_FORMAT", "us")])).is_err());
    }

    #[test]
    fn test_format_currency() {
        let config = CliConfig::default();
        assert_eq!(config.format_currency(Money::from_major(2622)), "2 622,00 Kz");
        assert_eq!(config.format_currency(Money::from_major(765000)), "765 000,00 Kz");
        assert_eq!(config.format_currency(Money::from_minor(1)), "0,01 Kz");
        assert_eq!(config.format_currency(Money::from_minor(-123456)), "-1 234,56 Kz");
        assert_eq!(config.format_currency(Money::zero()), "0,00 Kz");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(CliConfig::default().format_date(date), "29/02/2024");

        let iso = CliConfig {
            date_format: DateFormat::Iso,
            ..CliConfig::default()
        };
        assert_eq!(iso.format_date(date), "2024-02-29");
    }
}
