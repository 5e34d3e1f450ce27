//! # Commands Module
//!
//! One file per command group.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports, shared helpers)
//! ├── plans.rs    ◄─── `plans`
//! ├── pricing.rs  ◄─── `quote`, `quote-all`, `expiry`
//! └── invoice.rs  ◄─── `invoice`
//! ```
//!
//! Every command returns `Result<String, CliError>`: the text (or JSON) to
//! print, or the error to report. Nothing here writes to stdout directly.

pub mod invoice;
pub mod plans;
pub mod pricing;

use bizdesk_core::validation::parse_date;
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CliError;

/// Parses an optional date argument, falling back to `default`.
pub fn resolve_date(
    field: &str,
    input: Option<&str>,
    default: NaiveDate,
) -> Result<NaiveDate, CliError> {
    match input {
        Some(raw) => Ok(parse_date(field, raw)?),
        None => Ok(default),
    }
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_resolve_date() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        assert_eq!(resolve_date("issued", None, today).unwrap(), today);
        assert_eq!(
            resolve_date("issued", Some("31/01/2024"), today).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
        );

        let err = resolve_date("issued", Some("yesterday"), today).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
