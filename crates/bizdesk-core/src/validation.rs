//! # Validation Module
//!
//! Range checks for calculator inputs and parsers for raw form fields.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Dashboard form                                               │
//! │  ├── Input masks, immediate feedback                                   │
//! │  └── Raw strings ("1000,50", "12.5", "")                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: parse_* (THIS MODULE)                                        │
//! │  ├── String → Money / DiscountRate / Quantity / NaiveDate              │
//! │  └── Empty input is an error, never zero                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: validate_* (THIS MODULE, called by the calculators)          │
//! │  └── Sign and range rules on typed values                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bizdesk_core::validation::{parse_amount, parse_percentage, parse_quantity};
//!
//! let price = parse_amount("unit price", "1000,50").unwrap();
//! assert_eq!(price.minor(), 100_050);
//!
//! let discount = parse_percentage("discount", "12.5").unwrap();
//! assert_eq!(discount.ppm(), 125_000);
//!
//! let hours = parse_quantity("quantity", "1,5").unwrap();
//! assert_eq!(hours.milli(), 1500);
//!
//! assert!(parse_amount("unit price", "").is_err());
//! ```

use chrono::NaiveDate;
use std::num::NonZeroU32;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{DiscountRate, Quantity, TaxRate, FULL_BPS, FULL_PPM};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (a cleared line)
/// - Fractions are allowed (hours, kilograms)
pub fn validate_quantity(qty: Quantity) -> ValidationResult<()> {
    if qty.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items, blank lines)
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "unit price".to_string(),
        });
    }

    Ok(())
}

/// Validates a line discount.
///
/// ## Rules
/// - Must be between 0% and 100% inclusive
pub fn validate_discount(discount: DiscountRate) -> ValidationResult<()> {
    if discount.ppm() > FULL_PPM {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates a tax rate.
///
/// ## Rules
/// - Must be between 0% and 100% inclusive
pub fn validate_tax_rate(rate: TaxRate) -> ValidationResult<()> {
    if rate.bps() > FULL_BPS {
        return Err(ValidationError::OutOfRange {
            field: "tax rate".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates a contract duration.
///
/// ## Rules
/// - At least one month
pub fn validate_duration_months(months: u32) -> ValidationResult<NonZeroU32> {
    NonZeroU32::new(months).ok_or_else(|| ValidationError::MustBePositive {
        field: "duration months".to_string(),
    })
}

// =============================================================================
// Form-Field Parsers
// =============================================================================

/// Parses a decimal string into an integer scaled by `10^scale`.
///
/// Accepts an optional sign, and either `.` or `,` as the decimal
/// separator (the dashboard runs with a Portuguese locale).
fn parse_fixed_point(field: &str, input: &str, scale: u32) -> ValidationResult<i64> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let (whole, frac) = digits
        .split_once(|c: char| c == '.' || c == ',')
        .unwrap_or((digits, ""));

    if whole.is_empty() && frac.is_empty() {
        return Err(invalid("expected a number"));
    }
    if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid("expected a number"));
    }
    if frac.len() > scale as usize {
        return Err(if scale == 0 {
            invalid("must be a whole number")
        } else {
            invalid(&format!("at most {} decimal places", scale))
        });
    }

    let too_large = || invalid("number is too large");
    let mut value: i64 = 0;
    for c in whole.chars().chain(frac.chars()) {
        let digit = i64::from(c as u8 - b'0');
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(too_large)?;
    }
    for _ in frac.len()..scale as usize {
        value = value.checked_mul(10).ok_or_else(too_large)?;
    }

    Ok(if negative { -value } else { value })
}

/// Parses a money amount in major units ("1000", "1000.50", "1000,5").
///
/// Signs are kept; the calculators decide whether a negative is allowed.
pub fn parse_amount(field: &str, input: &str) -> ValidationResult<Money> {
    parse_fixed_point(field, input, 2).map(Money::from_minor)
}

/// Parses a percentage ("10", "12.5", "12,345") into a discount rate.
///
/// ## Rules
/// - Required
/// - At most four decimal places (parts-per-million precision)
/// - Between 0 and 100 inclusive
pub fn parse_percentage(field: &str, input: &str) -> ValidationResult<DiscountRate> {
    let ppm = parse_fixed_point(field, input, 4)?;
    if !(0..=i64::from(FULL_PPM)).contains(&ppm) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(DiscountRate::from_ppm(ppm as u32))
}

/// Parses a tax percentage ("14", "6.5") into basis points.
pub fn parse_tax_rate(field: &str, input: &str) -> ValidationResult<TaxRate> {
    let bps = parse_fixed_point(field, input, 2)?;
    if !(0..=i64::from(FULL_BPS)).contains(&bps) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(TaxRate::from_bps(bps as u32))
}

/// Parses a quantity with up to three decimal places ("3", "1.5", "0,125").
pub fn parse_quantity(field: &str, input: &str) -> ValidationResult<Quantity> {
    parse_fixed_point(field, input, 3).map(Quantity::from_milli)
}

/// Parses a calendar date, ISO (`2024-01-31`) or Portuguese (`31/01/2024`).
pub fn parse_date(field: &str, input: &str) -> ValidationResult<NaiveDate> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected YYYY-MM-DD or DD/MM/YYYY".to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
