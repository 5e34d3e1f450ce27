//! # Validity Scheduler
//!
//! Derives the date a subscription or licence lapses.
//!
//! ## Month-End Clamping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  issue date      + months   naive rollover        THIS MODULE           │
//! │  ──────────────  ────────   ──────────────────    ──────────────────    │
//! │  2024-01-31         1       2024-03-02  ❌        2024-02-29  ✅        │
//! │  2023-01-31         1       2023-03-03  ❌        2023-02-28  ✅        │
//! │  2024-08-31         1       2024-10-01  ❌        2024-09-30  ✅        │
//! │  2024-02-29        12       2025-03-01  ❌        2025-02-28  ✅        │
//! │  2024-01-15         3       2024-04-15            2024-04-15            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! When the target month is shorter than the issue day, the result is the
//! last day of the target month. It never rolls into the following month.

use chrono::{Months, NaiveDate};

use crate::error::{CoreError, CoreResult};
use crate::validation::validate_duration_months;

/// Adds `duration_months` calendar months to `issue_date`, clamping to the
/// end of the target month.
///
/// ## Example
/// ```rust
/// use bizdesk_core::validity::expiry_date;
/// use chrono::NaiveDate;
///
/// let issued = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// let expiry = expiry_date(issued, 1).unwrap();
/// assert_eq!(expiry, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
///
/// ## Errors
/// - `Validation` when `duration_months` is 0
/// - `DateOutOfRange` when the result is past chrono's last representable date
pub fn expiry_date(issue_date: NaiveDate, duration_months: u32) -> CoreResult<NaiveDate> {
    validate_duration_months(duration_months)?;

    // chrono clamps the day-of-month instead of overflowing
    issue_date
        .checked_add_months(Months::new(duration_months))
        .ok_or(CoreError::DateOutOfRange {
            issued: issue_date,
            months: duration_months,
        })
}

/// Whole days from `today` until `valid_until`; negative once expired.
pub fn days_remaining(valid_until: NaiveDate, today: NaiveDate) -> i64 {
    (valid_until - today).num_days()
}

/// A subscription is active up to and including its expiry day.
pub fn is_active(valid_until: NaiveDate, today: NaiveDate) -> bool {
    today <= valid_until
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn test_plain_month_addition() {
        assert_eq!(expiry_date(date(2024, 1, 15), 1).unwrap(), date(2024, 2, 15));
        assert_eq!(expiry_date(date(2024, 1, 15), 3).unwrap(), date(2024, 4, 15));
        assert_eq!(expiry_date(date(2024, 11, 30), 3).unwrap(), date(2025, 2, 28));
    }

    #[test]
    fn test_clamps_to_leap_february() {
        assert_eq!(expiry_date(date(2024, 1, 31), 1).unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_clamps_to_common_february() {
        assert_eq!(expiry_date(date(2023, 1, 31), 1).unwrap(), date(2023, 2, 28));
    }

    #[test]
    fn test_clamps_to_thirty_day_month() {
        assert_eq!(expiry_date(date(2024, 8, 31), 1).unwrap(), date(2024, 9, 30));
        assert_eq!(expiry_date(date(2024, 3, 31), 3).unwrap(), date(2024, 6, 30));
    }

    #[test]
    fn test_leap_day_plus_a_year() {
        assert_eq!(expiry_date(date(2024, 2, 29), 12).unwrap(), date(2025, 2, 28));
        assert_eq!(expiry_date(date(2024, 2, 29), 48).unwrap(), date(2028, 2, 29));
    }

    #[test]
    fn test_crosses_year_boundary() {
        assert_eq!(expiry_date(date(2024, 12, 31), 1).unwrap(), date(2025, 1, 31));
        assert_eq!(expiry_date(date(2024, 12, 31), 12).unwrap(), date(2025, 12, 31));
    }

    #[test]
    fn test_recomputation_is_stable() {
        let issued = date(2024, 5, 31);
        let first = expiry_date(issued, 1).unwrap();
        let second = expiry_date(issued, 1).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, date(2024, 6, 30));
    }

    #[test]
    fn test_zero_months_rejected() {
        assert!(matches!(
            expiry_date(date(2024, 1, 1), 0),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            expiry_date(NaiveDate::MAX, 1),
            Err(CoreError::DateOutOfRange { months: 1, .. })
        ));
    }

    #[test]
    fn test_days_remaining_and_active() {
        let until = date(2024, 2, 29);
        assert_eq!(days_remaining(until, date(2024, 2, 1)), 28);
        assert_eq!(days_remaining(until, until), 0);
        assert_eq!(days_remaining(until, date(2024, 3, 2)), -2);

        assert!(is_active(until, date(2024, 2, 29)));
        assert!(!is_active(until, date(2024, 3, 1)));
    }
}
