//! # Line Item Calculator
//!
//! `line_total = quantity × unit_price × (1 − discount)`
//!
//! Quantity may be fractional (thousandths) and the discount carries four
//! decimals of a percent. The whole product is computed exactly in i128 and
//! rounded to the minor unit once, half to even.
//!
//! The caller recomputes a line from its full current values after every
//! field edit. There is no incremental update.

use tracing::warn;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{DiscountRate, LineItem, Quantity};
use crate::validation::{validate_discount, validate_quantity, validate_unit_price, ValidationResult};

/// Computes the total of one document line.
///
/// ## Errors
/// - quantity < 0 → `MustBeNonNegative { field: "quantity" }`
/// - unit price < 0 → `MustBeNonNegative { field: "unit price" }`
/// - discount > 100% → `OutOfRange { field: "discount" }`
/// - a product too large for the money type → `OutOfRange { field: "line total" }`
///
/// ## Example
/// ```rust
/// use bizdesk_core::line_item::compute_line_total;
/// use bizdesk_core::{DiscountRate, Money, Quantity};
///
/// let total = compute_line_total(
///     Quantity::from_units(2),
///     Money::from_major(1000),
///     DiscountRate::from_percent(10),
/// )
/// .unwrap();
/// assert_eq!(total, Money::from_major(1800));
/// ```
pub fn compute_line_total(
    quantity: Quantity,
    unit_price: Money,
    discount: DiscountRate,
) -> ValidationResult<Money> {
    let checked = validate_quantity(quantity)
        .and_then(|_| validate_unit_price(unit_price))
        .and_then(|_| validate_discount(discount));
    if let Err(err) = checked {
        warn!(
            quantity_milli = quantity.milli(),
            unit_price = unit_price.minor(),
            discount_ppm = discount.ppm(),
            %err,
            "rejected line"
        );
        return Err(err);
    }

    unit_price
        .checked_line_amount(quantity, discount)
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "line total".to_string(),
            min: 0,
            max: i64::MAX,
        })
}

impl LineItem {
    /// See [`compute_line_total`].
    pub fn line_total(&self) -> ValidationResult<Money> {
        compute_line_total(self.quantity, self.unit_price, self.discount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn units(n: i64) -> Quantity {
        Quantity::from_units(n)
    }

    #[test]
    fn test_line_with_discount() {
        let total = compute_line_total(units(2), Money::from_major(1000), DiscountRate::from_percent(10));
        assert_eq!(total, Ok(Money::from_major(1800)));
    }

    #[test]
    fn test_line_without_discount() {
        let line = LineItem::new(1, Money::from_major(500), DiscountRate::zero());
        assert_eq!(line.line_total(), Ok(Money::from_major(500)));
    }

    #[test]
    fn test_fractional_quantity() {
        // 1.5 hours at 1000 Kz
        let total = compute_line_total(
            Quantity::from_milli(1500),
            Money::from_major(1000),
            DiscountRate::zero(),
        );
        assert_eq!(total, Ok(Money::from_major(1500)));

        // 2.25 kg at 12.50 Kz, 10% off = 25.3125 Kz → 25.31
        let total = compute_line_total(
            Quantity::from_milli(2250),
            Money::from_minor(1250),
            DiscountRate::from_percent(10),
        );
        assert_eq!(total, Ok(Money::from_minor(2531)));
    }

    #[test]
    fn test_fine_grained_discount() {
        // 1000 Kz at 12.345% off = 876.55 Kz
        let total = compute_line_total(units(1), Money::from_major(1000), DiscountRate::from_ppm(123_450));
        assert_eq!(total, Ok(Money::from_minor(87_655)));
    }

    #[test]
    fn test_cleared_line_is_zero() {
        assert_eq!(
            compute_line_total(Quantity::zero(), Money::zero(), DiscountRate::zero()),
            Ok(Money::zero())
        );
        assert_eq!(LineItem::default().line_total(), Ok(Money::zero()));
    }

    #[test]
    fn test_full_discount() {
        let total = compute_line_total(units(3), Money::from_major(250), DiscountRate::from_percent(100));
        assert_eq!(total, Ok(Money::zero()));
    }

    #[test]
    fn test_half_minor_unit_rounds_to_even() {
        // 1 × 0.25 Kz at 50% = 12.5 cêntimos → 12
        let total = compute_line_total(units(1), Money::from_minor(25), DiscountRate::from_percent(50));
        assert_eq!(total, Ok(Money::from_minor(12)));

        // 1 × 0.27 Kz at 50% = 13.5 cêntimos → 14
        let total = compute_line_total(units(1), Money::from_minor(27), DiscountRate::from_percent(50));
        assert_eq!(total, Ok(Money::from_minor(14)));
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let err = compute_line_total(Quantity::from_milli(-500), Money::from_major(10), DiscountRate::zero())
            .unwrap_err();
        assert_eq!(err.field(), "quantity");
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = compute_line_total(units(1), Money::from_minor(-1), DiscountRate::zero()).unwrap_err();
        assert_eq!(err.field(), "unit price");
    }

    #[test]
    fn test_discount_above_hundred_rejected() {
        let err = compute_line_total(units(1), Money::from_major(10), DiscountRate::from_ppm(1_000_001))
            .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { ref field, .. } if field == "discount"));
    }

    #[test]
    fn test_overflow_rejected() {
        let err = compute_line_total(
            Quantity::from_milli(i64::MAX),
            Money::from_major(100),
            DiscountRate::zero(),
        )
        .unwrap_err();
        assert_eq!(err.field(), "line total");
    }

    proptest! {
        /// Valid lines are never negative and never exceed the undiscounted amount
        #[test]
        fn prop_line_total_bounded(
            quantity_milli in 0i64..=10_000_000,
            unit_minor in 0i64..=100_000_000,
            discount_ppm in 0u32..=1_000_000,
        ) {
            let price = Money::from_minor(unit_minor);
            let quantity = Quantity::from_milli(quantity_milli);
            let total = compute_line_total(quantity, price, DiscountRate::from_ppm(discount_ppm)).unwrap();
            let undiscounted = compute_line_total(quantity, price, DiscountRate::zero()).unwrap();

            prop_assert!(!total.is_negative());
            prop_assert!(total <= undiscounted);
        }

        /// Result is within half a minor unit of the exact formula
        #[test]
        fn prop_line_total_matches_formula(
            quantity_milli in 0i64..=10_000_000,
            unit_minor in 0i64..=100_000_000,
            discount_ppm in 0u32..=1_000_000,
        ) {
            let total = compute_line_total(
                Quantity::from_milli(quantity_milli),
                Money::from_minor(unit_minor),
                DiscountRate::from_ppm(discount_ppm),
            ).unwrap();

            let scale: i128 = 1_000 * 1_000_000;
            let exact = quantity_milli as i128 * unit_minor as i128 * (1_000_000 - discount_ppm as i128);
            let ours = total.minor() as i128 * scale;
            prop_assert!((ours - exact).abs() <= scale / 2);
        }

        /// Whole quantities agree with plain integer multiplication
        #[test]
        fn prop_whole_quantity_is_exact_product(
            quantity in 0i64..=10_000,
            unit_minor in 0i64..=100_000_000,
        ) {
            let total = compute_line_total(units(quantity), Money::from_minor(unit_minor), DiscountRate::zero())
                .unwrap();
            prop_assert_eq!(total, Money::from_minor(unit_minor) * quantity);
        }
    }
}
