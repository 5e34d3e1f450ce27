//! # Sales Documents
//!
//! Document-level aggregation and the draft editor behind the invoice form.
//!
//! ## Aggregation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  line 0 ──► compute_line_total ──┐                                     │
//! │  line 1 ──► compute_line_total ──┼──► subtotal = Σ line totals         │
//! │  line n ──► compute_line_total ──┘        │                            │
//! │                                           ▼                            │
//! │                              tax   = subtotal × 14% (IVA)              │
//! │                              total = subtotal + tax                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Draft Editing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form Action            DraftDocument            Invariant              │
//! │  ───────────            ─────────────            ─────────              │
//! │  Open form ───────────► new()                    one blank line         │
//! │  "+ line" ────────────► add_line()                                      │
//! │  Edit a cell ─────────► update_line()            validated, no coercion │
//! │  Trash icon ──────────► remove_line()            last line stays        │
//! │  Render totals ───────► totals()                 full recomputation     │
//! │  "Emitir" ────────────► ensure_issuable()        total > 0              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The draft is owned by the caller (the form session). Nothing here keeps a
//! reference to it between calls, and totals are never cached.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{DiscountRate, DocumentKind, DocumentTotals, LineItem, Quantity, TaxRate};
use crate::validation::validate_tax_rate;

/// Flat value-added tax applied to every sales document (14%).
pub const VAT_RATE: TaxRate = TaxRate::from_bps(1400);

// =============================================================================
// Aggregation
// =============================================================================

/// Computes subtotal, VAT and grand total for a document at [`VAT_RATE`].
///
/// ## Example
/// ```rust
/// use bizdesk_core::document::compute_document_totals;
/// use bizdesk_core::{DiscountRate, LineItem, Money};
///
/// let lines = [
///     LineItem::new(2, Money::from_major(1000), DiscountRate::from_percent(10)),
///     LineItem::new(1, Money::from_major(500), DiscountRate::zero()),
/// ];
/// let totals = compute_document_totals(&lines).unwrap();
///
/// assert_eq!(totals.subtotal, Money::from_major(2300));
/// assert_eq!(totals.tax, Money::from_major(322));
/// assert_eq!(totals.total, Money::from_major(2622));
/// ```
pub fn compute_document_totals(lines: &[LineItem]) -> CoreResult<DocumentTotals> {
    compute_document_totals_with_rate(lines, VAT_RATE)
}

/// Same as [`compute_document_totals`] with an explicit tax rate.
///
/// ## Errors
/// - `EmptyDocument` when `lines` is empty
/// - `InvalidLine { index, .. }` for the first line that fails validation
/// - `Validation` for a tax rate above 100% or a subtotal that overflows
pub fn compute_document_totals_with_rate(
    lines: &[LineItem],
    tax_rate: TaxRate,
) -> CoreResult<DocumentTotals> {
    if lines.is_empty() {
        return Err(CoreError::EmptyDocument);
    }
    validate_tax_rate(tax_rate)?;

    let overflow = |field: &str| ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: i64::MAX,
    };

    let mut subtotal = Money::zero();
    for line_total in line_totals(lines)? {
        subtotal = subtotal
            .checked_add(line_total)
            .ok_or_else(|| overflow("subtotal"))?;
    }

    let tax = subtotal.calculate_tax(tax_rate);
    let total = subtotal.checked_add(tax).ok_or_else(|| overflow("total"))?;

    debug!(
        lines = lines.len(),
        subtotal = subtotal.minor(),
        tax = tax.minor(),
        total = total.minor(),
        "aggregated document"
    );

    Ok(DocumentTotals {
        subtotal,
        tax_rate,
        tax,
        total,
    })
}

/// Computes every line total independently, in order.
pub fn line_totals(lines: &[LineItem]) -> CoreResult<Vec<Money>> {
    lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            line.line_total()
                .map_err(|source| CoreError::InvalidLine { index, source })
        })
        .collect()
}

// =============================================================================
// Draft Document
// =============================================================================

/// One editable row of a draft document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DraftLine {
    #[ts(as = "String")]
    pub id: Uuid,
    pub description: String,
    pub quantity: Quantity,
    pub unit_price: Money,
    pub discount: DiscountRate,
}

impl DraftLine {
    /// A fresh row as the form shows it: quantity 1, no price, no discount.
    fn blank() -> Self {
        DraftLine {
            id: Uuid::new_v4(),
            description: String::new(),
            quantity: Quantity::from_units(1),
            unit_price: Money::zero(),
            discount: DiscountRate::zero(),
        }
    }

    /// The numeric part of the row.
    pub fn item(&self) -> LineItem {
        LineItem::new(self.quantity, self.unit_price, self.discount)
    }
}

/// A single field edit on a draft line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineField {
    Description(String),
    Quantity(Quantity),
    UnitPrice(Money),
    Discount(DiscountRate),
}

/// An invoice being filled in.
///
/// ## Invariants
/// - At least one line at all times
/// - Every stored line passes line validation
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DraftDocument {
    kind: DocumentKind,
    #[ts(as = "String")]
    issued_on: NaiveDate,
    #[ts(as = "String")]
    due_on: NaiveDate,
    notes: Option<String>,
    tax_rate: TaxRate,
    lines: Vec<DraftLine>,
}

impl DraftDocument {
    /// Opens a draft with one blank line, due on its issue date.
    pub fn new(kind: DocumentKind, issued_on: NaiveDate) -> Self {
        DraftDocument {
            kind,
            issued_on,
            due_on: issued_on,
            notes: None,
            tax_rate: VAT_RATE,
            lines: vec![DraftLine::blank()],
        }
    }

    /// Replaces the default [`VAT_RATE`] for this draft.
    pub fn with_tax_rate(mut self, tax_rate: TaxRate) -> CoreResult<Self> {
        validate_tax_rate(tax_rate)?;
        self.tax_rate = tax_rate;
        Ok(self)
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn issued_on(&self) -> NaiveDate {
        self.issued_on
    }

    pub fn due_on(&self) -> NaiveDate {
        self.due_on
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    pub fn set_kind(&mut self, kind: DocumentKind) {
        self.kind = kind;
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes.filter(|n| !n.trim().is_empty());
    }

    /// Moves the issue date. Dates are checked when issuing, so the form
    /// can edit them in any order.
    pub fn set_issued_on(&mut self, issued_on: NaiveDate) {
        self.issued_on = issued_on;
    }

    pub fn set_due_on(&mut self, due_on: NaiveDate) {
        self.due_on = due_on;
    }

    /// Appends a blank line and returns its id.
    pub fn add_line(&mut self) -> Uuid {
        let line = DraftLine::blank();
        let id = line.id;
        self.lines.push(line);
        id
    }

    /// Appends a filled-in line after validating it.
    pub fn add_item(&mut self, description: impl Into<String>, item: LineItem) -> CoreResult<Uuid> {
        item.line_total().map_err(|source| CoreError::InvalidLine {
            index: self.lines.len(),
            source,
        })?;

        let line = DraftLine {
            description: description.into(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            discount: item.discount,
            ..DraftLine::blank()
        };
        let id = line.id;
        self.lines.push(line);
        Ok(id)
    }

    /// Removes a line. The last remaining line cannot be removed.
    pub fn remove_line(&mut self, id: Uuid) -> CoreResult<()> {
        let index = self.position(id)?;
        if self.lines.len() == 1 {
            return Err(CoreError::LastLine);
        }

        self.lines.remove(index);
        Ok(())
    }

    /// Resets a line to the blank state, keeping its id and position.
    pub fn clear_line(&mut self, id: Uuid) -> CoreResult<()> {
        let index = self.position(id)?;
        self.lines[index] = DraftLine {
            id,
            ..DraftLine::blank()
        };
        Ok(())
    }

    /// Applies one field edit and returns the line's new total.
    ///
    /// The edit is validated on a copy first; a rejected edit leaves the
    /// line untouched.
    pub fn update_line(&mut self, id: Uuid, field: LineField) -> CoreResult<Money> {
        let index = self.position(id)?;

        let mut edited = self.lines[index].clone();
        match field {
            LineField::Description(text) => edited.description = text,
            LineField::Quantity(quantity) => edited.quantity = quantity,
            LineField::UnitPrice(price) => edited.unit_price = price,
            LineField::Discount(discount) => edited.discount = discount,
        }

        let line_total = edited
            .item()
            .line_total()
            .map_err(|source| CoreError::InvalidLine { index, source })?;

        self.lines[index] = edited;
        Ok(line_total)
    }

    /// Line totals in display order.
    pub fn line_totals(&self) -> CoreResult<Vec<Money>> {
        line_totals(&self.items())
    }

    /// Document totals, recomputed from the full current line set.
    pub fn totals(&self) -> CoreResult<DocumentTotals> {
        compute_document_totals_with_rate(&self.items(), self.tax_rate)
    }

    /// Checks the draft can be issued and returns its totals.
    ///
    /// ## Rules
    /// - Due date on or after the issue date
    /// - Grand total strictly positive
    pub fn ensure_issuable(&self) -> CoreResult<DocumentTotals> {
        if self.due_on < self.issued_on {
            return Err(CoreError::InvalidDocumentDates {
                issued: self.issued_on,
                due: self.due_on,
            });
        }

        let totals = self.totals()?;
        if !totals.total.is_positive() {
            return Err(CoreError::NotIssuable {
                total: totals.total,
            });
        }

        Ok(totals)
    }

    fn items(&self) -> Vec<LineItem> {
        self.lines.iter().map(DraftLine::item).collect()
    }

    fn position(&self, id: Uuid) -> CoreResult<usize> {
        self.lines
            .iter()
            .position(|line| line.id == id)
            .ok_or(CoreError::LineNotFound(id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn scenario_lines() -> Vec<LineItem> {
        vec![
            LineItem::new(2, Money::from_major(1000), DiscountRate::from_percent(10)),
            LineItem::new(1, Money::from_major(500), DiscountRate::zero()),
        ]
    }

    #[test]
    fn test_two_line_invoice() {
        let totals = compute_document_totals(&scenario_lines()).unwrap();

        assert_eq!(totals.subtotal, Money::from_major(2300));
        assert_eq!(totals.tax, Money::from_major(322));
        assert_eq!(totals.total, Money::from_major(2622));
        assert_eq!(totals.tax_rate, VAT_RATE);
    }

    #[test]
    fn test_empty_document_rejected() {
        assert!(matches!(
            compute_document_totals(&[]),
            Err(CoreError::EmptyDocument)
        ));
    }

    #[test]
    fn test_invalid_line_reports_index() {
        let mut lines = scenario_lines();
        lines.push(LineItem::new(-1, Money::from_major(10), DiscountRate::zero()));

        let err = compute_document_totals(&lines).unwrap_err();
        assert!(matches!(err, CoreError::InvalidLine { index: 2, .. }));
    }

    #[test]
    fn test_fractional_quantity_line() {
        // 1.5 hours at 1000 Kz
        let lines = [LineItem::new(
            Quantity::from_milli(1500),
            Money::from_major(1000),
            DiscountRate::zero(),
        )];
        let totals = compute_document_totals(&lines).unwrap();

        assert_eq!(totals.subtotal, Money::from_major(1500));
        assert_eq!(totals.tax, Money::from_major(210));
        assert_eq!(totals.total, Money::from_major(1710));
    }

    #[test]
    fn test_single_cleared_line_totals_zero() {
        let totals = compute_document_totals(&[LineItem::default()]).unwrap();
        assert!(totals.subtotal.is_zero());
        assert!(totals.total.is_zero());
    }

    #[test]
    fn test_explicit_tax_rate() {
        let totals =
            compute_document_totals_with_rate(&scenario_lines(), TaxRate::from_bps(700)).unwrap();
        assert_eq!(totals.tax, Money::from_major(161));
        assert_eq!(totals.total, Money::from_major(2461));

        assert!(matches!(
            compute_document_totals_with_rate(&scenario_lines(), TaxRate::from_bps(10_001)),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_line_order_does_not_change_totals() {
        let mut reversed = scenario_lines();
        reversed.reverse();
        assert_eq!(
            compute_document_totals(&reversed).unwrap(),
            compute_document_totals(&scenario_lines()).unwrap()
        );
    }

    #[test]
    fn test_subtotal_overflow_rejected() {
        let huge = LineItem::new(1, Money::from_minor(i64::MAX), DiscountRate::zero());
        assert!(matches!(
            compute_document_totals(&[huge, huge]),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_draft_starts_with_one_blank_line() {
        let draft = DraftDocument::new(DocumentKind::InvoiceReceipt, date(2024, 5, 2));

        assert_eq!(draft.lines().len(), 1);
        assert_eq!(draft.lines()[0].quantity, Quantity::from_units(1));
        assert!(draft.lines()[0].unit_price.is_zero());
        assert_eq!(draft.due_on(), draft.issued_on());
        assert!(draft.totals().unwrap().total.is_zero());
    }

    #[test]
    fn test_draft_edit_flow_matches_scenario() {
        let mut draft = DraftDocument::new(DocumentKind::InvoiceReceipt, date(2024, 5, 2));
        let first = draft.lines()[0].id;

        draft.update_line(first, LineField::Description("Consultoria".into())).unwrap();
        draft.update_line(first, LineField::Quantity(Quantity::from_units(2))).unwrap();
        draft.update_line(first, LineField::UnitPrice(Money::from_major(1000))).unwrap();
        let first_total = draft
            .update_line(first, LineField::Discount(DiscountRate::from_percent(10)))
            .unwrap();
        assert_eq!(first_total, Money::from_major(1800));

        let second = draft.add_line();
        draft.update_line(second, LineField::UnitPrice(Money::from_major(500))).unwrap();

        assert_eq!(
            draft.line_totals().unwrap(),
            vec![Money::from_major(1800), Money::from_major(500)]
        );
        assert_eq!(draft.totals().unwrap().total, Money::from_major(2622));
        assert_eq!(draft.lines()[0].description, "Consultoria");
    }

    #[test]
    fn test_rejected_edit_leaves_line_untouched() {
        let mut draft = DraftDocument::new(DocumentKind::InvoiceReceipt, date(2024, 5, 2));
        let id = draft.lines()[0].id;
        draft.update_line(id, LineField::Quantity(Quantity::from_units(4))).unwrap();

        let err = draft.update_line(id, LineField::Quantity(Quantity::from_milli(-2000))).unwrap_err();
        assert!(matches!(err, CoreError::InvalidLine { index: 0, .. }));
        assert_eq!(draft.lines()[0].quantity, Quantity::from_units(4));

        assert!(draft
            .update_line(id, LineField::Discount(DiscountRate::from_bps(12_000)))
            .is_err());
        assert!(draft.lines()[0].discount.is_zero());
    }

    #[test]
    fn test_last_line_cannot_be_removed() {
        let mut draft = DraftDocument::new(DocumentKind::InvoiceReceipt, date(2024, 5, 2));
        let first = draft.lines()[0].id;
        let second = draft.add_line();

        draft.remove_line(first).unwrap();
        assert_eq!(draft.lines().len(), 1);
        assert!(matches!(draft.remove_line(second), Err(CoreError::LastLine)));
        assert_eq!(draft.lines()[0].id, second);
    }

    #[test]
    fn test_unknown_line_id() {
        let mut draft = DraftDocument::new(DocumentKind::Proforma, date(2024, 5, 2));
        let stranger = Uuid::new_v4();

        assert!(matches!(draft.remove_line(stranger), Err(CoreError::LineNotFound(id)) if id == stranger));
        assert!(draft.update_line(stranger, LineField::Quantity(Quantity::from_units(1))).is_err());
        assert!(draft.clear_line(stranger).is_err());
    }

    #[test]
    fn test_clear_line_keeps_position() {
        let mut draft = DraftDocument::new(DocumentKind::InvoiceReceipt, date(2024, 5, 2));
        let id = draft
            .add_item("Licença", LineItem::new(3, Money::from_major(100), DiscountRate::zero()))
            .unwrap();
        draft.add_line();

        draft.clear_line(id).unwrap();
        let cleared = &draft.lines()[1];
        assert_eq!(cleared.id, id);
        assert!(cleared.description.is_empty());
        assert_eq!(cleared.quantity, Quantity::from_units(1));
        assert!(cleared.unit_price.is_zero());
    }

    #[test]
    fn test_add_item_validates() {
        let mut draft = DraftDocument::new(DocumentKind::InvoiceReceipt, date(2024, 5, 2));
        let err = draft
            .add_item("bad", LineItem::new(1, Money::from_minor(-5), DiscountRate::zero()))
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidLine { index: 1, .. }));
        assert_eq!(draft.lines().len(), 1);
    }

    #[test]
    fn test_ensure_issuable() {
        let mut draft = DraftDocument::new(DocumentKind::InvoiceReceipt, date(2024, 5, 2));
        assert!(matches!(
            draft.ensure_issuable(),
            Err(CoreError::NotIssuable { total }) if total.is_zero()
        ));

        let id = draft.lines()[0].id;
        draft.update_line(id, LineField::UnitPrice(Money::from_major(500))).unwrap();
        assert_eq!(draft.ensure_issuable().unwrap().total, Money::from_major(570));

        draft.set_due_on(date(2024, 5, 1));
        assert!(matches!(
            draft.ensure_issuable(),
            Err(CoreError::InvalidDocumentDates { .. })
        ));
    }

    #[test]
    fn test_draft_with_custom_tax_rate() {
        let mut draft = DraftDocument::new(DocumentKind::InvoiceReceipt, date(2024, 5, 2))
            .with_tax_rate(TaxRate::from_bps(700))
            .unwrap();
        let id = draft.lines()[0].id;
        draft.update_line(id, LineField::UnitPrice(Money::from_major(1000))).unwrap();

        assert_eq!(draft.tax_rate().bps(), 700);
        assert_eq!(draft.totals().unwrap().tax, Money::from_major(70));

        assert!(DraftDocument::new(DocumentKind::InvoiceReceipt, date(2024, 5, 2))
            .with_tax_rate(TaxRate::from_bps(20_000))
            .is_err());
    }

    #[test]
    fn test_blank_notes_are_dropped() {
        let mut draft = DraftDocument::new(DocumentKind::Proforma, date(2024, 5, 2));
        draft.set_notes(Some("   ".to_string()));
        assert_eq!(draft.notes(), None);
        draft.set_notes(Some("Entrega em Luanda".to_string()));
        assert_eq!(draft.notes(), Some("Entrega em Luanda"));
        assert_eq!(draft.kind().label(), "Fatura Proforma");
    }

    fn any_line() -> impl Strategy<Value = LineItem> {
        (0i64..=1_000_000, 0i64..=10_000_000, 0u32..=1_000_000).prop_map(|(q, p, d)| {
            LineItem::new(Quantity::from_milli(q), Money::from_minor(p), DiscountRate::from_ppm(d))
        })
    }

    proptest! {
        /// subtotal is the exact sum of independently computed line totals,
        /// and total = subtotal × 1.14 within half a minor unit
        #[test]
        fn prop_totals_aggregate_lines(lines in prop::collection::vec(any_line(), 1..20)) {
            let totals = compute_document_totals(&lines).unwrap();
            let summed: Money = line_totals(&lines).unwrap().into_iter().sum();

            prop_assert_eq!(totals.subtotal, summed);
            prop_assert_eq!(totals.total, totals.subtotal + totals.tax);

            let exact = totals.subtotal.minor() as i128 * 11_400;
            let ours = totals.total.minor() as i128 * 10_000;
            prop_assert!((ours - exact).abs() <= 5_000);
        }
    }
}
