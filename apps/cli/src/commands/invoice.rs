//! # Invoice Command
//!
//! `bizdesk invoice --line QTY:PRICE[:DISCOUNT%] ...`
//!
//! Builds a draft document the same way the invoice form does: the draft
//! opens with one blank line, the first `--line` fills it in, and every
//! further `--line` is appended.

use bizdesk_core::validation::{parse_amount, parse_percentage, parse_quantity};
use bizdesk_core::{
    CoreError, DiscountRate, DocumentKind, DocumentTotals, DraftDocument, LineField, LineItem,
    Money, Quantity,
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::error::CliError;

use super::to_json;

/// Everything the `invoice` command was given.
#[derive(Debug, Clone)]
pub struct InvoiceRequest<'a> {
    pub kind: DocumentKind,
    pub issued: NaiveDate,
    pub due: NaiveDate,
    pub notes: Option<String>,
    pub lines: &'a [String],
}

/// Parses one `QTY:PRICE[:DISCOUNT%]` argument.
///
/// Quantity takes up to three decimals (`1.5` hours, `2,25` kg) and the
/// discount up to four.
///
/// ## Example
/// ```rust
/// use bizdesk_cli::commands::invoice::parse_line_arg;
/// use bizdesk_core::{DiscountRate, Money, Quantity};
///
/// let item = parse_line_arg("2:1000:10%").unwrap();
/// assert_eq!(item.quantity, Quantity::from_units(2));
/// assert_eq!(item.unit_price, Money::from_major(1000));
/// assert_eq!(item.discount, DiscountRate::from_percent(10));
/// ```
pub fn parse_line_arg(arg: &str) -> Result<LineItem, CliError> {
    let parts: Vec<&str> = arg.split(':').collect();
    let (qty, price, discount) = match parts.as_slice() {
        [qty, price] => (*qty, *price, None),
        [qty, price, discount] => (*qty, *price, Some(*discount)),
        _ => {
            return Err(CliError::validation(format!(
                "line '{}': expected QTY:PRICE[:DISCOUNT%]",
                arg
            )))
        }
    };

    let quantity = parse_quantity("quantity", qty)?;
    let unit_price = parse_amount("unit price", price)?;
    let discount = match discount {
        Some(raw) => {
            let raw = raw.trim();
            parse_percentage("discount", raw.strip_suffix('%').unwrap_or(raw))?
        }
        None => DiscountRate::zero(),
    };

    Ok(LineItem::new(quantity, unit_price, discount))
}

/// Fills a draft document from the request.
pub fn build_document(config: &CliConfig, request: &InvoiceRequest<'_>) -> Result<DraftDocument, CliError> {
    let items = request
        .lines
        .iter()
        .map(|arg| parse_line_arg(arg))
        .collect::<Result<Vec<_>, _>>()?;

    let mut doc = DraftDocument::new(request.kind, request.issued).with_tax_rate(config.vat_rate)?;
    doc.set_due_on(request.due);
    doc.set_notes(request.notes.clone());

    let first_id = doc.lines().first().map(|line| line.id);
    let mut items = items.into_iter();
    if let (Some(first), Some(id)) = (items.next(), first_id) {
        doc.update_line(id, LineField::Quantity(first.quantity))?;
        doc.update_line(id, LineField::UnitPrice(first.unit_price))?;
        doc.update_line(id, LineField::Discount(first.discount))?;
    }
    for item in items {
        doc.add_item(String::new(), item)?;
    }

    Ok(doc)
}

/// One priced row of the rendered document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    /// Thousandths of a unit.
    pub quantity: Quantity,
    pub unit_price: Money,
    pub discount: DiscountRate,
    pub total: Money,
}

/// The rendered document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceView {
    pub kind: DocumentKind,
    pub label: &'static str,
    pub issued_on: NaiveDate,
    pub due_on: NaiveDate,
    pub notes: Option<String>,
    pub currency: String,
    pub lines: Vec<LineView>,
    pub totals: DocumentTotals,
    pub issuable: bool,
    /// Why the document cannot be issued, when it cannot.
    pub issue_error: Option<String>,
}

pub fn invoice_view(config: &CliConfig, doc: &DraftDocument) -> Result<InvoiceView, CliError> {
    let totals = doc.totals()?;
    let line_totals = doc.line_totals()?;

    let issue_error = match doc.ensure_issuable() {
        Ok(_) => None,
        Err(err @ (CoreError::NotIssuable { .. } | CoreError::InvalidDocumentDates { .. })) => {
            warn!(error = %err, "Document is not issuable");
            Some(err.to_string())
        }
        Err(err) => return Err(err.into()),
    };

    let lines = doc
        .lines()
        .iter()
        .zip(line_totals)
        .map(|(line, total)| LineView {
            quantity: line.quantity,
            unit_price: line.unit_price,
            discount: line.discount,
            total,
        })
        .collect();

    Ok(InvoiceView {
        kind: doc.kind(),
        label: doc.kind().label(),
        issued_on: doc.issued_on(),
        due_on: doc.due_on(),
        notes: doc.notes().map(str::to_string),
        currency: config.currency_code.clone(),
        lines,
        totals,
        issuable: issue_error.is_none(),
        issue_error,
    })
}

/// Computes and renders the totals of a sales document.
pub fn invoice(config: &CliConfig, request: &InvoiceRequest<'_>, json: bool) -> Result<String, CliError> {
    let doc = build_document(config, request)?;
    let view = invoice_view(config, &doc)?;
    info!(
        lines = view.lines.len(),
        total = view.totals.total.minor(),
        issuable = view.issuable,
        "Computed document totals"
    );

    if json {
        return to_json(&view);
    }
    Ok(render_invoice(config, &view))
}

fn render_invoice(config: &CliConfig, view: &InvoiceView) -> String {
    let mut out = format!(
        "{}\nEmissão: {}   Vencimento: {}\n\n",
        view.label,
        config.format_date(view.issued_on),
        config.format_date(view.due_on)
    );

    out.push_str(&format!(
        "{:>3} {:>8} {:>18} {:>8} {:>18}\n",
        "#", "Qtd", "Preço", "Desc.", "Total"
    ));
    for (i, line) in view.lines.iter().enumerate() {
        out.push_str(&format!(
            "{:>3} {:>8} {:>18} {:>7}% {:>18}\n",
            i + 1,
            line.quantity,
            config.format_currency(line.unit_price),
            line.discount.percentage(),
            config.format_currency(line.total)
        ));
    }

    out.push_str(&format!(
        "\nSubtotal:      {}\nIVA ({}%):     {}\nTotal:         {}",
        config.format_currency(view.totals.subtotal),
        view.totals.tax_rate.percentage(),
        config.format_currency(view.totals.tax),
        config.format_currency(view.totals.total)
    ));

    if let Some(notes) = &view.notes {
        out.push_str(&format!("\n\nNotas: {}", notes));
    }
    if let Some(reason) = &view.issue_error {
        out.push_str(&format!("\n\nNão emitível: {}", reason));
    }
    out
}
