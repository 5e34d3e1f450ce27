//! # bizdesk-core: Financial Computation Core
//!
//! Subscription pricing and sales-document arithmetic for the bizdesk
//! company dashboard, as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        bizdesk Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Dashboard / CLI (presentation, persistence)          │   │
//! │  │   Registration wizard ──► plan + period      Invoice form ──►   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain values in, plain records out     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bizdesk-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │ validity  │  │ line_item │  │ document  │  │   │
//! │  │   │  prices   │  │  expiry   │  │ line      │  │ subtotal  │  │   │
//! │  │   │  periods  │  │  clamping │  │ totals    │  │ IVA total │  │   │
//! │  │   └─────┬─────┘  └─────┬─────┘  └───────────┘  └───────────┘  │   │
//! │  │         └──── pricing ─┘                                       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO STORAGE • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic and bankers rounding
//! - [`types`] - Value objects (plan tiers, periods, lines, totals, rates)
//! - [`catalog`] - Plan prices and billing-period terms
//! - [`validity`] - Expiry dates with month-end clamping
//! - [`pricing`] - Subscription quotes
//! - [`line_item`] - Per-line totals
//! - [`document`] - Document totals and the draft editor
//! - [`validation`] - Range checks and form-field parsers
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bizdesk_core::document::compute_document_totals;
//! use bizdesk_core::pricing::compute_pricing;
//! use bizdesk_core::{BillingPeriod, DiscountRate, LineItem, Money, PlanTier};
//! use chrono::NaiveDate;
//!
//! let issued = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
//! let quote = compute_pricing(PlanTier::Premium, BillingPeriod::Quarterly, issued).unwrap();
//! assert_eq!(quote.total_due, Money::from_major(99_750));
//!
//! let totals = compute_document_totals(&[
//!     LineItem::new(2, Money::from_major(1000), DiscountRate::from_percent(10)),
//! ])
//! .unwrap();
//! assert_eq!(totals.total, Money::from_major(2052));
//! ```

pub mod catalog;
pub mod document;
pub mod error;
pub mod line_item;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;
pub mod validity;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use document::{
    compute_document_totals, compute_document_totals_with_rate, DraftDocument, DraftLine,
    LineField, VAT_RATE,
};
pub use error::{CoreError, CoreResult, ValidationError};
pub use line_item::compute_line_total;
pub use money::Money;
pub use pricing::{compute_pricing, quote_all};
pub use types::*;
pub use validity::expiry_date;
