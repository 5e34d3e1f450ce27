//! # Error Types
//!
//! Domain-specific error types for bizdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bizdesk-core errors (this file)                                       │
//! │  ├── CoreError        - Catalogue, document and calendar failures      │
//! │  └── ValidationError  - Malformed or out-of-range numeric input        │
//! │                                                                         │
//! │  bizdesk-cli errors (app)                                              │
//! │  └── CliError         - What the operator sees (code + message)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr / JSON          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, value, line index)
//! 3. Never substitute a default for invalid input; report it
//! 4. Every failure affects only the call that produced it

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by the pricing and document computations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A plan tier outside the closed set {Basic, Premium, Pro}.
    #[error("Unknown plan tier: {0}")]
    UnknownPlan(String),

    /// A billing period outside the closed set {Monthly, Quarterly, Annual}.
    #[error("Unknown billing period: {0}")]
    UnknownPeriod(String),

    /// Aggregation attempted on zero lines.
    ///
    /// ## When This Occurs
    /// - A caller built a line list by hand and forgot the first line
    /// - A stored document was loaded with its lines missing
    ///
    /// The draft editor can never reach this state because it refuses to
    /// remove the last line.
    #[error("A sales document must contain at least one line item")]
    EmptyDocument,

    /// One line of a document failed validation.
    #[error("Line {index}: {source}")]
    InvalidLine {
        /// Zero-based position of the offending line.
        index: usize,
        #[source]
        source: ValidationError,
    },

    /// Attempt to remove the only remaining line of a draft document.
    #[error("The last line of a document cannot be removed, only cleared")]
    LastLine,

    /// A draft line id that is not part of the document.
    #[error("Line not found: {0}")]
    LineNotFound(Uuid),

    /// The document cannot be issued with a zero or negative total.
    #[error("Document total must be positive to issue, got {total}")]
    NotIssuable { total: Money },

    /// The due date precedes the issue date.
    #[error("Due date {due} is before issue date {issued}")]
    InvalidDocumentDates { issued: NaiveDate, due: NaiveDate },

    /// Calendar arithmetic left the representable date range.
    #[error("Cannot add {months} months to {issued}: date out of range")]
    DateOutOfRange { issued: NaiveDate, months: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are the "invalid line" failures: negative quantity or price,
/// discount outside [0, 100], or a form field that does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., a price with letters in it).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the field the error refers to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::MustBeNonNegative { field }
            | ValidationError::MustBePositive { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownPlan("Gold".to_string());
        assert_eq!(err.to_string(), "Unknown plan tier: Gold");

        let err = CoreError::InvalidLine {
            index: 2,
            source: ValidationError::MustBeNonNegative {
                field: "quantity".to_string(),
            },
        };
        assert_eq!(err.to_string(), "Line 2: quantity must not be negative");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 100,
        };
        assert_eq!(err.to_string(), "discount must be between 0 and 100");
        assert_eq!(err.field(), "discount");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_date_out_of_range_message() {
        let issued = NaiveDate::from_ymd_opt(2024, 1, 31).expect("valid date");
        let err = CoreError::DateOutOfRange { issued, months: 12 };
        assert_eq!(
            err.to_string(),
            "Cannot add 12 months to 2024-01-31: date out of range"
        );
    }
}
