//! # CLI Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in bizdesk                                │
//! │                                                                         │
//! │  Command function: Result<String, CliError>                            │
//! │         │                                                               │
//! │         ├── ValidationError ──┐                                        │
//! │         ├── CoreError ────────┼──► CliError { code, message }          │
//! │         └── ConfigError ──────┘          │                             │
//! │                                          ├──► stderr (text)            │
//! │                                          └──► stdout (--json)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bizdesk_core::{CoreError, ValidationError};
use serde::Serialize;

use crate::config::ConfigError;

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "UNKNOWN_PLAN",
///   "message": "Unknown plan tier: Gold"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    /// Machine-readable error code for scripts
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for CLI failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Plan tier outside the catalogue
    UnknownPlan,

    /// Billing period outside the catalogue
    UnknownPeriod,

    /// Input validation failed
    ValidationError,

    /// Aggregation over zero lines
    EmptyDocument,

    /// Document cannot be issued as it stands
    DocumentError,

    /// Calendar arithmetic out of range
    DateError,

    /// Bad environment configuration
    ConfigError,

    /// Output serialization or other internal failure
    Internal,
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::UnknownPlan(_) => ErrorCode::UnknownPlan,
            CoreError::UnknownPeriod(_) => ErrorCode::UnknownPeriod,
            CoreError::EmptyDocument => ErrorCode::EmptyDocument,
            CoreError::InvalidLine { .. } | CoreError::Validation(_) => ErrorCode::ValidationError,
            CoreError::LastLine
            | CoreError::LineNotFound(_)
            | CoreError::NotIssuable { .. }
            | CoreError::InvalidDocumentDates { .. } => ErrorCode::DocumentError,
            CoreError::DateOutOfRange { .. } => ErrorCode::DateError,
        };
        CliError::new(code, err.to_string())
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Failed to serialize output: {}", err);
        CliError::internal("Failed to serialize output")
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_codes() {
        let err: CliError = CoreError::UnknownPlan("Gold".into()).into();
        assert_eq!(err.code, ErrorCode::UnknownPlan);
        assert_eq!(err.message, "Unknown plan tier: Gold");

        let err: CliError = CoreError::EmptyDocument.into();
        assert_eq!(err.code, ErrorCode::EmptyDocument);

        let err: CliError = CoreError::LastLine.into();
        assert_eq!(err.code, ErrorCode::DocumentError);
    }

    #[test]
    fn test_serializes_screaming_code() {
        let err = CliError::validation("quantity must not be negative");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(
            json,
            r#"{"code":"VALIDATION_ERROR","message":"quantity must not be negative"}"#
        );
    }

    #[test]
    fn test_display() {
        let err = CliError::new(ErrorCode::UnknownPeriod, "Unknown billing period: weekly");
        assert_eq!(err.to_string(), "[UnknownPeriod] Unknown billing period: weekly");
    }
}
