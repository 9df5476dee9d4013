//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Reporting failures (bad window, bad input)     │
//! │  └── ValidationError  - Opt-in input validation failures               │
//! │                                                                         │
//! │  tally-report errors (app crate)                                       │
//! │  └── ReportError      - I/O, config, and wrapped CoreError             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ReportError → CLI exit message    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core never logs. Errors go straight back to the immediate caller,
//! which owns user-facing messaging.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Reporting errors raised by the core.
///
/// Numeric edge cases (empty input, zero totals) are never errors: they are
/// handled by guarded defaults in [`crate::summary`].
#[derive(Debug, Error)]
pub enum CoreError {
    /// A reporting window boundary is not a valid `YYYY-MM-DD` date.
    ///
    /// ## When This Occurs
    /// ```text
    /// filter_by_date_range(sales, "2024-13-01", "2024-12-31")
    ///      │
    ///      ▼
    /// "2024-13-01" does not parse (month 13)
    ///      │
    ///      ▼
    /// InvalidDateRange { start: "2024-13-01", end: "2024-12-31", .. }
    ///      │
    ///      ▼
    /// Report screen shows: "Invalid date range ..."
    /// ```
    #[error("Invalid date range {start}..{end}: {reason}")]
    InvalidDateRange {
        start: String,
        end: String,
        reason: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Produced by [`crate::validation`] when a caller asks for the sales export
/// to be checked before aggregation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// A stored amount disagrees with the amount derived from its parts.
    #[error("{field} is {actual} but its parts add up to {expected}")]
    Mismatch {
        field: String,
        expected: i64,
        actual: i64,
    },
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
        let err = CoreError::InvalidDateRange {
            start: "2024-13-01".to_string(),
            end: "2024-12-31".to_string(),
            reason: "start date is not a calendar date".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date range 2024-13-01..2024-12-31: start date is not a calendar date"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "sale id".to_string(),
        };
        assert_eq!(err.to_string(), "sale id is required");

        let err = ValidationError::Mismatch {
            field: "total".to_string(),
            expected: 1500,
            actual: 1400,
        };
        assert_eq!(err.to_string(), "total is 1400 but its parts add up to 1500");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
