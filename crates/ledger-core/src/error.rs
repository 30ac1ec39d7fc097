//! # Error Types
//!
//! Domain-specific error types for ledger-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ledger-core errors (this file)                                        │
//! │  ├── ValidationError   - One offending field                           │
//! │  ├── ValidationErrors  - Every offending field of one request          │
//! │  └── DateParseError    - Text that is not YYYY-MM-DD / MM / YYYY-MM    │
//! │                                                                         │
//! │  ledger-db errors (separate crate)                                     │
//! │  └── DbError           - Database operation failures                   │
//! │                                                                         │
//! │  ledger-server errors                                                  │
//! │  └── ApiError          - What the browser sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationErrors / DbError → ApiError → HTTP response           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every variant names the field it is about
//! 3. Validation never stops at the first problem: callers get the full list

use std::fmt;

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is absent, or a text field is blank after trimming.
    #[error("{field} is required")]
    Required { field: String },

    /// A numeric field holds something that is not a finite number.
    #[error("{field} must be a number")]
    NotANumber { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Finite input whose derived taxed sales or total is not finite.
    #[error("{field} is too large")]
    TooLarge { field: String },

    /// Invalid format (date that is not YYYY-MM-DD, time that is not HH:MM).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// The name of the offending field, as the API spells it.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::NotANumber { field }
            | ValidationError::MustBePositive { field }
            | ValidationError::MustNotBeNegative { field }
            | ValidationError::TooLarge { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }

    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Validation Errors (collection)
// =============================================================================

/// Every validation failure found in one payload.
///
/// ## Why a collection?
/// The browser form highlights all bad inputs at once, so validation
/// keeps going after the first failure and reports the whole list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        ValidationErrors::default()
    }

    /// Records one failure.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Returns true when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The individual failures, in field order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Names of the offending fields (deduplicated, first-seen order).
    pub fn fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = Vec::with_capacity(self.errors.len());
        for err in &self.errors {
            if !fields.iter().any(|f| f == err.field()) {
                fields.push(err.field().to_string());
            }
        }
        fields
    }

    /// `Ok(value)` when empty, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        ValidationErrors {
            errors: vec![error],
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "no validation errors");
        }
        let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

// =============================================================================
// Date Parse Error
// =============================================================================

/// Text that does not match one of the fixed-width date shapes
/// (`YYYY-MM-DD` for dates, `MM` or `YYYY-MM` for month keys).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{input}' is not a {expected} value")]
pub struct DateParseError {
    pub input: String,
    pub expected: &'static str,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("code");
        assert_eq!(err.to_string(), "code is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be greater than 0");
    }

    #[test]
    fn test_fields_are_deduplicated_in_order() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::required("code"));
        errors.push(ValidationError::NotANumber {
            field: "quantity".to_string(),
        });
        errors.push(ValidationError::required("code"));

        assert_eq!(errors.fields(), vec!["code", "quantity"]);
        assert_eq!(errors.errors().len(), 3);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationErrors::new().into_result(7), Ok(7));

        let errors: ValidationErrors = ValidationError::required("date").into();
        assert!(errors.into_result(()).is_err());
    }

    #[test]
    fn test_display_joins_messages() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::required("code"));
        errors.push(ValidationError::required("unit"));
        assert_eq!(errors.to_string(), "code is required; unit is required");
    }
}
