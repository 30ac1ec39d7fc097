//! # API Error Type
//!
//! The single error type every boundary operation returns.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Fuel Ledger                        │
//! │                                                                         │
//! │  Browser                     Rust Backend                               │
//! │  ───────                     ────────────                               │
//! │                                                                         │
//! │  POST /api/invoices                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  LedgerService                                                   │  │
//! │  │         │                                                        │  │
//! │  │  ValidationErrors ───────────────► VALIDATION_ERROR  400 ───────►│  │
//! │  │         │                                                        │  │
//! │  │  DbError::NotFound ──────────────► NOT_FOUND         404 ───────►│  │
//! │  │  DbError::UniqueViolation ───────► CONFLICT          409 ───────►│  │
//! │  │  DbError::* (everything else) ───► STORAGE_ERROR     500 ───────►│  │
//! │  │         (logged, details withheld)                               │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "VALIDATION_ERROR",                                          │
//! │    "error": "Invalid input: code is required; ...",                     │
//! │    "missingFields": ["code", "quantity"] }                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use ledger_core::ValidationErrors;
use ledger_db::DbError;

/// Result type for boundary operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned to API callers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "error": "Invoice not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error kind
    pub code: ErrorCode,

    /// Human-readable message for display
    #[serde(rename = "error")]
    pub message: String,

    /// Every offending field, for validation errors
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,
}

/// Error kinds, one per distinguishable failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Missing or invalid input (400)
    ValidationError,

    /// No record with that id (404)
    NotFound,

    /// Invoice code already taken (409)
    Conflict,

    /// Anything the store could not do (500)
    StorageError,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::StorageError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            missing_fields: Vec::new(),
        }
    }

    /// A validation error about a single field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: message.into(),
            missing_fields: vec![field.to_string()],
        }
    }

    /// A validation error not tied to a field (malformed body, bad query).
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a not found error.
    pub fn not_found(entity: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", entity, id))
    }

    /// The generic storage failure the caller sees.
    pub fn storage() -> Self {
        ApiError::new(ErrorCode::StorageError, "Internal server error")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Converts database errors to API errors.
///
/// Only not-found and conflicts carry their message to the caller.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError {
                code: ErrorCode::Conflict,
                message: format!("An invoice with {} '{}' already exists", field, value),
                missing_fields: vec![field],
            },
            other => {
                error!(error = %other, "Storage operation failed");
                ApiError::storage()
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: format!("Invalid input: {}", errors),
            missing_fields: errors.fields(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status();
        if self.code != ErrorCode::StorageError {
            warn!(code = ?self.code, message = %self.message, "Request rejected");
        }
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_core::ValidationError;

    #[test]
    fn test_db_errors_are_classified() {
        let err: ApiError = DbError::not_found("Invoice", 42).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Invoice not found: 42");

        let err: ApiError = DbError::duplicate("code", "GEN-001-2025").into();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.code.status(), StatusCode::CONFLICT);

        let err: ApiError = DbError::QueryFailed("disk I/O error at page 7".into()).into();
        assert_eq!(err, ApiError::storage());
        assert!(!err.message.contains("disk"));
    }

    #[test]
    fn test_validation_errors_list_fields() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::Required { field: "code".into() });
        errors.push(ValidationError::MustBePositive { field: "quantity".into() });

        let err: ApiError = errors.into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.missing_fields, vec!["code", "quantity"]);

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["missingFields"][1], "quantity");
        assert!(json["error"].as_str().unwrap().contains("code is required"));
    }

    #[test]
    fn test_missing_fields_omitted_when_empty() {
        let json = serde_json::to_value(ApiError::not_found("Deposit", "3")).unwrap();
        assert!(json.get("missingFields").is_none());
        assert_eq!(json["code"], "NOT_FOUND");
    }
}
