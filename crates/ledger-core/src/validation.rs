//! # Validation Module
//!
//! Turns untrusted payloads into validated fields, or into the complete
//! list of what is wrong with them.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser form                                                 │
//! │  └── required attributes, number inputs                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: JSON deserialization (ledger-server)                         │
//! │  ├── unknown fields rejected                                           │
//! │  └── wrong JSON types rejected                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  ├── presence (blank text counts as missing, 0 counts as present)      │
//! │  ├── numeric ranges (quantity, unitPrice, amount > 0; surcharges ≥ 0)  │
//! │  ├── derived taxedSales / total must stay finite                       │
//! │  └── date YYYY-MM-DD, time HH:MM                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: SQLite                                                       │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── UNIQUE(code)  ← the only conflict check, done at write time       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ledger_core::validation::validate_deposit;
//! use ledger_core::DepositInput;
//!
//! let input = DepositInput {
//!     amount: Some(1500.0.into()),
//!     date: Some("2025-03-02".into()),
//!     description: Some("Weekly cash".into()),
//!     reference: Some("DEP-0001".into()),
//!     ..Default::default()
//! };
//! let deposit = validate_deposit(&input).unwrap();
//! assert_eq!(deposit.amount, 1500.0);
//!
//! let errors = validate_deposit(&DepositInput::default()).unwrap_err();
//! assert_eq!(errors.fields(), vec!["amount", "date", "description", "reference"]);
//! ```

use crate::calc::{compute_taxed_sales, compute_total};
use crate::date::LedgerDate;
use crate::error::{ValidationError, ValidationErrors};
use crate::types::{DepositInput, InvoiceFields, InvoiceInput, NewDeposit, NumericInput};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationErrors>;

// =============================================================================
// Field Validators
// =============================================================================

/// A required text field, trimmed.
fn required_text(errors: &mut ValidationErrors, field: &str, value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => {
            errors.push(ValidationError::required(field));
            String::new()
        }
    }
}

#[derive(Clone, Copy)]
enum Bound {
    Positive,
    NonNegative,
}

/// A required number within `bound`. Returns 0.0 after recording an error.
fn required_number(
    errors: &mut ValidationErrors,
    field: &str,
    value: &Option<NumericInput>,
    bound: Bound,
) -> f64 {
    let input = match value {
        Some(input) if !input.is_blank() => input,
        _ => {
            errors.push(ValidationError::required(field));
            return 0.0;
        }
    };

    let Some(number) = input.as_f64() else {
        errors.push(ValidationError::NotANumber {
            field: field.to_string(),
        });
        return 0.0;
    };

    match bound {
        Bound::Positive if number <= 0.0 => errors.push(ValidationError::MustBePositive {
            field: field.to_string(),
        }),
        Bound::NonNegative if number < 0.0 => errors.push(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        }),
        _ => {}
    }
    number
}

/// A required `YYYY-MM-DD` date. No calendar check.
fn required_date(errors: &mut ValidationErrors, field: &str, value: &Option<String>) -> LedgerDate {
    let text = required_text(errors, field, value);
    if text.is_empty() {
        return LedgerDate::default();
    }
    match text.parse() {
        Ok(date) => date,
        Err(_) => {
            errors.push(ValidationError::InvalidFormat {
                field: field.to_string(),
                reason: "expected YYYY-MM-DD".to_string(),
            });
            LedgerDate::default()
        }
    }
}

/// Checks a `HH:MM` time of day (00:00 through 23:59).
pub fn is_valid_time(time: &str) -> bool {
    let bytes = time.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    let two_digits = |pair: &[u8]| -> Option<u8> {
        match pair {
            [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
                Some((a - b'0') * 10 + (b - b'0'))
            }
            _ => None,
        }
    };
    matches!(
        (two_digits(&bytes[0..2]), two_digits(&bytes[3..5])),
        (Some(hour), Some(minute)) if hour < 24 && minute < 60
    )
}

fn required_time(errors: &mut ValidationErrors, field: &str, value: &Option<String>) -> String {
    let text = required_text(errors, field, value);
    if !text.is_empty() && !is_valid_time(&text) {
        errors.push(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected HH:MM".to_string(),
        });
    }
    text
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates an invoice create/update payload.
///
/// Every problem is reported, in payload field order. Derived fields in the
/// payload were already dropped during deserialization.
pub fn validate_invoice(input: &InvoiceInput) -> ValidationResult<InvoiceFields> {
    let mut errors = ValidationErrors::new();

    let fields = InvoiceFields {
        code: required_text(&mut errors, "code", &input.code),
        control_number: required_text(&mut errors, "controlNumber", &input.control_number),
        date: required_date(&mut errors, "date", &input.date),
        time: required_time(&mut errors, "time", &input.time),
        quantity: required_number(&mut errors, "quantity", &input.quantity, Bound::Positive),
        unit: required_text(&mut errors, "unit", &input.unit),
        category: required_text(&mut errors, "category", &input.category),
        unit_price: required_number(&mut errors, "unitPrice", &input.unit_price, Bound::Positive),
        surcharge_a: required_number(
            &mut errors,
            "surchargeA",
            &input.surcharge_a,
            Bound::NonNegative,
        ),
        surcharge_b: required_number(
            &mut errors,
            "surchargeB",
            &input.surcharge_b,
            Bound::NonNegative,
        ),
        surcharge_c: required_number(
            &mut errors,
            "surchargeC",
            &input.surcharge_c,
            Bound::NonNegative,
        ),
        notes: input.notes.as_deref().map(str::trim).unwrap_or_default().to_string(),
    };

    if errors.is_empty() {
        check_derived(&mut errors, &fields);
    }

    errors.into_result(fields)
}

/// Finite inputs can still overflow once multiplied or summed.
fn check_derived(errors: &mut ValidationErrors, fields: &InvoiceFields) {
    let too_large = |field: &str| ValidationError::TooLarge {
        field: field.to_string(),
    };

    let taxed_sales = compute_taxed_sales(fields.quantity, fields.unit_price);
    if !taxed_sales.is_finite() {
        errors.push(too_large("quantity"));
        errors.push(too_large("unitPrice"));
        return;
    }

    let total = compute_total(
        taxed_sales,
        fields.surcharge_a,
        fields.surcharge_b,
        fields.surcharge_c,
    );
    if !total.is_finite() {
        errors.push(too_large("surchargeA"));
        errors.push(too_large("surchargeB"));
        errors.push(too_large("surchargeC"));
    }
}

/// Validates a deposit create/update payload.
pub fn validate_deposit(input: &DepositInput) -> ValidationResult<NewDeposit> {
    let mut errors = ValidationErrors::new();

    let deposit = NewDeposit {
        amount: required_number(&mut errors, "amount", &input.amount, Bound::Positive),
        date: required_date(&mut errors, "date", &input.date),
        description: required_text(&mut errors, "description", &input.description),
        reference: required_text(&mut errors, "reference", &input.reference),
    };

    errors.into_result(deposit)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DIESEL_CATEGORY;

    fn valid_invoice() -> InvoiceInput {
        InvoiceInput {
            code: Some("GEN-001-2025".into()),
            control_number: Some("CTRL-001".into()),
            date: Some("2025-03-01".into()),
            time: Some("08:00".into()),
            quantity: Some(100.0.into()),
            unit: Some("Gallons".into()),
            category: Some(DIESEL_CATEGORY.into()),
            unit_price: Some(3.5.into()),
            surcharge_a: Some(1.0.into()),
            surcharge_b: Some(0.5.into()),
            surcharge_c: Some(10.0.into()),
            notes: None,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_invoice() {
        let fields = validate_invoice(&valid_invoice()).unwrap();
        assert_eq!(fields.code, "GEN-001-2025");
        assert_eq!(fields.date.to_string(), "2025-03-01");
        assert_eq!(fields.quantity, 100.0);
        assert_eq!(fields.notes, "");
    }

    #[test]
    fn test_empty_payload_lists_every_field() {
        let errors = validate_invoice(&InvoiceInput::default()).unwrap_err();
        assert_eq!(
            errors.fields(),
            vec![
                "code",
                "controlNumber",
                "date",
                "time",
                "quantity",
                "unit",
                "category",
                "unitPrice",
                "surchargeA",
                "surchargeB",
                "surchargeC",
            ]
        );
    }

    #[test]
    fn test_blank_text_is_missing() {
        let mut input = valid_invoice();
        input.code = Some("   ".into());
        input.quantity = Some(NumericInput::Text(String::new()));

        let errors = validate_invoice(&input).unwrap_err();
        assert_eq!(errors.fields(), vec!["code", "quantity"]);
        assert!(matches!(errors.errors()[0], ValidationError::Required { .. }));
    }

    #[test]
    fn test_zero_surcharge_is_present() {
        let mut input = valid_invoice();
        input.surcharge_a = Some(0.0.into());
        input.surcharge_b = Some(NumericInput::Text("0".into()));
        assert!(validate_invoice(&input).is_ok());
    }

    #[test]
    fn test_numeric_ranges() {
        let mut input = valid_invoice();
        input.quantity = Some(0.0.into());
        input.unit_price = Some((-1.0).into());
        input.surcharge_c = Some((-0.01).into());

        let errors = validate_invoice(&input).unwrap_err();
        assert_eq!(errors.fields(), vec!["quantity", "unitPrice", "surchargeC"]);
        assert_eq!(errors.errors()[0].to_string(), "quantity must be greater than 0");
        assert_eq!(errors.errors()[2].to_string(), "surchargeC must not be negative");
    }

    #[test]
    fn test_numeric_text_and_garbage() {
        let mut input = valid_invoice();
        input.quantity = Some(NumericInput::Text("100.5".into()));
        assert_eq!(validate_invoice(&input).unwrap().quantity, 100.5);

        input.quantity = Some(NumericInput::Text("lots".into()));
        let errors = validate_invoice(&input).unwrap_err();
        assert!(matches!(errors.errors()[0], ValidationError::NotANumber { .. }));
    }

    #[test]
    fn test_date_and_time_formats() {
        let mut input = valid_invoice();
        input.date = Some("2025-02-31".into());
        assert!(validate_invoice(&input).is_ok());

        input.date = Some("01/03/2025".into());
        input.time = Some("8:00".into());
        let errors = validate_invoice(&input).unwrap_err();
        assert_eq!(errors.fields(), vec!["date", "time"]);

        assert!(is_valid_time("23:59"));
        assert!(!is_valid_time("24:00"));
        assert!(!is_valid_time("12:60"));
    }

    #[test]
    fn test_overflowing_derived_values_are_rejected() {
        let mut input = valid_invoice();
        input.quantity = Some(1e200.into());
        input.unit_price = Some(1e200.into());

        let errors = validate_invoice(&input).unwrap_err();
        assert_eq!(errors.fields(), vec!["quantity", "unitPrice"]);
        assert_eq!(errors.errors()[0].to_string(), "quantity is too large");

        let mut input = valid_invoice();
        input.surcharge_a = Some(f64::MAX.into());
        input.surcharge_b = Some(f64::MAX.into());
        let errors = validate_invoice(&input).unwrap_err();
        assert_eq!(errors.fields(), vec!["surchargeA", "surchargeB", "surchargeC"]);

        let mut input = valid_invoice();
        input.quantity = Some(1e150.into());
        input.unit_price = Some(1e150.into());
        assert!(validate_invoice(&input).is_ok());
    }

    #[test]
    fn test_deposit_rules() {
        let input = DepositInput {
            amount: Some(0.0.into()),
            date: Some("2025-03-02".into()),
            description: Some("Cash".into()),
            reference: Some("".into()),
            ..Default::default()
        };
        let errors = validate_deposit(&input).unwrap_err();
        assert_eq!(errors.fields(), vec!["amount", "reference"]);
    }
}
