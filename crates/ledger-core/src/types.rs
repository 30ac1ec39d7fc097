//! # Domain Types
//!
//! Records and input payloads used throughout the fuel ledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Incoming (browser JSON)     Validated               Persisted          │
//! │  ───────────────────────     ─────────               ─────────          │
//! │                                                                         │
//! │  InvoiceInput ──validate──► InvoiceFields ──calc──► NewInvoice ──► Invoice
//! │  (all Option, untrusted)    (all present)   (+ taxedSales,    (+ id,    │
//! │                                              + total)          createdAt)
//! │                                                                         │
//! │  DepositInput ──validate──► NewDeposit ───────────────────────► Deposit │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every record has a store-assigned integer `id` and a `created_at`
//! timestamp. Neither ever changes. Invoices additionally carry a unique
//! business `code` (e.g. `GEN-001-2025`) that *may* change on update.

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::date::LedgerDate;

// =============================================================================
// Categories
// =============================================================================

/// The one category the UI highlights. Storage treats it like any other.
pub const DIESEL_CATEGORY: &str = "low-sulfur diesel";

/// Filter sentinel meaning "every category except [`DIESEL_CATEGORY`]".
pub const OTHER_CATEGORY: &str = "OTHER";

// =============================================================================
// Invoice
// =============================================================================

/// A persisted fuel purchase receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Invoice {
    /// Store-assigned identifier.
    pub id: i64,

    /// Business identifier, unique across all invoices.
    pub code: String,

    /// Control number printed on the receipt (not unique).
    pub control_number: String,

    #[ts(type = "string")]
    pub date: LedgerDate,

    /// `HH:MM`, zero padded.
    pub time: String,

    pub quantity: f64,

    /// Unit of `quantity`, e.g. "Gallons".
    pub unit: String,

    pub category: String,

    pub unit_price: f64,

    /// quantity × unit_price, computed at write time.
    pub taxed_sales: f64,

    pub surcharge_a: f64,
    pub surcharge_b: f64,
    pub surcharge_c: f64,

    /// taxed_sales + the three surcharges, computed at write time.
    pub total: f64,

    pub notes: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// True when the category is the distinguished diesel category.
    #[inline]
    pub fn is_diesel(&self) -> bool {
        self.category == DIESEL_CATEGORY
    }
}

/// Validated invoice fields as entered by the user (no derived values).
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceFields {
    pub code: String,
    pub control_number: String,
    pub date: LedgerDate,
    pub time: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    pub unit_price: f64,
    pub surcharge_a: f64,
    pub surcharge_b: f64,
    pub surcharge_c: f64,
    pub notes: String,
}

/// A complete invoice ready for the store: validated fields plus the
/// derived values from [`crate::calc`].
///
/// Only [`NewInvoice::from_fields`] builds one, so derived values can
/// never come from the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub code: String,
    pub control_number: String,
    pub date: LedgerDate,
    pub time: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    pub unit_price: f64,
    pub taxed_sales: f64,
    pub surcharge_a: f64,
    pub surcharge_b: f64,
    pub surcharge_c: f64,
    pub total: f64,
    pub notes: String,
}

// =============================================================================
// Deposit
// =============================================================================

/// A persisted bank deposit, reconciled monthly against invoice totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Deposit {
    pub id: i64,
    pub amount: f64,
    #[ts(type = "string")]
    pub date: LedgerDate,
    pub description: String,
    /// Bank reference / slip number.
    pub reference: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A validated deposit ready for the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDeposit {
    pub amount: f64,
    pub date: LedgerDate,
    pub description: String,
    pub reference: String,
}

// =============================================================================
// Input Payloads
// =============================================================================

/// A number as the browser may send it: a JSON number or numeric text.
#[derive(Debug, Clone, PartialEq, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// True for text that is empty after trimming (treated as missing).
    pub fn is_blank(&self) -> bool {
        matches!(self, NumericInput::Text(t) if t.trim().is_empty())
    }

    /// The finite value, if any.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(t) => t.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

/// Create/update payload for an invoice.
///
/// ## Why every field is `Option`
/// A missing field must not abort deserialization: validation reports
/// *all* missing fields at once. Unknown fields are rejected outright.
/// `id`, `createdAt`, `taxedSales` and `total` are tolerated and dropped.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct InvoiceInput {
    pub code: Option<String>,
    pub control_number: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub quantity: Option<NumericInput>,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub unit_price: Option<NumericInput>,
    pub surcharge_a: Option<NumericInput>,
    pub surcharge_b: Option<NumericInput>,
    pub surcharge_c: Option<NumericInput>,
    pub notes: Option<String>,

    #[serde(default)]
    #[ts(skip)]
    pub id: Option<IgnoredAny>,
    #[serde(default)]
    #[ts(skip)]
    pub created_at: Option<IgnoredAny>,
    #[serde(default)]
    #[ts(skip)]
    pub taxed_sales: Option<IgnoredAny>,
    #[serde(default)]
    #[ts(skip)]
    pub total: Option<IgnoredAny>,
}

/// Create/update payload for a deposit.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct DepositInput {
    pub amount: Option<NumericInput>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,

    #[serde(default)]
    #[ts(skip)]
    pub id: Option<IgnoredAny>,
    #[serde(default)]
    #[ts(skip)]
    pub created_at: Option<IgnoredAny>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_input_accepts_numbers_and_text() {
        assert_eq!(NumericInput::Number(3.5).as_f64(), Some(3.5));
        assert_eq!(NumericInput::Text(" 3.50 ".into()).as_f64(), Some(3.5));
        assert_eq!(NumericInput::Text("abc".into()).as_f64(), None);
        assert_eq!(NumericInput::Text("inf".into()).as_f64(), None);
        assert!(NumericInput::Text("  ".into()).is_blank());
        assert!(!NumericInput::Number(0.0).is_blank());
    }

    #[test]
    fn test_invoice_input_tolerates_derived_fields() {
        let input: InvoiceInput = serde_json::from_value(serde_json::json!({
            "code": "GEN-001-2025",
            "quantity": "100",
            "unitPrice": 3.5,
            "taxedSales": 999999,
            "total": 1,
            "id": 42,
            "createdAt": "yesterday"
        }))
        .unwrap();

        assert_eq!(input.code.as_deref(), Some("GEN-001-2025"));
        assert_eq!(input.quantity, Some(NumericInput::Text("100".into())));
        assert_eq!(input.unit_price, Some(NumericInput::Number(3.5)));
        assert!(input.date.is_none());
    }

    #[test]
    fn test_invoice_input_rejects_unknown_fields() {
        let result: Result<InvoiceInput, _> =
            serde_json::from_value(serde_json::json!({ "code": "X", "discount": 5 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_invoice_serializes_camel_case() {
        let invoice = Invoice {
            id: 1,
            code: "GEN-001-2025".into(),
            control_number: "CTRL-001".into(),
            date: "2025-03-01".parse().unwrap(),
            time: "08:00".into(),
            quantity: 100.0,
            unit: "Gallons".into(),
            category: DIESEL_CATEGORY.into(),
            unit_price: 3.5,
            taxed_sales: 350.0,
            surcharge_a: 1.0,
            surcharge_b: 0.5,
            surcharge_c: 10.0,
            total: 361.5,
            notes: String::new(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&invoice).unwrap();
        assert_eq!(json["controlNumber"], "CTRL-001");
        assert_eq!(json["date"], "2025-03-01");
        assert_eq!(json["taxedSales"], 350.0);
        assert_eq!(json["surchargeC"], 10.0);
        assert!(invoice.is_diesel());
    }
}
