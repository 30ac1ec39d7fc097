//! # ledger-core: Pure Business Logic for the Fuel Ledger
//!
//! Records, the derived-value calculator, filters and validation for a
//! single-tenant ledger of fuel invoices and bank deposits. Zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Fuel Ledger Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser UI (collaborator)                    │   │
//! │  │    invoice form ──► filter bar ──► daily summary ──► deposits   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ledger-server (Request Boundary)                   │   │
//! │  │    validate ──► calculate ──► persist ──► respond               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ledger-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   calc    │  │  filter   │  │ validation│  │   │
//! │  │   │  Invoice  │  │ taxed     │  │ month/day │  │  payload  │  │   │
//! │  │   │  Deposit  │  │ sales,    │  │ category  │  │  → fields │  │   │
//! │  │   │  Inputs   │  │ total     │  │ totals    │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    ledger-db (Ledger Store)                     │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`date`] - `LedgerDate` and `MonthKey`, fixed-format text dates
//! - [`types`] - Records (Invoice, Deposit) and input payloads
//! - [`calc`] - Derived values (taxed sales, total) and display rounding
//! - [`filter`] - In-memory filters and aggregates
//! - [`validation`] - Payload validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output
//! 2. **No I/O**: database, network and clock access live in other crates
//! 3. **Full-Precision Amounts**: f64 all the way to storage, rounded only for display
//! 4. **Dates Are Text**: compared as fixed-width strings, never converted to a timezone
//!
//! ## Example Usage
//!
//! ```rust
//! use ledger_core::{validate_invoice, InvoiceInput, NewInvoice};
//!
//! let input = InvoiceInput {
//!     code: Some("GEN-001-2025".into()),
//!     control_number: Some("CTRL-001".into()),
//!     date: Some("2025-03-01".into()),
//!     time: Some("08:00".into()),
//!     quantity: Some(100.0.into()),
//!     unit: Some("Gallons".into()),
//!     category: Some("low-sulfur diesel".into()),
//!     unit_price: Some(3.5.into()),
//!     surcharge_a: Some(1.0.into()),
//!     surcharge_b: Some(0.5.into()),
//!     surcharge_c: Some(10.0.into()),
//!     ..Default::default()
//! };
//!
//! let invoice = NewInvoice::from_fields(validate_invoice(&input).unwrap());
//! assert_eq!(invoice.taxed_sales, 350.0);
//! assert_eq!(invoice.total, 361.5);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calc;
pub mod date;
pub mod error;
pub mod filter;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use ledger_core::Invoice` instead of
// `use ledger_core::types::Invoice`

pub use calc::{compute_taxed_sales, compute_total, format_amount, round_to_cents};
pub use date::{LedgerDate, MonthKey};
pub use error::{DateParseError, ValidationError, ValidationErrors};
pub use filter::{
    aggregate_totals, group_by_day, statistics, DailySummary, InvoiceQuery, InvoiceView,
    LedgerEntry, MonthlyReconciliation, Statistics, Totals,
};
pub use types::*;
pub use validation::{validate_deposit, validate_invoice};
