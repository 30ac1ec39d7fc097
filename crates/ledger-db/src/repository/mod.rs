//! # Repository Module
//!
//! Database repository implementations for the fuel ledger.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Request Boundary (ledger-server)                                      │
//! │       │                                                                 │
//! │       │  db.invoices().search("ctrl-00")                               │
//! │       ▼                                                                 │
//! │  InvoiceRepository                    DepositRepository                 │
//! │  ├── list / get                       ├── list / get                    │
//! │  ├── create / update / delete         ├── create / update / delete      │
//! │  ├── search                           ├── list_by_month                 │
//! │  └── total_for_month / count          └── total_for_month / count       │
//! │       │                                                                 │
//! │       │  SQL Query (text dates in, LedgerDate out)                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`InvoiceRepository`](invoice::InvoiceRepository) - Invoice CRUD, search, monthly sums
//! - [`DepositRepository`](deposit::DepositRepository) - Deposit CRUD, month listing, monthly sums

pub mod deposit;
pub mod invoice;

use ledger_core::{LedgerDate, MonthKey};

use crate::error::{DbError, DbResult};

/// Parses a stored date column.
///
/// Every write goes through `LedgerDate`, so a failure means the file was
/// edited by something else.
pub(crate) fn parse_date(table: &str, id: i64, text: &str) -> DbResult<LedgerDate> {
    text.parse().map_err(|e| {
        DbError::Internal(format!("{}.date of row {} is corrupt: {}", table, id, e))
    })
}

/// SQL predicate on the `date` column plus its bind value.
///
/// ```text
/// "10"      → substr(date, 6, 2) = '10'       any year
/// "2025-10" → substr(date, 1, 7) = '2025-10'  one month of one year
/// ```
pub(crate) fn month_predicate(month: &MonthKey) -> (&'static str, String) {
    match month {
        MonthKey::Month(_) => ("substr(date, 6, 2) = ?1", month.to_string()),
        MonthKey::YearMonth { .. } => ("substr(date, 1, 7) = ?1", month.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_predicate() {
        let (sql, key) = month_predicate(&"03".parse().unwrap());
        assert!(sql.contains("substr(date, 6, 2)"));
        assert_eq!(key, "03");

        let (sql, key) = month_predicate(&"2025-03".parse().unwrap());
        assert!(sql.contains("substr(date, 1, 7)"));
        assert_eq!(key, "2025-03");
    }

    #[test]
    fn test_parse_date_reports_row() {
        assert!(parse_date("invoices", 1, "2025-03-01").is_ok());
        let err = parse_date("invoices", 7, "March 1st").unwrap_err();
        assert!(err.to_string().contains("row 7"));
    }
}
