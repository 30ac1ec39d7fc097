//! # Ledger Service
//!
//! The Request Boundary: every external call enters here, whatever the
//! transport.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  createInvoice(payload) / updateInvoice(id, payload)                    │
//! │                                                                         │
//! │  InvoiceInput ──► validate_invoice ──► InvoiceFields                    │
//! │      │                  │                   │                           │
//! │      │            (all bad fields)          ▼                           │
//! │      │                  │          NewInvoice::from_fields              │
//! │      │                  ▼          (taxedSales, total)                  │
//! │      │          VALIDATION_ERROR            │                           │
//! │      │          (nothing written)           ▼                           │
//! │      │                             InvoiceRepository::create/update     │
//! │      │                                      │                           │
//! │      │                     ┌────────────────┼────────────────┐          │
//! │      │                     ▼                ▼                ▼          │
//! │      │               Invoice + message   CONFLICT        NOT_FOUND      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unique `code` conflicts are left to the store's constraint. The service
//! never looks the code up before writing.

use serde::Serialize;
use tracing::debug;

use ledger_core::{
    statistics, validate_deposit, validate_invoice, Deposit, DepositInput, Invoice, InvoiceInput,
    InvoiceQuery, InvoiceView, LedgerDate, MonthKey, MonthlyReconciliation, NewInvoice, Statistics,
};
use ledger_db::Database;

use crate::error::{ApiError, ApiResult};

/// A persisted record together with a confirmation for the user.
///
/// Serializes flat: `{ "id": 1, "code": "...", ..., "message": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mutation<T> {
    #[serde(flatten)]
    pub record: T,
    pub message: String,
}

impl<T> Mutation<T> {
    fn new(record: T, message: &str) -> Self {
        Mutation {
            record,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LedgerService {
    db: Database,
}

impl LedgerService {
    pub fn new(db: Database) -> Self {
        LedgerService { db }
    }

    /// True when the store answers queries.
    pub async fn health(&self) -> bool {
        self.db.health_check().await
    }

    // =========================================================================
    // Invoices
    // =========================================================================

    /// All invoices, newest first.
    pub async fn list_invoices(&self) -> ApiResult<Vec<Invoice>> {
        Ok(self.db.invoices().list().await?)
    }

    pub async fn get_invoice(&self, id: i64) -> ApiResult<Invoice> {
        Ok(self.db.invoices().get(id).await?)
    }

    pub async fn create_invoice(&self, input: &InvoiceInput) -> ApiResult<Mutation<Invoice>> {
        let invoice = NewInvoice::from_fields(validate_invoice(input)?);
        debug!(code = %invoice.code, total = invoice.total, "Creating invoice");

        let created = self.db.invoices().create(&invoice).await?;
        Ok(Mutation::new(created, "Invoice created successfully"))
    }

    /// Replaces every user-entered field and recomputes the derived ones.
    pub async fn update_invoice(
        &self,
        id: i64,
        input: &InvoiceInput,
    ) -> ApiResult<Mutation<Invoice>> {
        let invoice = NewInvoice::from_fields(validate_invoice(input)?);
        debug!(id, code = %invoice.code, total = invoice.total, "Updating invoice");

        let updated = self.db.invoices().update(id, &invoice).await?;
        Ok(Mutation::new(updated, "Invoice updated successfully"))
    }

    /// Removes the invoice and returns it as it was.
    pub async fn delete_invoice(&self, id: i64) -> ApiResult<Mutation<Invoice>> {
        let removed = self.db.invoices().delete(id).await?;
        Ok(Mutation::new(removed, "Invoice deleted successfully"))
    }

    /// Case-insensitive substring match on code, control number, category
    /// and notes. A blank term returns everything.
    pub async fn search_invoices(&self, term: &str) -> ApiResult<Vec<Invoice>> {
        Ok(self.db.invoices().search(term.trim()).await?)
    }

    /// The filtered invoice view with its totals and daily summary.
    pub async fn view_invoices(&self, query: &InvoiceQuery) -> ApiResult<InvoiceView> {
        check_view_query(query)?;
        let invoices = self.db.invoices().list().await?;
        Ok(query.view(&invoices))
    }

    pub async fn get_statistics(&self) -> ApiResult<Statistics> {
        let invoices = self.db.invoices().list().await?;
        Ok(statistics(&invoices))
    }

    // =========================================================================
    // Deposits
    // =========================================================================

    /// All deposits, newest date first.
    pub async fn list_deposits(&self) -> ApiResult<Vec<Deposit>> {
        Ok(self.db.deposits().list().await?)
    }

    pub async fn get_deposit(&self, id: i64) -> ApiResult<Deposit> {
        Ok(self.db.deposits().get(id).await?)
    }

    pub async fn create_deposit(&self, input: &DepositInput) -> ApiResult<Mutation<Deposit>> {
        let deposit = validate_deposit(input)?;
        debug!(reference = %deposit.reference, amount = deposit.amount, "Creating deposit");

        let created = self.db.deposits().create(&deposit).await?;
        Ok(Mutation::new(created, "Deposit created successfully"))
    }

    pub async fn update_deposit(
        &self,
        id: i64,
        input: &DepositInput,
    ) -> ApiResult<Mutation<Deposit>> {
        let deposit = validate_deposit(input)?;
        debug!(id, reference = %deposit.reference, "Updating deposit");

        let updated = self.db.deposits().update(id, &deposit).await?;
        Ok(Mutation::new(updated, "Deposit updated successfully"))
    }

    pub async fn delete_deposit(&self, id: i64) -> ApiResult<Mutation<Deposit>> {
        let removed = self.db.deposits().delete(id).await?;
        Ok(Mutation::new(removed, "Deposit deleted successfully"))
    }

    /// Deposits in `month`: `MM` matches that month of any year,
    /// `YYYY-MM` one specific month.
    pub async fn list_deposits_by_month(&self, month: &str) -> ApiResult<Vec<Deposit>> {
        let key = parse_month(month)?;
        Ok(self.db.deposits().list_by_month(&key).await?)
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Invoiced vs. deposited totals for a `YYYY-MM` month.
    pub async fn get_monthly_reconciliation(
        &self,
        month: &str,
    ) -> ApiResult<MonthlyReconciliation> {
        let key = parse_month(month)?;
        if !matches!(key, MonthKey::YearMonth { .. }) {
            return Err(ApiError::invalid_field(
                "month",
                format!("Invalid input: month '{}' must be YYYY-MM", month),
            ));
        }

        let invoiced = self.db.invoices().total_for_month(&key).await?;
        let deposited = self.db.deposits().total_for_month(&key).await?;
        Ok(MonthlyReconciliation::new(key.to_string(), invoiced, deposited))
    }
}

fn parse_month(month: &str) -> ApiResult<MonthKey> {
    month
        .trim()
        .parse()
        .map_err(|e| ApiError::invalid_field("month", format!("Invalid input: {}", e)))
}

/// Rejects view criteria that could never match a stored date.
fn check_view_query(query: &InvoiceQuery) -> ApiResult<()> {
    let month_only = matches!(query.month.parse::<MonthKey>(), Ok(MonthKey::Month(_)));
    if !query.month.is_empty() && !month_only {
        return Err(ApiError::invalid_field(
            "month",
            format!("Invalid input: month '{}' must be MM", query.month),
        ));
    }
    if !query.day.is_empty() && query.day.parse::<LedgerDate>().is_err() {
        return Err(ApiError::invalid_field(
            "day",
            format!("Invalid input: day '{}' must be YYYY-MM-DD", query.day),
        ));
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
