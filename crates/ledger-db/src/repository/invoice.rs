//! # Invoice Repository
//!
//! Database operations for fuel invoices.
//!
//! ## Key Operations
//! - CRUD keyed on the store-assigned integer id
//! - Case-insensitive search over code, control number, category, notes
//! - Monthly sums for reconciliation
//!
//! ## One Statement per Mutation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How a Write Reaches SQLite                           │
//! │                                                                         │
//! │  NewInvoice (validated, derived values computed)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT / UPDATE / DELETE ... RETURNING <all columns>                   │
//! │       │                                                                 │
//! │       ├── row returned      → Ok(Invoice)         (fully written)       │
//! │       ├── no row            → Err(NotFound)       (nothing written)     │
//! │       └── UNIQUE(code) hit  → Err(UniqueViolation)(nothing written)     │
//! │                                                                         │
//! │  No read-then-write: the conflict check IS the write.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::{month_predicate, parse_date};
use ledger_core::filter::{filter_by_text, INVOICE_SEARCH_FIELDS};
use ledger_core::{Invoice, MonthKey, NewInvoice};

macro_rules! invoice_columns {
    () => {
        "id, code, control_number, date, time, quantity, unit, category, unit_price, \
         taxed_sales, surcharge_a, surcharge_b, surcharge_c, total, notes, created_at"
    };
}

/// Raw `invoices` row. Dates are still text here.
#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
    id: i64,
    code: String,
    control_number: String,
    date: String,
    time: String,
    quantity: f64,
    unit: String,
    category: String,
    unit_price: f64,
    taxed_sales: f64,
    surcharge_a: f64,
    surcharge_b: f64,
    surcharge_c: f64,
    total: f64,
    notes: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
    type Error = DbError;

    fn try_from(row: InvoiceRow) -> DbResult<Self> {
        Ok(Invoice {
            date: parse_date("invoices", row.id, &row.date)?,
            id: row.id,
            code: row.code,
            control_number: row.control_number,
            time: row.time,
            quantity: row.quantity,
            unit: row.unit,
            category: row.category,
            unit_price: row.unit_price,
            taxed_sales: row.taxed_sales,
            surcharge_a: row.surcharge_a,
            surcharge_b: row.surcharge_b,
            surcharge_c: row.surcharge_c,
            total: row.total,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

fn into_invoices(rows: Vec<InvoiceRow>) -> DbResult<Vec<Invoice>> {
    rows.into_iter().map(Invoice::try_from).collect()
}

/// Repository for invoice database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.invoices();
///
/// let all = repo.list().await?;           // date DESC, time DESC
/// let one = repo.get(42).await?;          // Err(NotFound) if absent
/// let hits = repo.search("ctrl-00").await?;
/// ```
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// All invoices, newest first.
    ///
    /// Sorted by `date DESC, time DESC` on the raw text, which is
    /// chronological because both columns are fixed width.
    pub async fn list(&self) -> DbResult<Vec<Invoice>> {
        debug!("Listing invoices");

        let rows = sqlx::query_as::<_, InvoiceRow>(concat!(
            "SELECT ",
            invoice_columns!(),
            " FROM invoices ORDER BY date DESC, time DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed invoices");
        into_invoices(rows)
    }

    /// One invoice by id.
    pub async fn get(&self, id: i64) -> DbResult<Invoice> {
        debug!(id = id, "Fetching invoice");

        let row = sqlx::query_as::<_, InvoiceRow>(concat!(
            "SELECT ",
            invoice_columns!(),
            " FROM invoices WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| DbError::not_found("Invoice", id))?.try_into()
    }

    /// Inserts a new invoice and returns it with its id and timestamp.
    ///
    /// ## Returns
    /// * `Ok(Invoice)` - The persisted record
    /// * `Err(DbError::UniqueViolation)` - `code` already exists
    pub async fn create(&self, invoice: &NewInvoice) -> DbResult<Invoice> {
        debug!(code = %invoice.code, "Inserting invoice");

        let row = sqlx::query_as::<_, InvoiceRow>(concat!(
            r#"
            INSERT INTO invoices (
                code, control_number, date, time,
                quantity, unit, category, unit_price, taxed_sales,
                surcharge_a, surcharge_b, surcharge_c, total,
                notes, created_at
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6, ?7, ?8, ?9,
                ?10, ?11, ?12, ?13,
                ?14, ?15
            )
            RETURNING "#,
            invoice_columns!()
        ))
        .bind(&invoice.code)
        .bind(&invoice.control_number)
        .bind(invoice.date.to_string())
        .bind(&invoice.time)
        .bind(invoice.quantity)
        .bind(&invoice.unit)
        .bind(&invoice.category)
        .bind(invoice.unit_price)
        .bind(invoice.taxed_sales)
        .bind(invoice.surcharge_a)
        .bind(invoice.surcharge_b)
        .bind(invoice.surcharge_c)
        .bind(invoice.total)
        .bind(&invoice.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(&invoice.code))?;

        info!(id = row.id, code = %row.code, total = row.total, "Invoice created");
        row.try_into()
    }

    /// Overwrites every field except `id` and `created_at`.
    ///
    /// ## Returns
    /// * `Ok(Invoice)` - The record as now stored
    /// * `Err(DbError::NotFound)` - No invoice with that id
    /// * `Err(DbError::UniqueViolation)` - New code belongs to another invoice
    pub async fn update(&self, id: i64, invoice: &NewInvoice) -> DbResult<Invoice> {
        debug!(id = id, code = %invoice.code, "Updating invoice");

        let row = sqlx::query_as::<_, InvoiceRow>(concat!(
            r#"
            UPDATE invoices SET
                code = ?2,
                control_number = ?3,
                date = ?4,
                time = ?5,
                quantity = ?6,
                unit = ?7,
                category = ?8,
                unit_price = ?9,
                taxed_sales = ?10,
                surcharge_a = ?11,
                surcharge_b = ?12,
                surcharge_c = ?13,
                total = ?14,
                notes = ?15
            WHERE id = ?1
            RETURNING "#,
            invoice_columns!()
        ))
        .bind(id)
        .bind(&invoice.code)
        .bind(&invoice.control_number)
        .bind(invoice.date.to_string())
        .bind(&invoice.time)
        .bind(invoice.quantity)
        .bind(&invoice.unit)
        .bind(&invoice.category)
        .bind(invoice.unit_price)
        .bind(invoice.taxed_sales)
        .bind(invoice.surcharge_a)
        .bind(invoice.surcharge_b)
        .bind(invoice.surcharge_c)
        .bind(invoice.total)
        .bind(&invoice.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(&invoice.code))?;

        let row = row.ok_or_else(|| DbError::not_found("Invoice", id))?;
        info!(id = id, total = row.total, "Invoice updated");
        row.try_into()
    }

    /// Hard-deletes an invoice and returns what was removed.
    pub async fn delete(&self, id: i64) -> DbResult<Invoice> {
        debug!(id = id, "Deleting invoice");

        let row = sqlx::query_as::<_, InvoiceRow>(concat!(
            "DELETE FROM invoices WHERE id = ?1 RETURNING ",
            invoice_columns!()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or_else(|| DbError::not_found("Invoice", id))?;
        info!(id = id, code = %row.code, "Invoice deleted");
        row.try_into()
    }

    /// Case-insensitive substring search over code, control number,
    /// category and notes. A blank term lists everything.
    ///
    /// Matching runs on the loaded rows with Unicode case folding, since
    /// SQLite's `LOWER()` only folds ASCII. Results keep the
    /// `date DESC, time DESC` order of [`list`](Self::list).
    pub async fn search(&self, term: &str) -> DbResult<Vec<Invoice>> {
        let term = term.trim();
        debug!(term = %term, "Searching invoices");

        let invoices = self.list().await?;
        let matching = filter_by_text(&invoices, term, INVOICE_SEARCH_FIELDS);

        debug!(count = matching.len(), "Search returned invoices");
        Ok(matching)
    }

    /// Sum of `total` and number of invoices in one month.
    pub async fn total_for_month(&self, month: &MonthKey) -> DbResult<(f64, i64)> {
        let (predicate, key) = month_predicate(month);
        debug!(month = %key, "Summing invoices for month");

        let sql = format!(
            "SELECT COALESCE(SUM(total), 0.0), COUNT(*) FROM invoices WHERE {}",
            predicate
        );
        let totals: (f64, i64) = sqlx::query_as(&sql).bind(key).fetch_one(&self.pool).await?;

        Ok(totals)
    }

    /// Counts invoices (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
