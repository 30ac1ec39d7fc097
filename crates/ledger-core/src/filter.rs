//! # Query/Filter Layer
//!
//! Pure predicates and aggregates over records that are already loaded.
//! Nothing here touches the store.
//!
//! ## Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      InvoiceQuery::apply                                │
//! │                                                                         │
//! │  all invoices (date DESC, time DESC)                                    │
//! │       │                                                                 │
//! │       ├──► text      "ctrl-0"     substring, case-insensitive           │
//! │       ├──► month     "10"         date month segment == "10"            │
//! │       ├──► day       "2025-10-01" date == "2025-10-01"                  │
//! │       └──► category  "OTHER"      category != DIESEL_CATEGORY           │
//! │       │                                                                 │
//! │       ▼  AND of all predicates: order of application is irrelevant      │
//! │  matching invoices (input order preserved)                              │
//! │       │                                                                 │
//! │       ├──► aggregate_totals  → Totals                                   │
//! │       ├──► group_by_day      → Vec<DailySummary> (date DESC)            │
//! │       └──► statistics        → Statistics                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every empty criterion is the identity. Each filter returns a new `Vec`
//! and leaves its input untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::date::LedgerDate;
use crate::types::{Deposit, Invoice, DIESEL_CATEGORY, OTHER_CATEGORY};

// =============================================================================
// Record Access
// =============================================================================

/// Anything with a business date and an amount: what the daily summary needs.
pub trait LedgerEntry {
    fn date(&self) -> LedgerDate;

    /// The amount this record contributes to a daily summary.
    fn amount(&self) -> f64;
}

impl LedgerEntry for Invoice {
    fn date(&self) -> LedgerDate {
        self.date
    }

    fn amount(&self) -> f64 {
        self.total
    }
}

impl LedgerEntry for Deposit {
    fn date(&self) -> LedgerDate {
        self.date
    }

    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Reads one text field of a record for free-text search.
pub type FieldSelector<R> = fn(&R) -> &str;

fn invoice_code(invoice: &Invoice) -> &str {
    &invoice.code
}

fn invoice_control_number(invoice: &Invoice) -> &str {
    &invoice.control_number
}

fn invoice_category(invoice: &Invoice) -> &str {
    &invoice.category
}

fn invoice_notes(invoice: &Invoice) -> &str {
    &invoice.notes
}

/// The invoice fields free-text search looks at.
pub const INVOICE_SEARCH_FIELDS: &[FieldSelector<Invoice>] = &[
    invoice_code,
    invoice_control_number,
    invoice_category,
    invoice_notes,
];

// =============================================================================
// Predicates
// =============================================================================

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Keeps records where any selected field contains `term`, ignoring case.
pub fn filter_by_text<R: Clone>(
    records: &[R],
    term: &str,
    fields: &[FieldSelector<R>],
) -> Vec<R> {
    if term.is_empty() {
        return records.to_vec();
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| {
            fields
                .iter()
                .any(|field| contains_ignore_case(field(*record), &needle))
        })
        .cloned()
        .collect()
}

/// Keeps records whose two-digit month segment equals `mm` exactly.
///
/// Plain text comparison: `"3"` matches nothing, `"03"` matches March.
pub fn filter_by_month<R: LedgerEntry + Clone>(records: &[R], mm: &str) -> Vec<R> {
    if mm.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| record.date().month_segment() == mm)
        .cloned()
        .collect()
}

/// Keeps records whose date equals `day` (`YYYY-MM-DD`) exactly.
pub fn filter_by_day<R: LedgerEntry + Clone>(records: &[R], day: &str) -> Vec<R> {
    if day.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| record.date().to_string() == day)
        .cloned()
        .collect()
}

fn matches_category(invoice: &Invoice, category: &str) -> bool {
    if category == OTHER_CATEGORY {
        invoice.category != DIESEL_CATEGORY
    } else {
        invoice.category == category
    }
}

/// Keeps invoices of one category; [`OTHER_CATEGORY`] selects every
/// non-diesel invoice.
pub fn filter_by_category(invoices: &[Invoice], category: &str) -> Vec<Invoice> {
    if category.is_empty() {
        return invoices.to_vec();
    }
    invoices
        .iter()
        .filter(|invoice| matches_category(invoice, category))
        .cloned()
        .collect()
}

// =============================================================================
// Composed Query
// =============================================================================

/// The filter bar of the invoice view. Empty fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct InvoiceQuery {
    pub search: String,
    pub month: String,
    pub day: String,
    pub category: String,
}

impl InvoiceQuery {
    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.month.is_empty()
            && self.day.is_empty()
            && self.category.is_empty()
    }

    /// Applies every criterion (AND), preserving input order.
    pub fn apply(&self, invoices: &[Invoice]) -> Vec<Invoice> {
        let matching = filter_by_text(invoices, &self.search, INVOICE_SEARCH_FIELDS);
        let matching = filter_by_month(&matching, &self.month);
        let matching = filter_by_day(&matching, &self.day);
        filter_by_category(&matching, &self.category)
    }
}

// =============================================================================
// Aggregates
// =============================================================================

/// Column sums of a set of invoices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Totals {
    pub taxed_sales: f64,
    pub surcharge_a: f64,
    pub surcharge_b: f64,
    pub surcharge_c: f64,
    pub total: f64,
}

/// Sums the stored (unrounded) values; all zeros for an empty slice.
pub fn aggregate_totals(invoices: &[Invoice]) -> Totals {
    invoices.iter().fold(Totals::default(), |acc, invoice| Totals {
        taxed_sales: acc.taxed_sales + invoice.taxed_sales,
        surcharge_a: acc.surcharge_a + invoice.surcharge_a,
        surcharge_b: acc.surcharge_b + invoice.surcharge_b,
        surcharge_c: acc.surcharge_c + invoice.surcharge_c,
        total: acc.total + invoice.total,
    })
}

/// One row of the daily summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DailySummary {
    #[ts(type = "string")]
    pub date: LedgerDate,
    pub count: usize,
    pub total_amount: f64,
}

/// Groups records by date, newest date first.
pub fn group_by_day<R: LedgerEntry>(records: &[R]) -> Vec<DailySummary> {
    let mut days: BTreeMap<LedgerDate, (usize, f64)> = BTreeMap::new();
    for record in records {
        let entry = days.entry(record.date()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += record.amount();
    }

    days.into_iter()
        .rev()
        .map(|(date, (count, total_amount))| DailySummary {
            date,
            count,
            total_amount,
        })
        .collect()
}

/// Headline figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Statistics {
    pub count: usize,
    pub diesel_count: usize,
    pub other_count: usize,
    pub totals: Totals,
}

pub fn statistics(invoices: &[Invoice]) -> Statistics {
    let diesel_count = invoices.iter().filter(|invoice| invoice.is_diesel()).count();
    Statistics {
        count: invoices.len(),
        diesel_count,
        other_count: invoices.len() - diesel_count,
        totals: aggregate_totals(invoices),
    }
}

// =============================================================================
// Views
// =============================================================================

/// The filtered invoice view: matches plus the figures shown beside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceView {
    pub invoices: Vec<Invoice>,
    pub totals: Totals,
    pub daily: Vec<DailySummary>,
    pub count: usize,
    pub diesel_count: usize,
    pub other_count: usize,
}

impl InvoiceQuery {
    /// Filters `invoices` and summarizes what is left.
    pub fn view(&self, invoices: &[Invoice]) -> InvoiceView {
        let matching = self.apply(invoices);
        let stats = statistics(&matching);
        InvoiceView {
            daily: group_by_day(&matching),
            totals: stats.totals,
            count: stats.count,
            diesel_count: stats.diesel_count,
            other_count: stats.other_count,
            invoices: matching,
        }
    }
}

/// Invoiced vs. deposited amounts for one `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MonthlyReconciliation {
    pub month: String,
    pub invoiced_total: f64,
    pub deposited_total: f64,
    /// invoiced_total - deposited_total; positive means money not yet banked.
    pub difference: f64,
    pub invoice_count: i64,
    pub deposit_count: i64,
}

impl MonthlyReconciliation {
    pub fn new(
        month: impl Into<String>,
        (invoiced_total, invoice_count): (f64, i64),
        (deposited_total, deposit_count): (f64, i64),
    ) -> Self {
        MonthlyReconciliation {
            month: month.into(),
            invoiced_total,
            deposited_total,
            difference: invoiced_total - deposited_total,
            invoice_count,
            deposit_count,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
