//! # Derived-Value Calculator
//!
//! The only arithmetic the ledger performs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  taxed_sales = quantity × unit_price                                    │
//! │  total       = taxed_sales + surcharge_a + surcharge_b + surcharge_c    │
//! │                                                                         │
//! │  Computed at WRITE time, stored, never recomputed on read.              │
//! │  Plain f64, NO rounding before storage.                                 │
//! │  Two-decimal rounding exists only for presentation (round_to_cents).    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Full Precision Storage
//! `100.0 × 0.333` stores `33.300000000000004`, not `33.30`. Totals summed
//! over a month are therefore sums of unrounded values, and the UI rounds
//! the final figure once.

use crate::types::{InvoiceFields, NewInvoice};

/// quantity × unit price.
#[inline]
pub fn compute_taxed_sales(quantity: f64, unit_price: f64) -> f64 {
    quantity * unit_price
}

/// Taxed sales plus the three additive surcharges.
#[inline]
pub fn compute_total(
    taxed_sales: f64,
    surcharge_a: f64,
    surcharge_b: f64,
    surcharge_c: f64,
) -> f64 {
    taxed_sales + surcharge_a + surcharge_b + surcharge_c
}

/// Rounds to two decimals, half away from zero. Presentation only.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats an amount for display, e.g. `1234.5` → `"$1234.50"`.
pub fn format_amount(value: f64) -> String {
    let rounded = round_to_cents(value);
    if rounded < 0.0 {
        format!("-${:.2}", -rounded)
    } else {
        format!("${:.2}", rounded)
    }
}

impl NewInvoice {
    /// Completes validated fields with their derived values.
    pub fn from_fields(fields: InvoiceFields) -> Self {
        let taxed_sales = compute_taxed_sales(fields.quantity, fields.unit_price);
        let total = compute_total(
            taxed_sales,
            fields.surcharge_a,
            fields.surcharge_b,
            fields.surcharge_c,
        );

        NewInvoice {
            code: fields.code,
            control_number: fields.control_number,
            date: fields.date,
            time: fields.time,
            quantity: fields.quantity,
            unit: fields.unit,
            category: fields.category,
            unit_price: fields.unit_price,
            taxed_sales,
            surcharge_a: fields.surcharge_a,
            surcharge_b: fields.surcharge_b,
            surcharge_c: fields.surcharge_c,
            total,
            notes: fields.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DIESEL_CATEGORY;

    fn fields(quantity: f64, unit_price: f64, a: f64, b: f64, c: f64) -> InvoiceFields {
        InvoiceFields {
            code: "GEN-001-2025".into(),
            control_number: "CTRL-001".into(),
            date: "2025-03-01".parse().unwrap(),
            time: "08:00".into(),
            quantity,
            unit: "Gallons".into(),
            category: DIESEL_CATEGORY.into(),
            unit_price,
            surcharge_a: a,
            surcharge_b: b,
            surcharge_c: c,
            notes: String::new(),
        }
    }

    #[test]
    fn test_reference_invoice() {
        let invoice = NewInvoice::from_fields(fields(100.0, 3.50, 1.0, 0.5, 10.0));
        assert_eq!(invoice.taxed_sales, 350.0);
        assert_eq!(invoice.total, 361.5);

        let invoice = NewInvoice::from_fields(fields(200.0, 3.50, 1.0, 0.5, 10.0));
        assert_eq!(invoice.taxed_sales, 700.0);
        assert_eq!(invoice.total, 711.5);
    }

    #[test]
    fn test_total_matches_formula_exactly() {
        let cases = [
            (1.0, 0.1, 0.2, 0.0, 0.0),
            (12.345, 4.321, 0.01, 0.02, 0.03),
            (0.5, 0.5, 0.0, 0.0, 0.0),
            (1500.0, 3.899, 12.75, 0.0, 99.99),
        ];
        for (q, p, a, b, c) in cases {
            let invoice = NewInvoice::from_fields(fields(q, p, a, b, c));
            assert_eq!(invoice.total, q * p + a + b + c);
        }
    }

    #[test]
    fn test_storage_keeps_full_precision() {
        // Rounding here would turn 33.300000000000004 into 33.3.
        let invoice = NewInvoice::from_fields(fields(100.0, 0.333, 0.0, 0.0, 0.0));
        assert_eq!(invoice.taxed_sales, 100.0 * 0.333);
        assert_ne!(invoice.taxed_sales, 33.3);
        assert_eq!(round_to_cents(invoice.taxed_sales), 33.3);
    }

    #[test]
    fn test_presentation_rounding() {
        assert_eq!(round_to_cents(150.499), 150.5);
        assert_eq!(round_to_cents(0.0), 0.0);
        assert_eq!(format_amount(1234.5), "$1234.50");
        assert_eq!(format_amount(0.0), "$0.00");
        assert_eq!(format_amount(-12.346), "-$12.35");
    }
}
