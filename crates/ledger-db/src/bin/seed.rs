//! # Seed Data Generator
//!
//! Populates an empty ledger with sample fuel invoices and deposits for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed ./ledger_dev.db
//! cargo run -p ledger-db --bin seed
//!
//! # Specify database path
//! cargo run -p ledger-db --bin seed -- --db ./data/ledger.db
//! ```
//!
//! Derived values are computed by the calculator, never written by hand.
//! A database that already holds invoices or deposits is left untouched.

use std::env;

use anyhow::{bail, Context, Result};
use ledger_core::{format_amount, InvoiceFields, NewDeposit, NewInvoice, DIESEL_CATEGORY};
use ledger_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// (code, control number, date, time, gallons, category, unit price,
/// surcharge A, surcharge B, surcharge C, notes)
type SampleInvoice = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    f64,
    &'static str,
    f64,
    f64,
    f64,
    f64,
    &'static str,
);

const SAMPLE_INVOICES: &[SampleInvoice] = &[
    (
        "GEN-001-2023",
        "CTRL-001",
        "2023-10-15",
        "08:30",
        150.50,
        DIESEL_CATEGORY,
        3.85,
        5.79,
        2.90,
        69.53,
        "Truck plate ABC-123",
    ),
    (
        "GEN-002-2023",
        "CTRL-002",
        "2023-10-16",
        "14:15",
        120.00,
        "super gasoline",
        4.25,
        5.10,
        2.55,
        61.20,
        "Service vehicle",
    ),
    (
        "GEN-003-2023",
        "CTRL-003",
        "2023-10-17",
        "10:45",
        200.00,
        DIESEL_CATEGORY,
        3.82,
        7.64,
        3.82,
        91.68,
        "Truck plate XYZ-789",
    ),
    (
        "GEN-004-2023",
        "CTRL-004",
        "2023-10-18",
        "16:20",
        85.50,
        "regular diesel",
        3.75,
        3.21,
        1.60,
        38.48,
        "Truck plate DEF-456",
    ),
];

/// (amount, date, description, reference)
const SAMPLE_DEPOSITS: &[(f64, &str, &str, &str)] = &[
    (1200.00, "2023-10-16", "Cash sales deposit", "DEP-2023-0001"),
    (950.75, "2023-10-18", "Cash sales deposit", "DEP-2023-0002"),
];

fn parse_args() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./ledger_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-d" | "--db" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "-h" | "--help" => {
                println!("Fuel Ledger Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./ledger_dev.db)");
                println!("  -h, --help         Show this help message");
                return None;
            }
            _ => {}
        }
        i += 1;
    }

    Some(db_path)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let Some(db_path) = parse_args() else {
        return Ok(());
    };

    println!("🌱 Fuel Ledger Seed Data Generator");
    println!("==================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("opening {}", db_path))?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let invoices = db.invoices().count().await?;
    let deposits = db.deposits().count().await?;
    if invoices > 0 || deposits > 0 {
        println!("⚠ Database already has {} invoices and {} deposits", invoices, deposits);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    for &(code, control_number, date, time, quantity, category, unit_price, a, b, c, notes) in
        SAMPLE_INVOICES
    {
        let invoice = NewInvoice::from_fields(InvoiceFields {
            code: code.to_string(),
            control_number: control_number.to_string(),
            date: date.parse()?,
            time: time.to_string(),
            quantity,
            unit: "Gallons".to_string(),
            category: category.to_string(),
            unit_price,
            surcharge_a: a,
            surcharge_b: b,
            surcharge_c: c,
            notes: notes.to_string(),
        });

        let created = db.invoices().create(&invoice).await?;
        println!("  + invoice {} total {}", created.code, format_amount(created.total));
    }

    for &(amount, date, description, reference) in SAMPLE_DEPOSITS {
        let deposit = NewDeposit {
            amount,
            date: date.parse()?,
            description: description.to_string(),
            reference: reference.to_string(),
        };

        let created = db.deposits().create(&deposit).await?;
        println!("  + deposit {} amount {}", created.reference, format_amount(created.amount));
    }

    let seeded = db.invoices().count().await?;
    if seeded != SAMPLE_INVOICES.len() as i64 {
        bail!("expected {} invoices after seeding, found {}", SAMPLE_INVOICES.len(), seeded);
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
