//! # Seed Data Generator
//!
//! Populates a development database with demo employees, products and a few
//! invoices.
//!
//! ## Usage
//! ```bash
//! cargo run -p nimbus-db --bin seed
//! cargo run -p nimbus-db --bin seed -- --db ./data/nimbus.db --invoices 25
//! ```

use std::env;

use chrono::{Duration, NaiveDate};
use nimbus_core::{InvoiceDraft, Money, NewEmployee, NewProduct, Product};
use nimbus_db::{Collection, Database, DbConfig};

const EMPLOYEES: &[(&str, &str, &str)] = &[
    ("E-001", "Amina Yusuf", "Finance"),
    ("E-002", "Bilal Khan", "Sales"),
    ("E-003", "Chen Wei", "Warehouse"),
    ("E-004", "Dana Petrova", "Sales"),
    ("E-005", "Emeka Obi", "Support"),
    ("E-006", "Fatima Noor", "Management"),
];

/// (name, description, price, stock)
const PRODUCTS: &[(&str, &str, &str, i64)] = &[
    ("A4 Paper Ream", "500 sheets, 80 gsm", "5.49", 240),
    ("Ballpoint Pens (10)", "Blue ink", "3.99", 120),
    ("Desk Lamp", "LED, adjustable arm", "24.99", 18),
    ("Office Chair", "Mesh back", "149.00", 6),
    ("Stapler", "Full strip", "8.75", 40),
    ("Whiteboard Markers (4)", "Assorted colours", "6.20", 75),
    ("USB-C Hub", "7 ports", "39.90", 22),
    ("Filing Cabinet", "3 drawers, lockable", "189.00", 3),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut invoice_count: usize = 10;
    let mut db_path = String::from("./nimbus_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--invoices" | "-n" => {
                if i + 1 < args.len() {
                    invoice_count = args[i + 1].parse().unwrap_or(10);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Nimbus ERP Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --invoices <N>  Number of invoices to generate (default: 10)");
                println!("  -d, --db <PATH>     Database file path (default: ./nimbus_dev.db)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Nimbus ERP Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.count(Collection::Products).await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let hired = NaiveDate::from_ymd_opt(2021, 1, 4).ok_or("invalid seed date")?;
    for (idx, (emp_id, name, department)) in EMPLOYEES.iter().enumerate() {
        let employee = NewEmployee {
            emp_id: emp_id.to_string(),
            name: name.to_string(),
            national_id: format!("NID-{:06}", 100_000 + idx * 7919),
            hiring_date: hired + Duration::days(idx as i64 * 97),
            address: Some(format!("{} Department, Building {}", department, idx % 3 + 1)),
            phone_number: Some(format!("+1 555 01{:02}", idx)),
            photo_url: None,
        }
        .validated()?;
        db.employees().insert(&employee).await?;
    }
    println!("✓ Inserted {} employees", EMPLOYEES.len());

    let mut products: Vec<Product> = Vec::with_capacity(PRODUCTS.len());
    for (name, description, price, stock) in PRODUCTS {
        let product = NewProduct {
            name: name.to_string(),
            description: Some(description.to_string()),
            price: price.parse::<Money>()?,
            stock: *stock,
        }
        .validated()?;
        products.push(db.products().insert(&product).await?);
    }
    println!("✓ Inserted {} products", products.len());

    let first_day = NaiveDate::from_ymd_opt(2024, 1, 2).ok_or("invalid seed date")?;
    for n in 0..invoice_count {
        let date = first_day + Duration::days(n as i64 * 3);
        let mut draft = InvoiceDraft::new(format!("INV-{:05}", n + 1), date, None);

        for k in 0..(n % 3 + 1) {
            let product = &products[(n * 5 + k * 3) % products.len()];
            let line = draft.add_product_line(product, ((n + k) % 4 + 1) as i64)?;
            if (n + k) % 5 == 0 {
                draft.set_discount(line, Money::from_cents(100))?;
            }
        }

        let created = db.invoices().create(&draft.into_new_invoice()?).await?;
        println!(
            "  {} {} {}",
            created.invoice.invoice_number,
            created.invoice.date,
            created.invoice.total()
        );
    }
    println!("✓ Inserted {} invoices", invoice_count);

    let summary = db.invoices().sales_summary().await?;
    println!();
    println!(
        "Total sales: {}  Average invoice: {}",
        summary.total_sales,
        summary.average_invoice()
    );
    println!("✓ Seed complete!");

    Ok(())
}
