//! Text and JSON output.
//!
//! Text output is a plain left-aligned table; JSON output is the serde form
//! of the domain types, pretty-printed.

use serde::Serialize;

use nimbus_core::{DashboardStats, Employee, InvoiceWithItems, Money, Product};

use crate::config::AppConfig;
use crate::error::AppError;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| {
        tracing::error!("Failed to serialize output: {}", e);
        AppError::internal("Failed to serialize output")
    })
}

/// Column-aligned table. Columns listed in `right` are right-aligned.
struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
    right: Vec<usize>,
}

impl Table {
    fn new(headers: Vec<&'static str>) -> Self {
        Table {
            headers,
            rows: Vec::new(),
            right: Vec::new(),
        }
    }

    fn align_right(mut self, columns: &[usize]) -> Self {
        self.right.extend_from_slice(columns);
        self
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let line = |cells: Vec<&str>| -> String {
            cells
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    if self.right.contains(&i) {
                        format!("{:>width$}", cell, width = widths[i])
                    } else {
                        format!("{:<width$}", cell, width = widths[i])
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = Vec::with_capacity(self.rows.len() + 2);
        out.push(line(self.headers.clone()));
        out.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        for row in &self.rows {
            out.push(line(row.iter().map(String::as_str).collect()));
        }
        out.join("\n")
    }
}

pub fn employees(list: &[Employee]) -> String {
    if list.is_empty() {
        return "No employees found.".to_string();
    }
    let mut table = Table::new(vec!["EMP ID", "NAME", "NATIONAL ID", "HIRED", "PHONE", "ADDRESS"]);
    for e in list {
        table.push(vec![
            e.emp_id.clone(),
            e.name.clone(),
            e.national_id.clone(),
            e.hiring_date.to_string(),
            e.phone_number.clone().unwrap_or_default(),
            e.address.clone().unwrap_or_default(),
        ]);
    }
    table.render()
}

pub fn products(list: &[Product], config: &AppConfig) -> String {
    if list.is_empty() {
        return "No products found.".to_string();
    }
    let mut table = Table::new(vec!["ID", "NAME", "PRICE", "STOCK", "DESCRIPTION"]).align_right(&[2, 3]);
    for p in list {
        table.push(vec![
            p.id.clone(),
            p.name.clone(),
            config.format_currency(p.price()),
            p.stock.to_string(),
            p.description.clone().unwrap_or_default(),
        ]);
    }
    table.render()
}

pub fn product(p: &Product, config: &AppConfig) -> String {
    let mut out = vec![
        format!("Product   {}", p.id),
        format!("Name      {}", p.name),
        format!("Price     {}", config.format_currency(p.price())),
        format!("Stock     {}", p.stock),
    ];
    if let Some(description) = &p.description {
        out.push(format!("Details   {}", description));
    }
    out.join("\n")
}

pub fn invoices(list: &[InvoiceWithItems], config: &AppConfig) -> String {
    if list.is_empty() {
        return "No invoices found.".to_string();
    }
    let mut table = Table::new(vec!["ID", "NUMBER", "DATE", "ITEMS", "TOTAL", "DESCRIPTION"])
        .align_right(&[3, 4]);
    for entry in list {
        let inv = &entry.invoice;
        table.push(vec![
            inv.id.clone(),
            inv.invoice_number.clone(),
            inv.date.to_string(),
            entry.items.len().to_string(),
            config.format_currency(inv.total()),
            inv.description.clone().unwrap_or_default(),
        ]);
    }
    table.render()
}

pub fn invoice(entry: &InvoiceWithItems, config: &AppConfig) -> String {
    let inv = &entry.invoice;
    let money = |cents: i64| config.format_currency(Money::from_cents(cents));

    let mut out = vec![format!("Invoice {}  ({})", inv.invoice_number, inv.date)];
    out.push(format!("Id: {}", inv.id));
    if let Some(description) = &inv.description {
        out.push(description.clone());
    }
    out.push(String::new());

    let mut table = Table::new(vec!["PRODUCT", "QTY", "PRICE", "TAX", "DISCOUNT", "LINE TOTAL"])
        .align_right(&[1, 2, 3, 4, 5]);
    for line in &entry.items {
        let name = line
            .product
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_else(|| line.item.product_id.clone());
        table.push(vec![
            name,
            line.item.quantity.to_string(),
            money(line.item.unit_price_cents),
            money(line.item.tax_cents),
            money(line.item.discount_cents),
            money(line.item.line_total_cents),
        ]);
    }
    out.push(table.render());
    out.push(String::new());

    let amounts = [
        ("Subtotal", inv.subtotal_cents),
        ("Tax", inv.tax_cents),
        ("Discount", inv.discount_cents),
        ("Total", inv.total_cents),
    ];
    let width = amounts
        .iter()
        .map(|(_, cents)| money(*cents).len())
        .max()
        .unwrap_or(0);
    for (label, cents) in amounts {
        out.push(format!("{:<10}{:>width$}", label, money(cents), width = width));
    }
    out.join("\n")
}

pub fn dashboard(stats: &DashboardStats, config: &AppConfig) -> String {
    [
        config.company_name.clone(),
        "=".repeat(config.company_name.chars().count()),
        format!("Employees        {}", stats.employee_count),
        format!("Products         {}", stats.product_count),
        format!("Invoices         {}", stats.invoice_count),
        format!("Total sales      {}", config.format_currency(stats.total_sales)),
        format!("Average invoice  {}", config.format_currency(stats.average_invoice)),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use nimbus_core::{Invoice, InvoiceItem, InvoiceLineView};

    fn product() -> Product {
        Product {
            id: "p-1".to_string(),
            name: "Desk Lamp".to_string(),
            description: None,
            price_cents: 2499,
            stock: 18,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_table_alignment() {
        let mut table = Table::new(vec!["NAME", "QTY"]).align_right(&[1]);
        table.push(vec!["Lamp".to_string(), "2".to_string()]);
        table.push(vec!["Office Chair".to_string(), "10".to_string()]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], format!("{:<12}  QTY", "NAME"));
        assert_eq!(lines[1], "------------  ---");
        assert_eq!(lines[2], format!("{:<12}    2", "Lamp"));
        assert_eq!(lines[3], "Office Chair   10");
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(employees(&[]), "No employees found.");
        assert_eq!(products(&[], &AppConfig::default()), "No products found.");
        assert_eq!(invoices(&[], &AppConfig::default()), "No invoices found.");
    }

    #[test]
    fn test_invoice_detail_shows_totals() {
        let entry = InvoiceWithItems {
            invoice: Invoice {
                id: "i-1".to_string(),
                invoice_number: "INV-1".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                description: None,
                subtotal_cents: 2000,
                tax_cents: 200,
                discount_cents: 100,
                total_cents: 2100,
                created_at: Utc::now(),
            },
            items: vec![InvoiceLineView {
                item: InvoiceItem {
                    id: "l-1".to_string(),
                    invoice_id: "i-1".to_string(),
                    product_id: "p-1".to_string(),
                    quantity: 2,
                    unit_price_cents: 1000,
                    tax_cents: 200,
                    discount_cents: 100,
                    line_total_cents: 2100,
                    created_at: Utc::now(),
                },
                product: Some(product()),
            }],
        };

        let text = invoice(&entry, &AppConfig::default());
        assert!(text.starts_with("Invoice INV-1  (2024-03-01)"));
        assert!(text.contains("Desk Lamp"));
        assert!(text.contains("Subtotal  $20.00"));
        assert!(text.contains("Total     $21.00"));
    }

    #[test]
    fn test_product_json() {
        let json = to_json(&product()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "Desk Lamp");
        assert_eq!(value["price_cents"], 2499);
    }
}
