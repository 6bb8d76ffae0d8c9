//! Command-line arguments.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use nimbus_core::{Money, ValidationError};

#[derive(Debug, Parser)]
#[command(name = "nimbus", version, about = "Nimbus ERP: employees, products and sales invoices")]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// SQLite database file (overrides NIMBUS_DB_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show record counts and sales figures
    Dashboard,

    /// Manage employees
    #[command(subcommand)]
    Employees(EmployeeCommand),

    /// Manage products
    #[command(subcommand)]
    Products(ProductCommand),

    /// Manage sales invoices
    #[command(subcommand)]
    Invoices(InvoiceCommand),
}

#[derive(Debug, Subcommand)]
pub enum EmployeeCommand {
    /// List employees, optionally filtered by name or employee number
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Add an employee
    Add(AddEmployeeArgs),
}

#[derive(Debug, Args)]
pub struct AddEmployeeArgs {
    #[arg(long)]
    pub emp_id: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub national_id: String,
    /// YYYY-MM-DD
    #[arg(long)]
    pub hiring_date: NaiveDate,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// List products, optionally filtered by name
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Add a product
    Add {
        #[arg(long)]
        name: String,
        /// Unit price, e.g. 24.99
        #[arg(long)]
        price: Money,
        #[arg(long)]
        stock: i64,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change fields of an existing product
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<Money>,
        #[arg(long)]
        stock: Option<i64>,
        /// Pass an empty string to clear the description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a product that no invoice uses
    Delete {
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum InvoiceCommand {
    /// List invoices, newest first
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one invoice with its lines
    Show { id: String },
    /// Create an invoice
    New(NewInvoiceArgs),
}

#[derive(Debug, Args)]
pub struct NewInvoiceArgs {
    #[arg(long)]
    pub number: String,
    /// Defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub description: Option<String>,
    /// PRODUCT_ID:QTY[:TAX[:DISCOUNT]], repeatable
    #[arg(long = "item", value_name = "ITEM", required = true)]
    pub items: Vec<ItemSpec>,
}

/// One `--item` value.
///
/// Tax and discount are optional; an omitted tax keeps the value filled in
/// from the product price, an omitted discount stays zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub product_id: String,
    pub quantity: i64,
    pub tax: Option<Money>,
    pub discount: Option<Money>,
}

impl FromStr for ItemSpec {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        if parts.len() < 2 || parts.len() > 4 {
            return Err(ValidationError::InvalidFormat {
                field: "item".to_string(),
                reason: "expected PRODUCT_ID:QTY[:TAX[:DISCOUNT]]".to_string(),
            });
        }
        if parts[0].is_empty() {
            return Err(ValidationError::required("item product"));
        }

        let quantity = parts[1]
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidFormat {
                field: "item quantity".to_string(),
                reason: format!("'{}' is not a whole number", parts[1]),
            })?;

        let amount = |idx: usize, field: &str| -> Result<Option<Money>, ValidationError> {
            match parts.get(idx) {
                Some(raw) if !raw.is_empty() => raw
                    .parse::<Money>()
                    .map(Some)
                    .map_err(|e| e.for_field(field)),
                _ => Ok(None),
            }
        };

        Ok(ItemSpec {
            product_id: parts[0].to_string(),
            quantity,
            tax: amount(2, "item tax")?,
            discount: amount(3, "item discount")?,
        })
    }
}
