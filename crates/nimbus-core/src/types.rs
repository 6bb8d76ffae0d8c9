//! # Domain Types
//!
//! Core domain types used throughout Nimbus ERP.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │    Employee     │   │     Product     │   │     Invoice     │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │        │
//! │  │  emp_id         │   │  name           │   │  invoice_number │        │
//! │  │  name           │   │  price_cents    │   │  date           │        │
//! │  │  hiring_date    │   │  stock          │   │  total_cents    │        │
//! │  └─────────────────┘   └────────▲────────┘   └────────┬────────┘        │
//! │                                 │                     │ 1..n            │
//! │                                 │            ┌────────▼────────┐        │
//! │                                 └────────────┤   InvoiceItem   │        │
//! │                                   product_id │  quantity, tax  │        │
//! │                                              └─────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every persisted record has a `New*` counterpart carrying only the fields
//! the user supplies; the storage layer assigns ids and timestamps.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::invoice::LineItem;
use crate::money::Money;
use crate::validation::{
    self, validate_identifier, validate_name, validate_optional_text, validate_photo_url,
    validate_stock, ValidationResult,
};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate in basis points (1 bps = 0.01 %, so 1000 = 10 %).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage such as `10.0` or `8.25`.
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        crate::DEFAULT_TAX_RATE
    }
}

// =============================================================================
// Employee
// =============================================================================

/// A member of staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: String,
    /// Human-facing employee number, unique across the company.
    pub emp_id: String,
    pub name: String,
    pub national_id: String,
    pub hiring_date: NaiveDate,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Employee {
    /// Case-insensitive match on name or employee number.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q) || self.emp_id.to_lowercase().contains(&q)
    }
}

/// Fields of the "add employee" form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub emp_id: String,
    pub name: String,
    pub national_id: String,
    pub hiring_date: NaiveDate,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub photo_url: Option<String>,
}

impl NewEmployee {
    /// Checks required fields and trims optional ones.
    ///
    /// Empty optional fields are normalized to `None` so that the storage
    /// layer never sees a blank string where "not provided" was meant.
    pub fn validated(self) -> ValidationResult<NewEmployee> {
        validate_identifier("emp_id", &self.emp_id)?;
        validate_name("name", &self.name)?;
        validate_identifier("national_id", &self.national_id)?;
        let address = validate_optional_text("address", self.address.as_deref(), 500)?;
        let phone_number =
            validate_optional_text("phone_number", self.phone_number.as_deref(), 50)?;
        let photo_url = validate_optional_text("photo_url", self.photo_url.as_deref(), 500)?;
        if let Some(url) = photo_url.as_deref() {
            validate_photo_url(url)?;
        }

        Ok(NewEmployee {
            emp_id: self.emp_id.trim().to_string(),
            name: self.name.trim().to_string(),
            national_id: self.national_id.trim().to_string(),
            hiring_date: self.hiring_date,
            address,
            phone_number,
            photo_url,
        })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product that can be put on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Unit price in cents.
    pub price_cents: i64,
    /// Units on hand.
    pub stock: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Case-insensitive match on product name.
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Fields of the product dialog when creating a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub stock: i64,
}

impl NewProduct {
    pub fn validated(self) -> ValidationResult<NewProduct> {
        validate_name("name", &self.name)?;
        let description = validate_optional_text("description", self.description.as_deref(), 1000)?;
        validation::validate_non_negative("price", self.price)?;
        validate_stock(self.stock)?;

        Ok(NewProduct {
            name: self.name.trim().to_string(),
            description,
            price: self.price,
            stock: self.stock,
        })
    }
}

/// A partial edit of a product; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub stock: Option<i64>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.price.is_none() && self.stock.is_none()
    }

    /// Merges the edit onto the current product and validates the result.
    ///
    /// An empty description clears it.
    pub fn apply_to(self, current: &Product) -> ValidationResult<NewProduct> {
        NewProduct {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            description: match self.description {
                Some(d) => Some(d),
                None => current.description.clone(),
            },
            price: self.price.unwrap_or_else(|| current.price()),
            stock: self.stock.unwrap_or(current.stock),
        }
        .validated()
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// A persisted sales invoice. Totals are stored as computed at submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Invoice {
    pub id: String,
    pub invoice_number: String,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Case-insensitive match on invoice number.
    pub fn matches(&self, query: &str) -> bool {
        self.invoice_number
            .to_lowercase()
            .contains(&query.to_lowercase())
    }
}

/// A persisted invoice line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InvoiceItem {
    pub id: String,
    pub invoice_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub tax_cents: i64,
    pub discount_cents: i64,
    pub line_total_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl InvoiceItem {
    /// Rebuilds the calculator view of this line.
    pub fn as_line_item(&self) -> LineItem {
        LineItem {
            product_id: Some(self.product_id.clone()),
            quantity: self.quantity,
            unit_price: Money::from_cents(self.unit_price_cents),
            tax: Money::from_cents(self.tax_cents),
            discount: Money::from_cents(self.discount_cents),
        }
    }
}

/// An invoice line joined with the product it references.
///
/// `product` is `None` only if the product row disappeared, which the
/// schema's foreign key prevents in practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineView {
    #[serde(flatten)]
    pub item: InvoiceItem,
    pub product: Option<Product>,
}

/// An invoice with its lines, as shown on the invoice list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceWithItems {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub items: Vec<InvoiceLineView>,
}

/// A validated invoice ready to be written, produced by
/// [`InvoiceDraft::into_new_invoice`](crate::invoice::InvoiceDraft::into_new_invoice).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvoice {
    pub invoice_number: String,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub subtotal: Money,
    pub tax: Money,
    pub discount: Money,
    pub total: Money,
    pub items: Vec<NewInvoiceItem>,
}

/// One line of a [`NewInvoice`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvoiceItem {
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub tax: Money,
    pub discount: Money,
    pub line_total: Money,
}

/// Parses a UUID-shaped record id, for callers that accept ids from users.
pub fn parse_record_id(field: &str, id: &str) -> Result<String, ValidationError> {
    validation::validate_uuid(id).map_err(|e| e.for_field(field))?;
    Ok(id.trim().to_lowercase())
}

// =============================================================================
// Unit Tests
// =============================================================================
