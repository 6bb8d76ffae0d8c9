//! # Invoice Repository
//!
//! Database operations for invoices and invoice items.
//!
//! ## Invoice Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Invoice Lifecycle                                 │
//! │                                                                         │
//! │  1. DRAFT (nimbus-core, in memory)                                      │
//! │     └── InvoiceDraft → into_new_invoice() → NewInvoice                  │
//! │                                                                         │
//! │  2. CREATE (this module, one transaction)                               │
//! │     ├── INSERT invoices                                                 │
//! │     ├── INSERT invoice_items × n                                        │
//! │     └── COMMIT  (any failure rolls back the whole invoice)              │
//! │                                                                         │
//! │  3. READ                                                                │
//! │     └── list_with_items() / get_by_id()                                 │
//! │                                                                         │
//! │  Invoices are never updated or deleted afterwards.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::generate_id;
use crate::collection::Collection;
use crate::error::{DbError, DbResult};
use nimbus_core::{
    Invoice, InvoiceItem, InvoiceLineView, InvoiceWithItems, NewInvoice, Product, SalesSummary,
};

const SELECT_INVOICE: &str = r#"
    SELECT id, invoice_number, date, description,
           subtotal_cents, tax_cents, discount_cents, total_cents, created_at
    FROM invoices
"#;

const SELECT_ITEM: &str = r#"
    SELECT id, invoice_id, product_id, quantity, unit_price_cents,
           tax_cents, discount_cents, line_total_cents, created_at
    FROM invoice_items
"#;

const SELECT_PRODUCT: &str = r#"
    SELECT id, name, description, price_cents, stock, created_at, updated_at
    FROM products
"#;

// =============================================================================
// Invoices
// =============================================================================

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Lists every invoice, newest date first, each with its items and each
    /// item with its product.
    pub async fn list_with_items(&self) -> DbResult<Vec<InvoiceWithItems>> {
        let sql = format!("{SELECT_INVOICE} ORDER BY date DESC, created_at DESC");
        let invoices = sqlx::query_as::<_, Invoice>(&sql)
            .fetch_all(&self.pool)
            .await?;

        let sql = format!("{SELECT_ITEM} ORDER BY invoice_id, position");
        let items = sqlx::query_as::<_, InvoiceItem>(&sql)
            .fetch_all(&self.pool)
            .await?;

        let sql = format!(
            "{SELECT_PRODUCT} WHERE id IN (SELECT DISTINCT product_id FROM invoice_items)"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(
            invoices = invoices.len(),
            items = items.len(),
            "Listed invoices with items"
        );
        Ok(assemble(invoices, items, products))
    }

    /// Gets one invoice with its items.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<InvoiceWithItems>> {
        let sql = format!("{SELECT_INVOICE} WHERE id = ?1");
        let Some(invoice) = sqlx::query_as::<_, Invoice>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let items = InvoiceItemRepository::new(self.pool.clone())
            .list_for_invoice(id)
            .await?;

        let sql = format!(
            "{SELECT_PRODUCT} WHERE id IN \
             (SELECT product_id FROM invoice_items WHERE invoice_id = ?1)"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(assemble(vec![invoice], items, products).pop())
    }

    /// Writes an invoice and all of its items in one transaction.
    ///
    /// ## Returns
    /// * `Ok(InvoiceWithItems)` - The stored invoice
    /// * `Err(DbError::UniqueViolation)` - Invoice number already used
    /// * `Err(DbError::ForeignKeyViolation)` - An item references a missing product
    ///
    /// On any error nothing is written.
    pub async fn create(&self, invoice: &NewInvoice) -> DbResult<InvoiceWithItems> {
        let id = generate_id();
        let now = Utc::now();

        debug!(
            id = %id,
            invoice_number = %invoice.invoice_number,
            items = invoice.items.len(),
            "Creating invoice"
        );

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, invoice_number, date, description,
                subtotal_cents, tax_cents, discount_cents, total_cents,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&id)
        .bind(&invoice.invoice_number)
        .bind(invoice.date)
        .bind(&invoice.description)
        .bind(invoice.subtotal.cents())
        .bind(invoice.tax.cents())
        .bind(invoice.discount.cents())
        .bind(invoice.total.cents())
        .bind(now)
        .execute(&mut *tx)
        .await?;

        for (position, item) in invoice.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO invoice_items (
                    id, invoice_id, product_id, quantity, unit_price_cents,
                    tax_cents, discount_cents, line_total_cents, position, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
            )
            .bind(generate_id())
            .bind(&id)
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price.cents())
            .bind(item.tax.cents())
            .bind(item.discount.cents())
            .bind(item.line_total.cents())
            .bind(position as i64)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await.map_err(DbError::transaction)?;

        debug!(
            id = %id,
            invoice_number = %invoice.invoice_number,
            total_cents = invoice.total.cents(),
            "Invoice created"
        );

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| DbError::not_found(Collection::Invoices, &id))
    }

    /// Number of invoices and the sum of their totals.
    pub async fn sales_summary(&self) -> DbResult<SalesSummary> {
        let (count, total): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(total_cents), 0) FROM invoices",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(SalesSummary {
            invoice_count: count as u64,
            total_sales: nimbus_core::Money::from_cents(total),
        })
    }

    pub async fn count(&self) -> DbResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", Collection::Invoices.table_name());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count as u64)
    }
}

/// Groups items under their invoices and attaches products, keeping the
/// order of `invoices` and of the items within each invoice.
fn assemble(
    invoices: Vec<Invoice>,
    items: Vec<InvoiceItem>,
    products: Vec<Product>,
) -> Vec<InvoiceWithItems> {
    let products: HashMap<String, Product> =
        products.into_iter().map(|p| (p.id.clone(), p)).collect();

    let mut lines: HashMap<String, Vec<InvoiceLineView>> = HashMap::new();
    for item in items {
        let product = products.get(&item.product_id).cloned();
        lines
            .entry(item.invoice_id.clone())
            .or_default()
            .push(InvoiceLineView { item, product });
    }

    invoices
        .into_iter()
        .map(|invoice| {
            let items = lines.remove(&invoice.id).unwrap_or_default();
            InvoiceWithItems { invoice, items }
        })
        .collect()
}

// =============================================================================
// Invoice Items
// =============================================================================

/// Repository for invoice item reads. Items are written by
/// [`InvoiceRepository::create`] together with their invoice.
#[derive(Debug, Clone)]
pub struct InvoiceItemRepository {
    pool: SqlitePool,
}

impl InvoiceItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceItemRepository { pool }
    }

    /// Items of one invoice, in the order they were entered.
    pub async fn list_for_invoice(&self, invoice_id: &str) -> DbResult<Vec<InvoiceItem>> {
        let sql = format!("{SELECT_ITEM} WHERE invoice_id = ?1 ORDER BY position");
        let items = sqlx::query_as::<_, InvoiceItem>(&sql)
            .bind(invoice_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    pub async fn count(&self) -> DbResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", Collection::InvoiceItems.table_name());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count as u64)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
