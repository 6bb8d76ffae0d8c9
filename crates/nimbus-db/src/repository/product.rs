//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Deletion
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  delete(id)                                                         │
//! │     │                                                               │
//! │     ├── no row             → DbError::NotFound                      │
//! │     ├── used on an invoice → DbError::ForeignKeyViolation           │
//! │     │                         (invoice_items.product_id RESTRICT)   │
//! │     └── otherwise          → row removed                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::generate_id;
use crate::collection::Collection;
use crate::error::{DbError, DbResult};
use nimbus_core::{NewProduct, Product};

const SELECT_PRODUCT: &str = r#"
    SELECT id, name, description, price_cents, stock, created_at, updated_at
    FROM products
"#;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let sql = format!("{SELECT_PRODUCT} ORDER BY name COLLATE NOCASE, id");
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("{SELECT_PRODUCT} WHERE id = ?1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Inserts a validated product and returns the stored record.
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        let now = Utc::now();
        let record = Product {
            id: generate_id(),
            name: product.name.clone(),
            description: product.description.clone(),
            price_cents: product.price.cents(),
            stock: product.stock,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %record.id, name = %record.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, price_cents, stock, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.description)
        .bind(record.price_cents)
        .bind(record.stock)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    /// Replaces the editable fields of a product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The updated record
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, id: &str, product: &NewProduct) -> DbResult<Product> {
        debug!(id = %id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                price_cents = ?4,
                stock = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents())
        .bind(product.stock)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(Collection::Products, id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found(Collection::Products, id))
    }

    /// Deletes a product.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(Collection::Products, id));
        }

        Ok(())
    }

    pub async fn count(&self) -> DbResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", Collection::Products.table_name());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count as u64)
    }
}
