//! # Repository Module
//!
//! One repository per collection.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CLI command                                                            │
//! │       │  db.products().list()                                           │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── list(&self)                                                        │
//! │  ├── get_by_id(&self, id)                                               │
//! │  ├── insert(&self, product)                                             │
//! │  ├── update(&self, id, product)                                         │
//! │  └── delete(&self, id)                                                  │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`EmployeeRepository`](employee::EmployeeRepository) - employees
//! - [`ProductRepository`](product::ProductRepository) - products
//! - [`InvoiceRepository`](invoice::InvoiceRepository) - invoices with their items
//! - [`InvoiceItemRepository`](invoice::InvoiceItemRepository) - invoice items

pub mod employee;
pub mod invoice;
pub mod product;

use uuid::Uuid;

/// Generates a new record id.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
