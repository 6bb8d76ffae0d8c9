//! # nimbus-db: Database Layer for Nimbus ERP
//!
//! The storage collaborator: SQLite through sqlx, one repository per named
//! collection.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Nimbus ERP Data Flow                             │
//! │                                                                         │
//! │  CLI command (`nimbus invoices new ...`)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                     nimbus-db (THIS CRATE)                      │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐   │    │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │   │    │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │   │    │
//! │  │   │               │    │ EmployeeRepo   │    │ 001_initial  │   │    │
//! │  │   │ SqlitePool    │◄───│ ProductRepo    │    │  _schema.sql │   │    │
//! │  │   │               │    │ InvoiceRepo    │    │              │   │    │
//! │  │   │               │    │ InvoiceItemRepo│    │              │   │    │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘   │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (platform data dir, or --db / NIMBUS_DB_PATH)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nimbus_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("nimbus.db")).await?;
//! let products = db.products().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod collection;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use collection::Collection;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::employee::EmployeeRepository;
pub use repository::invoice::{InvoiceItemRepository, InvoiceRepository};
pub use repository::product::ProductRepository;
