//! # nimbus-core: Pure Business Logic for Nimbus ERP
//!
//! This crate holds the business rules of Nimbus ERP as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Nimbus ERP Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                    apps/cli (`nimbus`)                          │    │
//! │  │    dashboard ─ employees ─ products ─ invoices                  │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ nimbus-core (THIS CRATE) ★                      │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │    │
//! │  │   │   types   │  │   money   │  │  invoice  │  │ validation│    │    │
//! │  │   │ Employee  │  │   Money   │  │  Totals   │  │   rules   │    │    │
//! │  │   │ Product   │  │  TaxRate  │  │   Draft   │  │           │    │    │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘    │    │
//! │  │                        ┌───────────┐                            │    │
//! │  │                        │ dashboard │                            │    │
//! │  │                        └───────────┘                            │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                    nimbus-db (Storage Layer)                    │    │
//! │  │              SQLite queries, migrations, repositories           │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (Employee, Product, Invoice, InvoiceItem)
//! - [`money`] - Money type with integer arithmetic
//! - [`invoice`] - Invoice total calculator and draft
//! - [`dashboard`] - Dashboard statistics
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use nimbus_core::invoice::{calculate_totals, LineItem};
//! use nimbus_core::money::Money;
//!
//! let items = vec![LineItem {
//!     product_id: None,
//!     quantity: 2,
//!     unit_price: Money::from_cents(1000),
//!     tax: Money::from_cents(200),
//!     discount: Money::from_cents(100),
//! }];
//!
//! let totals = calculate_totals(&items);
//! assert_eq!(totals.total.to_string(), "$21.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dashboard;
pub mod error;
pub mod invoice;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use dashboard::{DashboardStats, SalesSummary};
pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::{calculate_totals, InvoiceDraft, InvoiceTotals, LineItem};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Rate used to pre-fill a line's tax when a product is selected (10 %).
pub const DEFAULT_TAX_RATE: TaxRate = TaxRate::from_bps(1000);

/// Maximum number of lines on one invoice.
pub const MAX_INVOICE_LINES: usize = 200;

/// Maximum quantity on a single invoice line.
pub const MAX_ITEM_QUANTITY: i64 = 99_999;

/// Largest accepted price, tax or discount ($10,000,000.00).
///
/// Together with [`MAX_ITEM_QUANTITY`] and [`MAX_INVOICE_LINES`] this keeps
/// every line and invoice total inside `i64` cents.
pub const MAX_AMOUNT: Money = Money::from_cents(1_000_000_000);

const _: () = assert!(
    (MAX_AMOUNT.cents() as i128) * (MAX_ITEM_QUANTITY as i128 + 2) * (MAX_INVOICE_LINES as i128)
        < i64::MAX as i128
);
