//! Named collections of the storage collaborator.

use std::fmt;

/// A table the application reads from or writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Employees,
    Products,
    Invoices,
    InvoiceItems,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Employees,
        Collection::Products,
        Collection::Invoices,
        Collection::InvoiceItems,
    ];

    /// SQL table name. Only ever one of these fixed literals, so it is safe
    /// to splice into a statement.
    pub const fn table_name(&self) -> &'static str {
        match self {
            Collection::Employees => "employees",
            Collection::Products => "products",
            Collection::Invoices => "invoices",
            Collection::InvoiceItems => "invoice_items",
        }
    }

    /// Singular name used in error messages.
    pub const fn entity_name(&self) -> &'static str {
        match self {
            Collection::Employees => "Employee",
            Collection::Products => "Product",
            Collection::Invoices => "Invoice",
            Collection::InvoiceItems => "Invoice item",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}
