//! Storage errors.
//!
//! Constraint failures reported by SQLite are classified so that callers can
//! tell a duplicate employee or invoice number, and a product still used on
//! an invoice, apart from genuine I/O failures. The CLI turns these into
//! short user-facing messages.

use sqlx::error::ErrorKind;
use thiserror::Error;

use crate::collection::Collection;

/// Errors returned by [`Database`](crate::Database) and the repositories.
#[derive(Debug, Error)]
pub enum DbError {
    /// No row with this id in the collection.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Duplicate employee number (`employees.emp_id`)
    /// - Duplicate invoice number (`invoices.invoice_number`)
    #[error("Duplicate {field}: value already exists")]
    UniqueViolation { field: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Invoice item referencing a product that does not exist
    /// - Deleting a product that invoice items still reference
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// CHECK or NOT NULL constraint violation.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Any other failed statement.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction could not be started or committed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Timed out waiting for a pooled connection.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a record of `collection`.
    pub fn not_found(collection: Collection, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: collection.entity_name().to_string(),
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }

    pub(crate) fn transaction(err: sqlx::Error) -> Self {
        DbError::TransactionFailed(err.to_string())
    }
}

/// Database errors are classified by constraint kind, falling back to
/// SQLite's message text when the driver reports no kind.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();
                let kind = db_err.kind();

                // SQLite: "UNIQUE constraint failed: <table>.<column>"
                if matches!(kind, ErrorKind::UniqueViolation)
                    || msg.contains("UNIQUE constraint failed")
                {
                    DbError::UniqueViolation {
                        field: msg
                            .split("UNIQUE constraint failed: ")
                            .nth(1)
                            .unwrap_or("unknown")
                            .to_string(),
                    }
                } else if matches!(kind, ErrorKind::ForeignKeyViolation)
                    || msg.contains("FOREIGN KEY constraint failed")
                {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else if matches!(kind, ErrorKind::CheckViolation | ErrorKind::NotNullViolation)
                    || msg.contains("CHECK constraint failed")
                {
                    DbError::ConstraintViolation(msg.to_string())
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
