//! # CLI Error Type
//!
//! The one error type every command returns.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Nimbus ERP                             │
//! │                                                                         │
//! │  Command function  ── Result<T, AppError>                               │
//! │         │                                                               │
//! │         ├── ValidationError ──────────────┐                             │
//! │         ├── CoreError (draft) ────────────┤                             │
//! │         └── DbError (storage) ────────────┴──► AppError { code, msg }   │
//! │                                                       │                 │
//! │  Internal details are logged with tracing::error!     │                 │
//! │  and replaced by a short message.                     ▼                 │
//! │                                          stderr: "error: <message>"     │
//! │                                          exit status 1                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use nimbus_core::{CoreError, ValidationError};
use nimbus_db::DbError;

/// Error returned by every command.
#[derive(Debug, Clone, Error, Serialize)]
#[error("{message}")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Record not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// A unique or foreign key rule refused the write
    Conflict,

    /// Database operation failed
    DatabaseError,

    /// Invoice draft could not be built
    BusinessLogic,

    Internal,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Turns `"employees.emp_id"` into `"Employee number"` for messages.
fn describe_unique_field(field: &str) -> &str {
    match field {
        "employees.emp_id" => "Employee number",
        "invoices.invoice_number" => "Invoice number",
        other => other,
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => AppError::not_found(&entity, &id),
            DbError::UniqueViolation { field } => AppError::new(
                ErrorCode::Conflict,
                format!("{} already exists", describe_unique_field(&field)),
            ),
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                AppError::new(ErrorCode::Conflict, "Operation refused: invalid record reference")
            }
            DbError::ConstraintViolation(e) => {
                tracing::error!("Constraint violation: {}", e);
                AppError::validation("Value rejected by the database")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Migration failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => AppError::from(e),
            CoreError::LineNotFound { .. }
            | CoreError::LineWithoutProduct { .. }
            | CoreError::EmptyInvoice
            | CoreError::TooManyLines { .. } => {
                AppError::new(ErrorCode::BusinessLogic, err.to_string())
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_db::Collection;

    #[test]
    fn test_db_not_found() {
        let err: AppError = DbError::not_found(Collection::Products, "abc").into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.to_string(), "Product not found: abc");
    }

    #[test]
    fn test_unique_violation_is_conflict() {
        let err: AppError = DbError::UniqueViolation {
            field: "invoices.invoice_number".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "Invoice number already exists");
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err: AppError = DbError::QueryFailed("no such column: secret".to_string()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("secret"));
    }

    #[test]
    fn test_core_errors() {
        let err: AppError = CoreError::EmptyInvoice.into();
        assert_eq!(err.code, ErrorCode::BusinessLogic);

        let err: AppError = CoreError::Validation(ValidationError::required("name")).into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "name is required");
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(AppError::validation("bad")).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "bad");
    }
}
