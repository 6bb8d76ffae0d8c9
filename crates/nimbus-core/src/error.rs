//! # Error Types
//!
//! Domain-specific error types for nimbus-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  nimbus-core errors (this file)                                         │
//! │  ├── CoreError        - Invoice draft / domain failures                 │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  nimbus-db errors (separate crate)                                      │
//! │  └── DbError          - Storage operation failures                      │
//! │                                                                         │
//! │  CLI errors (in app)                                                    │
//! │  └── AppError         - What the user sees                              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → stderr                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors raised while building or checking an invoice.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A draft line index that does not exist.
    #[error("Invoice line {index} does not exist (draft has {len} lines)")]
    LineNotFound { index: usize, len: usize },

    /// A draft line has no product selected yet.
    #[error("Invoice line {index} has no product selected")]
    LineWithoutProduct { index: usize },

    /// Submitting a draft without any line.
    #[error("Invoice must contain at least one item")]
    EmptyInvoice,

    /// Draft has grown past the line limit.
    #[error("Invoice cannot have more than {max} items")]
    TooManyLines { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before anything reaches storage, so the message can name the
/// offending form field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must not be negative")]
    Negative { field: String },

    #[error("{field} must not exceed {max}")]
    TooLarge { field: String, max: Money },

    /// Invalid format (e.g., malformed amount, invalid UUID, bad URL).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Rebinds the error to a more specific field name.
    ///
    /// Money parsing does not know which form field it is parsing; callers
    /// use this to turn "amount" into "price" or "discount".
    pub fn for_field(self, name: &str) -> Self {
        let field = name.to_string();
        match self {
            ValidationError::Required { .. } => ValidationError::Required { field },
            ValidationError::TooLong { max, .. } => ValidationError::TooLong { field, max },
            ValidationError::OutOfRange { min, max, .. } => {
                ValidationError::OutOfRange { field, min, max }
            }
            ValidationError::Negative { .. } => ValidationError::Negative { field },
            ValidationError::TooLarge { max, .. } => ValidationError::TooLarge { field, max },
            ValidationError::InvalidFormat { reason, .. } => {
                ValidationError::InvalidFormat { field, reason }
            }
        }
    }
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
