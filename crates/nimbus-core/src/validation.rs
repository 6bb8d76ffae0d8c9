//! # Validation Module
//!
//! Input validation utilities for Nimbus ERP.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI argument parsing (clap)                                   │
//! │  ├── Types: dates, integers                                             │
//! │  └── Money::from_str for amounts                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Domain (Rust)                                                 │
//! │  └── THIS MODULE: required fields, lengths, ranges                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  ├── NOT NULL / CHECK constraints                                       │
//! │  ├── UNIQUE (emp_id, invoice_number)                                    │
//! │  └── Foreign keys (invoice_items → invoices, products)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nimbus_core::validation::{validate_name, validate_quantity};
//!
//! validate_name("name", "Desk Lamp").unwrap();
//! validate_quantity(5).unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_AMOUNT, MAX_INVOICE_LINES, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_IDENTIFIER_LEN: usize = 50;
const MAX_QUERY_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

fn validate_required(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a display name (employee or product).
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    validate_required(field, name, MAX_NAME_LEN)
}

/// Validates a short identifier such as an employee number, a national id
/// or an invoice number.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 50 characters
///
/// ## Example
/// ```rust
/// use nimbus_core::validation::validate_identifier;
///
/// assert!(validate_identifier("emp_id", "E-001").is_ok());
/// assert!(validate_identifier("emp_id", "  ").is_err());
/// ```
pub fn validate_identifier(field: &str, value: &str) -> ValidationResult<()> {
    validate_required(field, value, MAX_IDENTIFIER_LEN)
}

/// Validates an optional free-text field.
///
/// Returns the trimmed value, or `None` when absent or blank.
pub fn validate_optional_text(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> ValidationResult<Option<String>> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(Some(value.to_string()))
}

/// Validates an employee photo URL.
pub fn validate_photo_url(url: &str) -> ValidationResult<()> {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat {
            field: "photo_url".to_string(),
            reason: "must start with http:// or https://".to_string(),
        })
    }
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (no filtering)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an invoice line quantity.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed MAX_ITEM_QUANTITY (99 999)
///
/// ## Example
/// ```rust
/// use nimbus_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(100_000).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a stock level. Zero is allowed (sold out).
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

/// Validates that an amount (price, tax, discount) is not negative and
/// does not exceed [`MAX_AMOUNT`].
///
/// ## Example
/// ```rust
/// use nimbus_core::money::Money;
/// use nimbus_core::validation::validate_non_negative;
///
/// assert!(validate_non_negative("price", Money::zero()).is_ok());
/// assert!(validate_non_negative("price", Money::from_cents(-1)).is_err());
/// assert!(validate_non_negative("price", Money::from_cents(1_000_000_001)).is_err());
/// ```
pub fn validate_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    if amount > MAX_AMOUNT {
        return Err(ValidationError::TooLarge {
            field: field.to_string(),
            max: MAX_AMOUNT,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more line fits on an invoice.
pub fn validate_line_count(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_INVOICE_LINES {
        return Err(ValidationError::OutOfRange {
            field: "invoice items".to_string(),
            min: 0,
            max: MAX_INVOICE_LINES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use nimbus_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::required("id"));
    }

    uuid::Uuid::parse_str(id.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Desk Lamp").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", &"A".repeat(201)).is_err());
        assert!(validate_name("name", &"é".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("invoice_number", "INV-2024-001").is_ok());
        assert_eq!(
            validate_identifier("invoice_number", " ").unwrap_err(),
            ValidationError::required("invoice_number")
        );
        assert!(validate_identifier("emp_id", &"9".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_optional_text() {
        assert_eq!(validate_optional_text("address", None, 10).unwrap(), None);
        assert_eq!(validate_optional_text("address", Some("  "), 10).unwrap(), None);
        assert_eq!(
            validate_optional_text("address", Some(" Main St "), 10).unwrap(),
            Some("Main St".to_string())
        );
        assert!(validate_optional_text("address", Some("a very long street"), 10).is_err());
    }

    #[test]
    fn test_validate_photo_url() {
        assert!(validate_photo_url("https://cdn.example.com/a.png").is_ok());
        assert!(validate_photo_url("http://example.com/a.png").is_ok());
        assert!(validate_photo_url("/tmp/a.png").is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  lamp ").unwrap(), "lamp");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_non_negative_upper_bound() {
        assert!(validate_non_negative("price", MAX_AMOUNT).is_ok());
        assert_eq!(
            validate_non_negative("price", MAX_AMOUNT + Money::from_cents(1)).unwrap_err(),
            ValidationError::TooLarge {
                field: "price".to_string(),
                max: MAX_AMOUNT,
            }
        );
        assert!(validate_non_negative("tax", Money::from_cents(i64::MAX)).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(-3).is_err());
    }

    #[test]
    fn test_validate_line_count() {
        assert!(validate_line_count(0).is_ok());
        assert!(validate_line_count(MAX_INVOICE_LINES).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("123").is_err());
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(1000).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
    }
}
