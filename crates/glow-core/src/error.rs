//! # Error Types
//!
//! Domain-specific error types for glow-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  glow-core errors (this file)                                          │
//! │  ├── CoreError        - Load failures, rejected cart input             │
//! │  ├── ValidationError  - Form-level input failures                      │
//! │  └── PersistError     - A state record could not be written            │
//! │                                                                         │
//! │  glow-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Not-found mutations are NOT errors: they return `false`.              │
//! │  PersistError never reaches the UI: the container logs it and keeps    │
//! │  the in-memory change.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::persistence::RecordKey;

// =============================================================================
// Core Error
// =============================================================================

/// Core storefront errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A persisted record exists but cannot be decoded.
    ///
    /// ## When This Occurs
    /// - The stored JSON was written by an incompatible version
    /// - The record was edited by hand
    ///
    /// An absent record is never an error; it loads as an empty collection.
    #[error("Stored {key} record is corrupt: {source}")]
    CorruptRecord {
        key: RecordKey,
        #[source]
        source: serde_json::Error,
    },

    /// Persisting state failed.
    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the form helpers in [`crate::validation`] and by
/// [`crate::cart::Cart::add_item`] for a zero quantity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. a SKU with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A sale price was entered that does not undercut the regular price.
    #[error("Sale price {sale} must be lower than price {price}")]
    SalePriceNotBelowPrice { price: i64, sale: i64 },
}

// =============================================================================
// Persist Error
// =============================================================================

/// Failure to hand a state record to a [`crate::persistence::StateSink`].
#[derive(Debug, Error)]
pub enum PersistError {
    /// The collection could not be serialized.
    #[error("Failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    /// The sink refused or lost the write (quota, closed writer, ...).
    #[error("State sink rejected write: {0}")]
    Sink(String),

    /// An in-memory sink's lock was poisoned by a panicking writer.
    #[error("Lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "sku".to_string(),
        };
        assert_eq!(err.to_string(), "sku is required");

        let err = ValidationError::SalePriceNotBelowPrice {
            price: 95000,
            sale: 99000,
        };
        assert_eq!(
            err.to_string(),
            "Sale price 99000 must be lower than price 95000"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_corrupt_record_names_key() {
        let source = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let err = CoreError::CorruptRecord {
            key: RecordKey::Wishlist,
            source,
        };
        assert!(err.to_string().starts_with("Stored wishlist record is corrupt"));
    }
}
