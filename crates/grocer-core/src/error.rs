//! # Error Types
//!
//! Domain-specific error types for grocer-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  grocer-core errors (this file)                                        │
//! │  ├── CoreError        - NotFound, checkout preconditions, codec        │
//! │  └── ValidationError  - Input rejected before any mutation             │
//! │                                                                         │
//! │  grocer-store errors (separate crate)                                  │
//! │  └── StoreError       - Snapshot file and config failures              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → bridge → browser     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Empty Results Are Not Errors
//! Undo on an empty stack and processing an empty checkout queue are valid
//! no-ops. They are reported through `Option<Reversal>` and an empty
//! [`Receipt`](crate::checkout::Receipt), never through this module.

use thiserror::Error;

use crate::types::ItemId;

// =============================================================================
// Core Error
// =============================================================================

/// Engine errors.
///
/// Every variant is recoverable: when one is returned, no state was changed.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No catalog item has this id.
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// Cart position is past the end of the cart.
    ///
    /// ## When This Occurs
    /// - `cart_remove(5)` on a 2-line cart
    /// - Any removal on an empty cart
    #[error("Cart position {position} out of range (cart has {len} lines)")]
    PositionOutOfRange { position: usize, len: usize },

    /// Checkout was started with nothing in the cart.
    #[error("No items to checkout")]
    EmptyCart,

    /// A checkout is already staged and has not been processed yet.
    #[error("Checkout already in progress ({staged} lines staged)")]
    CheckoutInProgress { staged: usize },

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Every custom id up to the ceiling is taken.
    #[error("No free custom item id (ids end at {max})")]
    CatalogFull { max: ItemId },

    /// Snapshot text could not be decoded.
    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// True for the NotFound family (unknown id or position).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::ItemNotFound(_) | CoreError::PositionOutOfRange { .. }
        )
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::MalformedSnapshot(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any mutation happens.
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

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::PositionOutOfRange {
            position: 5,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "Cart position 5 out of range (cart has 2 lines)"
        );
        assert!(err.is_not_found());
        assert!(!CoreError::EmptyCart.is_not_found());
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(validation_err.to_string(), "name is required");

        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_json_error_becomes_malformed_snapshot() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let core_err: CoreError = json_err.into();
        assert!(matches!(core_err, CoreError::MalformedSnapshot(_)));
    }
}
