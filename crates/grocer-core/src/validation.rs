//! # Validation Module
//!
//! Input checks run before any cart or catalog mutation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser / bridge                                             │
//! │  └── Type validation (deserialization)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Names: non-empty, bounded length                                  │
//! │  ├── Quantities: 1..=MAX_ITEM_QUANTITY (rejected, never clamped)       │
//! │  └── Prices: 0..=MAX_UNIT_PRICE_CENTS                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine mutation (only reached with valid input)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use grocer_core::validation::{validate_item_name, validate_quantity};
//!
//! assert!(validate_item_name("Milk (1 Liter)").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{ItemId, CUSTOM_ID_START, MAX_CUSTOM_ID};
use crate::{MAX_ITEM_QUANTITY, MAX_NAME_LENGTH, MAX_UNIT_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates an item or cart line name.
///
/// ## Rules
/// - Must not be empty or whitespace only
/// - At most `MAX_NAME_LENGTH` characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a cart line quantity.
///
/// Takes `i64` so negative input from the bridge is reported, not wrapped.
/// Returns the quantity narrowed to `u32`.
///
/// ```rust
/// use grocer_core::validation::validate_quantity;
///
/// assert_eq!(validate_quantity(3).unwrap(), 3);
/// assert!(validate_quantity(-2).is_err());
/// assert!(validate_quantity(1000).is_err());
/// ```
pub fn validate_quantity(quantity: i64) -> ValidationResult<u32> {
    if !(1..=i64::from(MAX_ITEM_QUANTITY)).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::from(MAX_ITEM_QUANTITY),
        });
    }

    Ok(quantity as u32)
}

/// Validates an optional unit price.
///
/// ```rust
/// use grocer_core::money::Money;
/// use grocer_core::validation::validate_price;
///
/// assert!(validate_price(Some(Money::from_major(80))).is_ok());
/// assert!(validate_price(Some(Money::from_cents(i64::MAX / 2))).is_err());
/// ```
pub fn validate_price(price: Option<Money>) -> ValidationResult<()> {
    match price {
        Some(p) if p.is_negative() => Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        }),
        Some(p) if p.cents() > MAX_UNIT_PRICE_CENTS => Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE_CENTS,
        }),
        _ => Ok(()),
    }
}

/// Validates an id supplied by a snapshot for `restore_or_create`.
///
/// Ids below `CUSTOM_ID_START` must name one of the seeded defaults.
/// Custom ids stop at `MAX_CUSTOM_ID`.
pub fn validate_restore_id(id: ItemId, default_count: usize) -> ValidationResult<()> {
    if id > MAX_CUSTOM_ID {
        return Err(ValidationError::OutOfRange {
            field: "id".to_string(),
            min: 0,
            max: i64::from(MAX_CUSTOM_ID),
        });
    }

    if id >= CUSTOM_ID_START || (id as usize) < default_count {
        return Ok(());
    }

    Err(ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: format!(
            "{} is in the reserved default range but is not a default item",
            id
        ),
    })
}

/// Validates the requested size of a frequency view.
pub fn validate_top_n(n: usize) -> ValidationResult<usize> {
    if n == 0 {
        return Err(ValidationError::OutOfRange {
            field: "n".to_string(),
            min: 1,
            max: i64::MAX,
        });
    }
    Ok(n)
}
