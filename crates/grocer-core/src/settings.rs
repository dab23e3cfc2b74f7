//! # Store Settings
//!
//! Behavioural knobs for the engine. Plain data: loading them from a file or
//! the environment is the job of `grocer-store`.
//!
//! ```toml
//! [store]
//! variant = "priced"          # priced | shopping_list
//! top_n = 10
//! track_custom_items = true
//!
//! [store.receipt]
//! tax_rate_bps = 800
//! discount_threshold_cents = 50000
//! discount_bps = 500
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::TaxRate;
use crate::DEFAULT_TOP_N;

// =============================================================================
// Catalog Variant
// =============================================================================

/// Which flavour of the app the engine serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogVariant {
    /// Grocery cart with unit prices and billed receipts.
    #[default]
    Priced,

    /// Shopping-list reminder: names and quantities only.
    ShoppingList,
}

impl CatalogVariant {
    pub fn tracks_prices(&self) -> bool {
        matches!(self, CatalogVariant::Priced)
    }
}

impl std::fmt::Display for CatalogVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogVariant::Priced => write!(f, "priced"),
            CatalogVariant::ShoppingList => write!(f, "shopping_list"),
        }
    }
}

impl std::str::FromStr for CatalogVariant {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "priced" | "cart" => Ok(CatalogVariant::Priced),
            "shopping_list" | "shopping-list" | "list" => Ok(CatalogVariant::ShoppingList),
            _ => Err(ValidationError::NotAllowed {
                field: "variant".to_string(),
                allowed: vec!["priced".to_string(), "shopping_list".to_string()],
            }),
        }
    }
}

// =============================================================================
// Receipt Policy
// =============================================================================

/// Tax and discount rules applied when a checkout is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptPolicy {
    /// Tax on the subtotal, in basis points.
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    /// Subtotals strictly above this earn the discount.
    #[serde(default = "default_discount_threshold")]
    pub discount_threshold_cents: i64,

    /// Discount on the subtotal, in basis points.
    #[serde(default = "default_discount_bps")]
    pub discount_bps: u32,
}

fn default_tax_rate_bps() -> u32 {
    800
}

fn default_discount_threshold() -> i64 {
    50_000
}

fn default_discount_bps() -> u32 {
    500
}

impl Default for ReceiptPolicy {
    fn default() -> Self {
        ReceiptPolicy {
            tax_rate_bps: default_tax_rate_bps(),
            discount_threshold_cents: default_discount_threshold(),
            discount_bps: default_discount_bps(),
        }
    }
}

impl ReceiptPolicy {
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    pub fn discount_threshold(&self) -> Money {
        Money::from_cents(self.discount_threshold_cents)
    }

    /// Discount earned by a subtotal.
    pub fn discount_for(&self, subtotal: Money) -> Money {
        if subtotal > self.discount_threshold() {
            subtotal.percentage(self.discount_bps)
        } else {
            Money::zero()
        }
    }
}

// =============================================================================
// Store Settings
// =============================================================================

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub variant: CatalogVariant,

    /// Default size of the frequency view.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Create catalog entries for unknown names at checkout.
    #[serde(default = "default_true")]
    pub track_custom_items: bool,

    #[serde(default)]
    pub receipt: ReceiptPolicy,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_true() -> bool {
    true
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            variant: CatalogVariant::default(),
            top_n: default_top_n(),
            track_custom_items: true,
            receipt: ReceiptPolicy::default(),
        }
    }
}

impl StoreSettings {
    /// Settings for the shopping-list flavour.
    pub fn shopping_list() -> Self {
        StoreSettings {
            variant: CatalogVariant::ShoppingList,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.top_n == 0 {
            return Err(ValidationError::OutOfRange {
                field: "top_n".to_string(),
                min: 1,
                max: i64::MAX,
            });
        }
        if self.receipt.discount_bps > 10_000 {
            return Err(ValidationError::OutOfRange {
                field: "discount_bps".to_string(),
                min: 0,
                max: 10_000,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_parsing() {
        assert_eq!("priced".parse::<CatalogVariant>().unwrap(), CatalogVariant::Priced);
        assert_eq!(
            "shopping-list".parse::<CatalogVariant>().unwrap(),
            CatalogVariant::ShoppingList
        );
        assert!("barter".parse::<CatalogVariant>().is_err());
    }

    #[test]
    fn test_discount_threshold_is_exclusive() {
        let policy = ReceiptPolicy::default();
        assert!(policy.discount_for(Money::from_major(500)).is_zero());
        assert_eq!(
            policy.discount_for(Money::from_major(600)),
            Money::from_major(30)
        );
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let settings: StoreSettings = serde_json::from_str(r#"{"top_n": 5}"#).unwrap();
        assert_eq!(settings.top_n, 5);
        assert!(settings.track_custom_items);
        assert_eq!(settings.receipt, ReceiptPolicy::default());
        assert!(settings.validate().is_ok());

        let zero = StoreSettings {
            top_n: 0,
            ..StoreSettings::default()
        };
        assert!(zero.validate().is_err());
    }
}
