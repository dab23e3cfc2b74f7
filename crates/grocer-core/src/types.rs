//! # Domain Types
//!
//! Entities shared by every component of the engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │    CartLine     │   │    TaxRate      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u32)       │   │  name           │   │  bps (u32)      │       │
//! │  │  name           │   │  price_cents?   │   │  800 = 8%       │       │
//! │  │  price_cents?   │   │  quantity       │   └─────────────────┘       │
//! │  │  icon           │   │  product_id     │                              │
//! │  │  purchase_count │   │  (-1 = none)    │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Id Ranges
//! - `0..1000`: reserved for the default catalog seeded at first run
//! - `1000..`: custom items, allocated in increasing order on first purchase

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Catalog item identifier.
pub type ItemId = u32;

/// First id handed out to a custom item.
pub const CUSTOM_ID_START: ItemId = 1000;

/// Last id a custom item may hold.
pub const MAX_CUSTOM_ID: ItemId = 9_999_999;

/// Wire value meaning "no catalog reference".
pub const UNRESOLVED_PRODUCT_ID: i64 = -1;

/// Interprets a raw bridge product id, where any negative value means
/// "unresolved".
///
/// ```rust
/// use grocer_core::types::product_ref;
///
/// assert_eq!(product_ref(3), Some(3));
/// assert_eq!(product_ref(-1), None);
/// ```
pub fn product_ref(raw: i64) -> Option<ItemId> {
    if raw < 0 {
        None
    } else {
        ItemId::try_from(raw).ok()
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 800 bps = 8%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Item
// =============================================================================

/// A purchasable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Stable identifier, unique for the lifetime of the process.
    pub id: ItemId,

    /// Display name, never empty.
    pub name: String,

    /// Unit price. Absent in the shopping-list variant.
    #[serde(rename = "price_cents")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(rename = "price_cents", optional)]
    pub price: Option<Money>,

    /// Emoji shown next to the name.
    #[serde(default)]
    pub icon: String,

    /// Cumulative units purchased.
    #[serde(default)]
    #[ts(type = "number")]
    pub purchase_count: u64,

    /// True when the item was created from a purchase rather than seeded.
    #[serde(default)]
    pub is_custom: bool,
}

impl Item {
    /// Icon given to items created from purchases.
    pub const CUSTOM_ICON: &'static str = "🆕";

    /// Creates a seeded item with zero purchases.
    pub fn seeded(id: ItemId, name: &str, price: Option<Money>, icon: &str) -> Self {
        Item {
            id,
            name: name.to_string(),
            price,
            icon: icon.to_string(),
            purchase_count: 0,
            is_custom: false,
        }
    }

    /// Creates a custom item.
    pub fn custom(id: ItemId, name: impl Into<String>, price: Option<Money>) -> Self {
        Item {
            id,
            name: name.into(),
            price,
            icon: Self::CUSTOM_ICON.to_string(),
            purchase_count: 0,
            is_custom: true,
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One line of the cart, the checkout queue, or an undo record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub name: String,

    /// Unit price frozen at the time the line was added.
    #[serde(rename = "price_cents")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(rename = "price_cents", optional)]
    pub price: Option<Money>,

    /// Always at least 1.
    pub quantity: u32,

    /// Catalog reference; serialized as `-1` when unresolved.
    #[serde(with = "product_id_wire", default)]
    #[ts(type = "number")]
    pub product_id: Option<ItemId>,
}

impl CartLine {
    pub fn new(
        name: impl Into<String>,
        price: Option<Money>,
        quantity: u32,
        product_id: Option<ItemId>,
    ) -> Self {
        CartLine {
            name: name.into(),
            price,
            quantity,
            product_id,
        }
    }

    /// `price × quantity`, zero when the line carries no price.
    pub fn line_total(&self) -> Money {
        self.price
            .map(|p| p.multiply_quantity(self.quantity))
            .unwrap_or_default()
    }
}

/// `Option<ItemId>` ⇄ integer with `-1` for `None`. Also accepts `null`.
mod product_id_wire {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{ItemId, UNRESOLVED_PRODUCT_ID};

    pub fn serialize<S: Serializer>(id: &Option<ItemId>, s: S) -> Result<S::Ok, S::Error> {
        match id {
            Some(id) => s.serialize_i64(i64::from(*id)),
            None => s.serialize_i64(UNRESOLVED_PRODUCT_ID),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<ItemId>, D::Error> {
        match Option::<i64>::deserialize(d)? {
            Some(raw) if raw >= 0 => ItemId::try_from(raw).map(Some).map_err(D::Error::custom),
            _ => Ok(None),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(800);
        assert_eq!(rate.bps(), 800);
        assert_eq!(TaxRate::default(), TaxRate::zero());
    }

    #[test]
    fn test_line_total() {
        let line = CartLine::new("Milk", Some(Money::from_major(80)), 2, Some(0));
        assert_eq!(line.line_total(), Money::from_major(160));

        let unpriced = CartLine::new("Milk", None, 2, Some(0));
        assert!(unpriced.line_total().is_zero());
    }

    #[test]
    fn test_product_id_wire_format() {
        let line = CartLine::new("Jam", Some(Money::from_major(99)), 1, None);
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["product_id"], -1);
        assert_eq!(json["price_cents"], 9900);

        let back: CartLine = serde_json::from_value(json).unwrap();
        assert_eq!(back, line);

        let from_null: CartLine =
            serde_json::from_str(r#"{"name":"Jam","quantity":1,"product_id":null}"#).unwrap();
        assert_eq!(from_null.product_id, None);
        assert_eq!(from_null.price, None);

        let tracked: CartLine =
            serde_json::from_str(r#"{"name":"Milk","quantity":1,"product_id":0}"#).unwrap();
        assert_eq!(tracked.product_id, Some(0));
    }

    #[test]
    fn test_typescript_bindings_match_wire_names() {
        use crate::cart::CartView;
        use crate::checkout::{Receipt, ReceiptLine};

        assert_eq!(Money::inline(), "number");

        let item = Item::decl();
        assert!(item.contains("price_cents?:"), "{item}");
        assert!(item.contains("purchase_count: number"), "{item}");

        let line = CartLine::decl();
        assert!(line.contains("price_cents?:"), "{line}");
        assert!(!line.contains("price?:"), "{line}");

        let receipt_line = ReceiptLine::decl();
        assert!(receipt_line.contains("price_cents?:"), "{receipt_line}");
        assert!(receipt_line.contains("total_cents:"), "{receipt_line}");

        for decl in [item, line, receipt_line, CartView::decl(), Receipt::decl()] {
            assert!(!decl.contains("bigint"), "{decl}");
        }
    }

    #[test]
    fn test_custom_item_icon() {
        let item = Item::custom(1000, "Jam", None);
        assert!(item.is_custom);
        assert_eq!(item.icon, Item::CUSTOM_ICON);
    }
}
