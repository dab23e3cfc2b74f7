//! # Catalog
//!
//! The master collection of purchasable items and their purchase counts.
//!
//! ## Storage
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Catalog                                        │
//! │                                                                         │
//! │  defaults: Vec<Item>           custom: HashMap<ItemId, Item>            │
//! │  ┌───┬───┬───┬─────┬───┐       ┌──────┬──────┬──────┐                   │
//! │  │ 0 │ 1 │ 2 │ ... │ 9 │       │ 1000 │ 1001 │ 1002 │ ...               │
//! │  └───┴───┴───┴─────┴───┘       └──────┴──────┴──────┘                   │
//! │   index == id, O(1)             O(1) amortized, next id monotonic       │
//! │                                                                         │
//! │  Items are never deleted one by one. factory_reset() reseeds the        │
//! │  defaults with zero counts and drops every custom item.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::ranking;
use crate::settings::CatalogVariant;
use crate::types::{Item, ItemId, CUSTOM_ID_START, MAX_CUSTOM_ID};
use crate::validation::{validate_item_name, validate_price, validate_restore_id};

/// The seeded default set: `(name, whole price, icon)`, id = position.
const DEFAULT_ITEMS: &[(&str, i64, &str)] = &[
    ("Milk (1 Liter)", 80, "🥛"),
    ("Bread (Whole Wheat)", 60, "🍞"),
    ("Eggs (Dozen)", 120, "🥚"),
    ("Butter", 150, "🧈"),
    ("Cheese (Cheddar)", 250, "🧀"),
    ("Chicken Breast", 350, "🍗"),
    ("Rice (5 kg bag)", 450, "🍚"),
    ("Pasta", 90, "🍝"),
    ("Tomato Sauce", 70, "🥫"),
    ("Orange Juice", 180, "🍊"),
];

/// Catalog of default and custom items.
#[derive(Debug, Clone)]
pub struct Catalog {
    defaults: Vec<Item>,
    custom: HashMap<ItemId, Item>,
    next_custom_id: ItemId,
    variant: CatalogVariant,
}

impl Catalog {
    /// Creates a catalog holding the default set with zero purchases.
    pub fn new(variant: CatalogVariant) -> Self {
        Catalog {
            defaults: Self::seed_defaults(variant),
            custom: HashMap::new(),
            next_custom_id: CUSTOM_ID_START,
            variant,
        }
    }

    fn seed_defaults(variant: CatalogVariant) -> Vec<Item> {
        DEFAULT_ITEMS
            .iter()
            .enumerate()
            .map(|(id, (name, price, icon))| {
                let price = variant.tracks_prices().then(|| Money::from_major(*price));
                Item::seeded(id as ItemId, name, price, icon)
            })
            .collect()
    }

    pub fn variant(&self) -> CatalogVariant {
        self.variant
    }

    /// Number of items, defaults and custom.
    pub fn len(&self) -> usize {
        self.defaults.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the seeded default set.
    pub fn default_count(&self) -> usize {
        self.defaults.len()
    }

    /// Id the next custom item will receive.
    pub fn next_custom_id(&self) -> ItemId {
        self.next_custom_id
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Looks an item up by id.
    ///
    /// Direct index for default ids, hash lookup for custom ids.
    pub fn get_item(&self, id: ItemId) -> CoreResult<&Item> {
        self.lookup(id).ok_or(CoreError::ItemNotFound(id))
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.lookup(id).is_some()
    }

    fn lookup(&self, id: ItemId) -> Option<&Item> {
        if id < CUSTOM_ID_START {
            self.defaults.get(id as usize)
        } else {
            self.custom.get(&id)
        }
    }

    fn lookup_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        if id < CUSTOM_ID_START {
            self.defaults.get_mut(id as usize)
        } else {
            self.custom.get_mut(&id)
        }
    }

    /// Finds an item by its exact (trimmed) name. O(n).
    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        let name = name.trim();
        self.defaults
            .iter()
            .chain(self.custom.values())
            .find(|item| item.name == name)
    }

    /// Every item: defaults in id order, then custom items in id order.
    pub fn items(&self) -> Vec<&Item> {
        let mut custom: Vec<&Item> = self.custom.values().collect();
        custom.sort_unstable_by_key(|item| item.id);
        self.defaults.iter().chain(custom).collect()
    }

    /// The `n` most purchased items. See [`ranking`].
    pub fn get_top_n(&self, n: usize) -> Vec<Item> {
        ranking::top_n(self.defaults.iter().chain(self.custom.values()), n)
    }

    // =========================================================================
    // Purchase Counting
    // =========================================================================

    /// Adds one purchase to an item.
    ///
    /// Unknown ids are logged and ignored; returns whether the count changed.
    pub fn increment_purchase_count(&mut self, id: ItemId) -> bool {
        self.record_purchase(id, 1)
    }

    /// Adds `quantity` purchases to an item. Unknown ids are logged and ignored.
    pub fn record_purchase(&mut self, id: ItemId, quantity: u32) -> bool {
        match self.lookup_mut(id) {
            Some(item) => {
                item.purchase_count = item.purchase_count.saturating_add(u64::from(quantity));
                debug!(id, quantity, count = item.purchase_count, "Purchase recorded");
                true
            }
            None => {
                warn!(id, "Ignoring purchase for unknown item");
                false
            }
        }
    }

    // =========================================================================
    // Custom Items
    // =========================================================================

    /// Creates a custom item with the next free id.
    ///
    /// Fails with `CatalogFull` once ids past `MAX_CUSTOM_ID` would be needed.
    pub fn create_custom(&mut self, name: &str, price: Option<Money>) -> CoreResult<ItemId> {
        validate_item_name(name)?;
        validate_price(price)?;

        let id = (self.next_custom_id..=MAX_CUSTOM_ID)
            .find(|id| !self.custom.contains_key(id))
            .ok_or(CoreError::CatalogFull { max: MAX_CUSTOM_ID })?;
        let price = price.filter(|_| self.variant.tracks_prices());
        self.custom.insert(id, Item::custom(id, name.trim(), price));
        self.next_custom_id = id + 1;

        debug!(id, name = name.trim(), "Custom item created");
        Ok(id)
    }

    /// Returns the id of the item named `name`, creating a custom item on
    /// first sight.
    pub fn resolve_or_create(&mut self, name: &str, price: Option<Money>) -> CoreResult<ItemId> {
        match self.find_by_name(name) {
            Some(item) => Ok(item.id),
            None => self.create_custom(name, price),
        }
    }

    /// Applies one catalog record from a snapshot.
    ///
    /// ## Behavior
    /// - Known id: `purchase_count` is overwritten, name and price are kept
    /// - Unknown custom id: a custom item is created with exactly that id
    /// - Unknown id below `CUSTOM_ID_START` or above `MAX_CUSTOM_ID`: rejected
    ///
    /// Ids are trusted, never reallocated; the custom id counter is moved
    /// past any restored id.
    pub fn restore_or_create(
        &mut self,
        name: &str,
        price: Option<Money>,
        purchase_count: u64,
        id: ItemId,
    ) -> CoreResult<()> {
        validate_restore_id(id, self.defaults.len())?;

        if let Some(item) = self.lookup_mut(id) {
            item.purchase_count = purchase_count;
            return Ok(());
        }

        validate_item_name(name)?;
        validate_price(price)?;

        let price = price.filter(|_| self.variant.tracks_prices());
        let mut item = Item::custom(id, name.trim(), price);
        item.purchase_count = purchase_count;
        self.custom.insert(id, item);
        self.next_custom_id = self.next_custom_id.max(id + 1);

        debug!(id, purchase_count, "Custom item restored");
        Ok(())
    }

    /// Reseeds the defaults with zero counts and discards all custom items.
    pub fn factory_reset(&mut self) {
        self.defaults = Self::seed_defaults(self.variant);
        self.custom.clear();
        self.next_custom_id = CUSTOM_ID_START;
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::new(CatalogVariant::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
