//! # Snapshot Codec
//!
//! Durable representation of Catalog + Cart used to survive restarts.
//!
//! ## Format
//! ```json
//! {
//!   "version": 1,
//!   "timestamp": "2026-10-16T09:30:00Z",
//!   "items": [{ "id": 0, "name": "Milk (1 Liter)", "price_cents": 8000,
//!               "icon": "🥛", "purchase_count": 4, "is_custom": false }],
//!   "cart":  [{ "name": "Bread", "price_cents": 6000, "quantity": 1,
//!               "product_id": 1 }]
//! }
//! ```
//!
//! `cart` is in head-to-tail order. Restoring replays the lines tail first
//! so that head insertion rebuilds exactly the saved order.
//!
//! This module only encodes and decodes. Reading and writing the file is
//! done by `grocer-store`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::types::{CartLine, Item};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Snapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub cart: Vec<CartLine>,
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

/// Counts reported after a restore.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RestoreSummary {
    pub items_restored: usize,
    pub items_skipped: usize,
    pub lines_restored: usize,
    pub lines_skipped: usize,
}

impl Snapshot {
    /// Captures the catalog and cart. Pure: neither is modified.
    pub fn capture(catalog: &Catalog, cart: &Cart, timestamp: DateTime<Utc>) -> Self {
        Snapshot {
            version: SNAPSHOT_VERSION,
            timestamp,
            items: catalog.items().into_iter().cloned().collect(),
            cart: cart.lines().cloned().collect(),
        }
    }

    /// Encodes as pretty-printed JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decodes JSON, rejecting versions newer than [`SNAPSHOT_VERSION`].
    pub fn from_json(text: &str) -> CoreResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(text)?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(CoreError::MalformedSnapshot(format!(
                "unsupported version {} (newest known is {})",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }
        Ok(snapshot)
    }

    /// Replays the snapshot into `catalog` and `cart`.
    ///
    /// Records that fail validation are logged and skipped; the rest are
    /// applied. The caller owns undo suppression: nothing here touches an
    /// undo stack.
    pub fn restore_into(&self, catalog: &mut Catalog, cart: &mut Cart) -> RestoreSummary {
        let mut summary = RestoreSummary::default();

        for item in &self.items {
            match catalog.restore_or_create(&item.name, item.price, item.purchase_count, item.id) {
                Ok(()) => summary.items_restored += 1,
                Err(err) => {
                    warn!(id = item.id, error = %err, "Skipping snapshot item");
                    summary.items_skipped += 1;
                }
            }
        }

        let keep_prices = catalog.variant().tracks_prices();
        for line in self.cart.iter().rev() {
            let price = line.price.filter(|_| keep_prices);
            match cart.add(&line.name, price, i64::from(line.quantity), line.product_id) {
                Ok(_) => summary.lines_restored += 1,
                Err(err) => {
                    warn!(name = %line.name, error = %err, "Skipping snapshot cart line");
                    summary.lines_skipped += 1;
                }
            }
        }

        debug!(?summary, "Snapshot restored");
        summary
    }
}
