//! # Grocery Store
//!
//! One long-lived object owning the four interlocking structures. Every
//! bridge entry point maps to one method here, and each method is a single
//! transaction: a cart mutation and its undo record are applied together or
//! not at all.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         GroceryStore                                    │
//! │                                                                         │
//! │   ┌───────────┐    ┌───────────┐    ┌───────────┐    ┌─────────────┐   │
//! │   │  Catalog  │◄───│   Cart    │───►│ UndoStack │    │CheckoutQueue│   │
//! │   │  + ranker │    │  (deque)  │    │   (LIFO)  │    │   (FIFO)    │   │
//! │   └─────▲─────┘    └─────┬─────┘    └───────────┘    └──────┬──────┘   │
//! │         │                └───── checkout_start() ──────────►│          │
//! │         └────────────────────── checkout_process() ─────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is constructed explicitly and passed around; there is no
//! process-wide instance.

use chrono::Utc;
use tracing::{debug, info};

use crate::cart::{Cart, CartView};
use crate::catalog::Catalog;
use crate::checkout::{CheckoutQueue, CheckoutState, Receipt};
use crate::error::CoreResult;
use crate::money::Money;
use crate::settings::StoreSettings;
use crate::snapshot::{RestoreSummary, Snapshot};
use crate::types::{CartLine, Item, ItemId};
use crate::undo::{Reversal, UndoRecord, UndoStack};
use crate::validation::validate_top_n;

/// The in-process grocery engine.
#[derive(Debug, Clone)]
pub struct GroceryStore {
    settings: StoreSettings,
    catalog: Catalog,
    cart: Cart,
    undo: UndoStack,
    queue: CheckoutQueue,
}

impl GroceryStore {
    /// Creates a store with the default catalog and empty session state.
    pub fn new(settings: StoreSettings) -> Self {
        GroceryStore {
            catalog: Catalog::new(settings.variant),
            cart: Cart::new(),
            undo: UndoStack::new(),
            queue: CheckoutQueue::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// The `n` most purchased items, ties broken by ascending id.
    pub fn list_top_items(&self, n: usize) -> CoreResult<Vec<Item>> {
        let n = validate_top_n(n)?;
        Ok(self.catalog.get_top_n(n))
    }

    /// The frequency view at the configured default size.
    pub fn list_frequent_items(&self) -> Vec<Item> {
        self.catalog.get_top_n(self.settings.top_n)
    }

    pub fn get_item(&self, id: ItemId) -> CoreResult<Item> {
        self.catalog.get_item(id).cloned()
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Adds a line at the head of the cart and records it for undo.
    ///
    /// When `price` is omitted and `product_id` names a catalog item, the
    /// catalog price is used. In the shopping-list variant prices are dropped.
    pub fn cart_add(
        &mut self,
        name: &str,
        price: Option<Money>,
        quantity: i64,
        product_id: Option<ItemId>,
    ) -> CoreResult<()> {
        let price = if self.settings.variant.tracks_prices() {
            price.or_else(|| {
                product_id
                    .and_then(|id| self.catalog.get_item(id).ok())
                    .and_then(|item| item.price)
            })
        } else {
            None
        };

        let line = self.cart.add(name, price, quantity, product_id)?;
        debug!(name = %line.name, quantity = line.quantity, "Cart line added");
        self.undo.push(UndoRecord::Added { line });
        Ok(())
    }

    /// Removes the line at `position` (0 = most recent) and records it.
    pub fn cart_remove(&mut self, position: usize) -> CoreResult<CartLine> {
        let line = self.cart.remove_at(position)?;
        debug!(position, name = %line.name, "Cart line removed");
        self.undo.push(UndoRecord::Removed {
            position,
            line: line.clone(),
        });
        Ok(line)
    }

    pub fn cart_list(&self) -> CartView {
        CartView::from(&self.cart)
    }

    /// Empties the cart as one undoable step.
    ///
    /// An already-empty cart is left alone and records nothing.
    /// Returns the number of lines removed.
    pub fn cart_clear(&mut self) -> usize {
        if self.cart.is_empty() {
            return 0;
        }
        let lines = self.cart.take_all();
        let cleared = lines.len();
        self.undo.push(UndoRecord::Cleared { lines });
        debug!(cleared, "Cart cleared");
        cleared
    }

    // =========================================================================
    // Undo
    // =========================================================================

    /// Reverses the most recent cart mutation.
    ///
    /// `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<Reversal> {
        let reversal = self.undo.undo(&mut self.cart);
        debug!(?reversal, "Undo");
        reversal
    }

    pub fn undo_size(&self) -> usize {
        self.undo.size()
    }

    /// Pending undo records, most recent first.
    pub fn undo_history(&self) -> Vec<UndoRecord> {
        self.undo.peek_all()
    }

    pub fn undo_clear(&mut self) {
        self.undo.clear();
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Moves the whole cart into the checkout queue.
    ///
    /// The undo history is discarded: the staged lines are no longer in the
    /// cart. Returns the number of staged lines.
    pub fn checkout_start(&mut self) -> CoreResult<usize> {
        let staged = self.queue.start(&mut self.cart)?;
        self.undo.clear();
        info!(staged, "Checkout started");
        Ok(staged)
    }

    /// Bills the staged lines and credits purchases to the catalog.
    ///
    /// With nothing staged this returns an empty receipt and changes nothing.
    pub fn checkout_process(&mut self) -> Receipt {
        let receipt = self
            .queue
            .process(&mut self.catalog, &self.settings, Utc::now());
        if receipt.is_empty() {
            debug!("Checkout processed with empty queue");
        } else {
            info!(
                lines = receipt.lines.len(),
                grand_total = %receipt.grand_total,
                "Checkout processed"
            );
        }
        receipt
    }

    pub fn checkout_state(&self) -> CheckoutState {
        self.queue.state()
    }

    /// Staged lines, front first.
    pub fn queue_items(&self) -> Vec<CartLine> {
        self.queue.items()
    }

    pub fn queue_size(&self) -> usize {
        self.queue.size()
    }

    // =========================================================================
    // Reset
    // =========================================================================

    /// Clears cart, undo stack and queue. Purchase counts are kept.
    pub fn reset_session(&mut self) {
        self.cart.take_all();
        self.undo.clear();
        self.queue.clear();
        info!("Session reset");
    }

    /// Back to first-run state: session cleared, catalog reseeded.
    pub fn factory_reset(&mut self) {
        self.reset_session();
        self.catalog.factory_reset();
        info!("Factory reset");
    }

    // =========================================================================
    // Snapshot
    // =========================================================================

    /// Captures catalog and cart. Does not mutate.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.catalog, &self.cart, Utc::now())
    }

    /// Replaces the session and catalog with the snapshot's.
    ///
    /// The catalog is reseeded first, so counts and custom items gained since
    /// the save are dropped. Restored lines do not produce undo records; the
    /// undo stack is empty afterwards.
    pub fn restore(&mut self, snapshot: &Snapshot) -> RestoreSummary {
        self.reset_session();
        self.catalog.factory_reset();
        let summary = snapshot.restore_into(&mut self.catalog, &mut self.cart);
        info!(
            items = summary.items_restored,
            lines = summary.lines_restored,
            "State restored from snapshot"
        );
        summary
    }
}

impl Default for GroceryStore {
    fn default() -> Self {
        GroceryStore::new(StoreSettings::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
