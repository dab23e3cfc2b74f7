//! # Checkout Queue
//!
//! FIFO staging area that turns a cart into a billed receipt.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────┐  start(cart)   ┌────────┐  process()   ┌─────────┐          │
//! │   │ Idle │ ─────────────► │ Staged │ ───────────► │ Drained │ ──┐      │
//! │   └──────┘                └────────┘              └─────────┘   │      │
//! │      ▲  │ empty cart:                                           │      │
//! │      │  └─ EmptyCart, stays Idle                                │      │
//! │      └──────────────────────────────────────────────────────────┘      │
//! │                                                                         │
//! │  Cart head-to-tail order == queue front-to-back order == receipt order │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::settings::StoreSettings;
use crate::types::{CartLine, ItemId};

// =============================================================================
// Checkout State
// =============================================================================

/// Where the queue is in its cycle. `Drained` is transient: processing ends
/// back in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutState {
    #[default]
    Idle,
    Staged,
}

// =============================================================================
// Receipt
// =============================================================================

/// One billed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptLine {
    pub name: String,
    #[serde(rename = "price_cents")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(rename = "price_cents", optional)]
    pub unit_price: Option<Money>,
    pub quantity: u32,
    #[serde(rename = "total_cents")]
    pub line_total: Money,
    /// Catalog item credited with the purchase, if any.
    pub counted_as: Option<ItemId>,
}

/// Result of processing the checkout queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Receipt {
    /// In dequeue (cart) order.
    pub lines: Vec<ReceiptLine>,
    #[serde(rename = "subtotal_cents")]
    pub subtotal: Money,
    #[serde(rename = "tax_cents")]
    pub tax: Money,
    #[serde(rename = "discount_cents")]
    pub discount: Money,
    #[serde(rename = "grand_total_cents")]
    pub grand_total: Money,
    #[ts(type = "number")]
    pub total_quantity: u64,
    #[ts(as = "String")]
    pub processed_at: DateTime<Utc>,
}

impl Receipt {
    /// The receipt for an empty queue.
    pub fn empty(processed_at: DateTime<Utc>) -> Self {
        Receipt {
            lines: Vec::new(),
            subtotal: Money::zero(),
            tax: Money::zero(),
            discount: Money::zero(),
            grand_total: Money::zero(),
            total_quantity: 0,
            processed_at,
        }
    }

    /// True when nothing was staged.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Checkout Queue
// =============================================================================

/// FIFO of lines drained from the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutQueue {
    entries: VecDeque<CartLine>,
}

impl CheckoutQueue {
    pub fn new() -> Self {
        CheckoutQueue::default()
    }

    pub fn state(&self) -> CheckoutState {
        if self.entries.is_empty() {
            CheckoutState::Idle
        } else {
            CheckoutState::Staged
        }
    }

    /// Moves every cart line into the queue and empties the cart.
    ///
    /// ## Returns
    /// Number of staged lines.
    ///
    /// ## Errors
    /// - `CheckoutInProgress` if lines are still staged
    /// - `EmptyCart` if there is nothing to stage
    pub fn start(&mut self, cart: &mut Cart) -> CoreResult<usize> {
        if !self.entries.is_empty() {
            return Err(CoreError::CheckoutInProgress {
                staged: self.entries.len(),
            });
        }
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        self.entries.extend(cart.take_all());
        debug!(staged = self.entries.len(), "Checkout staged");
        Ok(self.entries.len())
    }

    /// Drains the queue front to back, crediting purchases to the catalog.
    ///
    /// ## Per Entry
    /// 1. Resolve the catalog item (reference, then name, then new custom
    ///    item when `track_custom_items` is on)
    /// 2. Add the line quantity to its `purchase_count`
    /// 3. Append the line to the receipt
    ///
    /// An empty queue yields [`Receipt::empty`].
    pub fn process(
        &mut self,
        catalog: &mut Catalog,
        settings: &StoreSettings,
        processed_at: DateTime<Utc>,
    ) -> Receipt {
        let mut receipt = Receipt::empty(processed_at);

        while let Some(line) = self.entries.pop_front() {
            let counted_as = resolve_item(catalog, settings, &line);
            if let Some(id) = counted_as {
                catalog.record_purchase(id, line.quantity);
            }

            receipt.subtotal += line.line_total();
            receipt.total_quantity += u64::from(line.quantity);
            receipt.lines.push(ReceiptLine {
                line_total: line.line_total(),
                name: line.name,
                unit_price: line.price,
                quantity: line.quantity,
                counted_as,
            });
        }

        if settings.variant.tracks_prices() {
            receipt.tax = receipt.subtotal.calculate_tax(settings.receipt.tax_rate());
            receipt.discount = settings.receipt.discount_for(receipt.subtotal);
        }
        receipt.grand_total = receipt.subtotal + receipt.tax - receipt.discount;

        receipt
    }

    /// Staged lines, front first.
    pub fn items(&self) -> Vec<CartLine> {
        self.entries.iter().cloned().collect()
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops staged lines without billing them.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn resolve_item(catalog: &mut Catalog, settings: &StoreSettings, line: &CartLine) -> Option<ItemId> {
    if let Some(id) = line.product_id.filter(|id| catalog.contains(*id)) {
        return Some(id);
    }
    if !settings.track_custom_items {
        debug!(name = %line.name, "Untracked line skipped for counting");
        return None;
    }
    match catalog.resolve_or_create(&line.name, line.price) {
        Ok(id) => Some(id),
        Err(err) => {
            warn!(name = %line.name, error = %err, "Could not resolve line for counting");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_start_on_empty_cart_stays_idle() {
        let mut queue = CheckoutQueue::new();
        let mut cart = Cart::new();

        assert!(matches!(queue.start(&mut cart), Err(CoreError::EmptyCart)));
        assert_eq!(queue.state(), CheckoutState::Idle);
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut queue = CheckoutQueue::new();
        let mut cart = Cart::new();
        cart.add("Milk", None, 1, Some(0)).unwrap();
        queue.start(&mut cart).unwrap();

        cart.add("Bread", None, 1, Some(1)).unwrap();
        assert!(matches!(
            queue.start(&mut cart),
            Err(CoreError::CheckoutInProgress { staged: 1 })
        ));
        assert_eq!(cart.size(), 1);
    }

    #[test]
    fn test_process_empty_queue() {
        let mut queue = CheckoutQueue::new();
        let mut catalog = Catalog::default();

        let receipt = queue.process(&mut catalog, &StoreSettings::default(), now());
        assert!(receipt.is_empty());
        assert!(receipt.grand_total.is_zero());
    }

    #[test]
    fn test_receipt_tax_and_discount() {
        let mut queue = CheckoutQueue::new();
        let mut cart = Cart::new();
        let mut catalog = Catalog::default();
        cart.add("Rice (5 kg bag)", Some(Money::from_major(450)), 2, Some(6))
            .unwrap();
        queue.start(&mut cart).unwrap();

        let receipt = queue.process(&mut catalog, &StoreSettings::default(), now());

        assert_eq!(receipt.subtotal, Money::from_major(900));
        assert_eq!(receipt.tax, Money::from_major(72));
        assert_eq!(receipt.discount, Money::from_major(45));
        assert_eq!(receipt.grand_total, Money::from_major(927));
        assert_eq!(catalog.get_item(6).unwrap().purchase_count, 2);
        assert_eq!(queue.state(), CheckoutState::Idle);
    }

    #[test]
    fn test_untracked_lines_when_tracking_disabled() {
        let settings = StoreSettings {
            track_custom_items: false,
            ..StoreSettings::default()
        };
        let mut queue = CheckoutQueue::new();
        let mut cart = Cart::new();
        let mut catalog = Catalog::default();
        cart.add("Jam", Some(Money::from_major(99)), 1, None).unwrap();
        queue.start(&mut cart).unwrap();

        let receipt = queue.process(&mut catalog, &settings, now());

        assert_eq!(receipt.lines.len(), 1);
        assert_eq!(receipt.lines[0].counted_as, None);
        assert_eq!(catalog.len(), 10);
    }

    #[test]
    fn test_custom_item_created_on_first_purchase() {
        let mut queue = CheckoutQueue::new();
        let mut cart = Cart::new();
        let mut catalog = Catalog::default();
        cart.add("Jam", Some(Money::from_major(99)), 3, None).unwrap();
        queue.start(&mut cart).unwrap();

        let receipt = queue.process(&mut catalog, &StoreSettings::default(), now());

        assert_eq!(receipt.lines[0].counted_as, Some(1000));
        let jam = catalog.get_item(1000).unwrap();
        assert_eq!(jam.purchase_count, 3);
        assert!(jam.is_custom);
    }
}
