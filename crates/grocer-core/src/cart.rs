//! # Cart
//!
//! The caller's current, uncommitted selection.
//!
//! ## Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add(Milk) then add(Bread)                                             │
//! │                                                                         │
//! │   position:   0          1                                              │
//! │   HEAD ──► [Bread] ──► [Milk] ──► TAIL                                  │
//! │                                                                         │
//! │  • add()        inserts at the head             O(1)                   │
//! │  • remove_at(p) removes the p-th line from head O(n)                   │
//! │  • size()       maintained by the deque         O(1)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart knows nothing about undo. [`GroceryStore`](crate::store::GroceryStore)
//! pairs every mutation here with its undo record.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartLine, ItemId};
use crate::validation::{validate_item_name, validate_price, validate_quantity};
use crate::MAX_CART_LINES;

/// Ordered cart lines, most recent addition at position 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: VecDeque<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Validates and inserts a new line at the head.
    ///
    /// ## Returns
    /// A copy of the inserted line (the undo record needs it).
    ///
    /// ## Errors
    /// - Empty name, quantity outside `1..=999`, negative price
    /// - Cart already holds `MAX_CART_LINES` lines
    pub fn add(
        &mut self,
        name: &str,
        price: Option<Money>,
        quantity: i64,
        product_id: Option<ItemId>,
    ) -> CoreResult<CartLine> {
        validate_item_name(name)?;
        validate_price(price)?;
        let quantity = validate_quantity(quantity)?;

        let line = CartLine::new(name.trim(), price, quantity, product_id);
        self.push_front(line.clone())?;
        Ok(line)
    }

    /// Inserts an already-validated line at the head.
    pub fn push_front(&mut self, line: CartLine) -> CoreResult<()> {
        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }
        self.lines.push_front(line);
        Ok(())
    }

    /// Removes the line at `position` (0 = head).
    ///
    /// Out-of-range positions leave the cart untouched.
    pub fn remove_at(&mut self, position: usize) -> CoreResult<CartLine> {
        let len = self.lines.len();
        self.lines
            .remove(position)
            .ok_or(CoreError::PositionOutOfRange { position, len })
    }

    /// Reinserts a line at `position`, clamped to the end of the cart.
    ///
    /// Used only to reverse a removal, so the line-count limit does not apply.
    pub(crate) fn insert_at(&mut self, position: usize, line: CartLine) {
        let position = position.min(self.lines.len());
        self.lines.insert(position, line);
    }

    /// Position of the first line equal to `line`.
    pub fn position_of(&self, line: &CartLine) -> Option<usize> {
        self.lines.iter().position(|l| l == line)
    }

    /// Empties the cart, returning the lines in head-to-tail order.
    pub fn take_all(&mut self) -> Vec<CartLine> {
        self.lines.drain(..).collect()
    }

    /// Replaces the whole cart with `lines` (head-to-tail order).
    pub(crate) fn replace_all(&mut self, lines: Vec<CartLine>) {
        self.lines = lines.into();
    }

    pub fn get(&self, position: usize) -> Option<&CartLine> {
        self.lines.get(position)
    }

    /// Lines in head-to-tail order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    pub fn size(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of `price × quantity` over all lines.
    pub fn total_price(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

/// Cart listing for the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartView {
    /// Head-to-tail order.
    pub lines: Vec<CartLine>,
    #[serde(rename = "total_cents")]
    pub total_price: Money,
    #[ts(type = "number")]
    pub total_quantity: u64,
    pub size: usize,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView {
            lines: cart.lines().cloned().collect(),
            total_price: cart.total_price(),
            total_quantity: cart.total_quantity(),
            size: cart.size(),
        }
    }
}
