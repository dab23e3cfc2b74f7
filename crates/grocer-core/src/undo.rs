//! # Undo Stack
//!
//! LIFO history of cart mutations, each stored as enough data to reverse it.
//!
//! ## Record → Reversal
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Mutation            UndoRecord                 Reversal               │
//! │  ────────            ──────────                 ────────               │
//! │  add(line)      ──►  Added { line }        ──►  remove line at head    │
//! │  remove_at(p)   ──►  Removed { p, line }   ──►  reinsert line at p     │
//! │  clear()        ──►  Cleared { lines }     ──►  restore all lines      │
//! │                                                                         │
//! │  Reversals are NOT recorded: undo is not itself undoable.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::cart::Cart;
use crate::types::CartLine;

// =============================================================================
// Undo Record
// =============================================================================

/// The captured inverse of one cart mutation. Never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UndoRecord {
    /// A line was added at the head.
    Added { line: CartLine },

    /// The line at `position` was removed.
    Removed { position: usize, line: CartLine },

    /// The cart was emptied; `lines` in head-to-tail order.
    Cleared { lines: Vec<CartLine> },
}

/// What an undo did to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Reversal {
    /// An added line was taken back out.
    RemovedAdded { line: CartLine },

    /// An added line was no longer in the cart. The cart is unchanged.
    NothingToRemove { line: CartLine },

    /// A removed line was put back.
    Reinserted { position: usize, line: CartLine },

    /// A cleared cart was refilled.
    Restored { lines: Vec<CartLine> },
}

impl UndoRecord {
    /// Reverses this record against `cart`.
    pub(crate) fn revert(self, cart: &mut Cart) -> Reversal {
        match self {
            UndoRecord::Added { line } => {
                // LIFO replay leaves the added line at the head; search only
                // if something outside the stack changed the cart.
                let position = match cart.get(0) {
                    Some(head) if *head == line => Some(0),
                    _ => cart.position_of(&line),
                };
                match position.map(|position| cart.remove_at(position)) {
                    Some(Ok(_)) => Reversal::RemovedAdded { line },
                    _ => {
                        warn!(name = %line.name, "Added line no longer in cart");
                        Reversal::NothingToRemove { line }
                    }
                }
            }
            UndoRecord::Removed { position, line } => {
                cart.insert_at(position, line.clone());
                Reversal::Reinserted { position, line }
            }
            UndoRecord::Cleared { lines } => {
                cart.replace_all(lines.clone());
                Reversal::Restored { lines }
            }
        }
    }
}

// =============================================================================
// Undo Stack
// =============================================================================

/// LIFO stack of [`UndoRecord`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoStack {
    records: Vec<UndoRecord>,
}

impl UndoStack {
    pub fn new() -> Self {
        UndoStack::default()
    }

    pub fn push(&mut self, record: UndoRecord) {
        self.records.push(record);
    }

    /// Pops the newest record and reverses it against `cart`.
    ///
    /// `None` when the stack is empty; the cart is untouched.
    pub fn undo(&mut self, cart: &mut Cart) -> Option<Reversal> {
        self.records.pop().map(|record| record.revert(cart))
    }

    pub fn size(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records from most recent to oldest.
    pub fn peek_all(&self) -> Vec<UndoRecord> {
        self.records.iter().rev().cloned().collect()
    }

    /// Drops all pending records without touching the cart.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
